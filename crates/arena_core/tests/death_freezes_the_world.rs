use arena_core::actor::EnemyKind;
use arena_core::scoreboard::MemoryScores;
use arena_core::{ArenaState, GameEvent, Phase};
use glam::{Vec3, vec3};

#[test]
fn lethal_ram_ends_and_freezes_the_run() {
    let mut s = ArenaState::with_seed(Box::new(MemoryScores::default()), 23);
    s.begin_empty_play();
    // A far tank out of shot range; it just wanders until the end.
    let far = s.spawn_enemy_at(EnemyKind::Tank, vec3(0.0, 0.0, -300.0));
    s.spawn_enemy_at(EnemyKind::Missile, vec3(0.0, 0.0, -40.0));
    s.player.health.hp = 1;

    let mut died = 0;
    for _ in 0..(4 * 60) {
        s.step(1.0 / 60.0);
        died += s
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerDied))
            .count();
    }
    assert_eq!(died, 1, "exactly one death");
    assert_eq!(s.phase(), Phase::Death);
    assert_eq!(s.player.health.hp, 0);

    // Frozen: neither time, nor actors, nor intents move the world now.
    let frozen_t = s.time_s;
    let frozen_pos = s.enemy(far).unwrap().pos;
    for _ in 0..120 {
        s.step(1.0 / 60.0);
    }
    s.player_fire(Vec3::NEG_Z);
    s.move_player(vec3(5.0, 0.0, 0.0));
    assert_eq!(s.time_s, frozen_t, "the clock stops with the run");
    assert_eq!(s.enemy(far).unwrap().pos, frozen_pos);
    assert!(s.projectiles.is_empty(), "intents are ignored after death");
    assert_eq!(s.player.pos, Vec3::ZERO);
}
