use arena_core::action::Action;
use arena_core::actor::EnemyKind;
use arena_core::scoreboard::MemoryScores;
use arena_core::ArenaState;
use glam::{Vec3, vec3};

#[test]
fn walls_stop_player_rounds() {
    let mut s = ArenaState::with_seed(Box::new(MemoryScores::default()), 18);
    s.begin_empty_play();
    s.spawn_obstacle_at(vec3(0.0, 0.0, -50.0), vec3(10.0, 10.0, 10.0));
    let id = s.spawn_enemy_at(EnemyKind::Tank, vec3(0.0, 0.0, -100.0));
    {
        let e = s.enemy_mut(id).unwrap();
        e.tuning.engages = false;
        e.queue.push_back(Action::Idle { remaining_s: 60.0 });
    }
    s.player_fire(Vec3::NEG_Z);

    // Flight to the wall takes ~4s at the player's 10 u/s.
    for _ in 0..(6 * 60) {
        s.step(1.0 / 60.0);
    }
    assert!(s.projectiles.is_empty(), "the wall soaked the round");
    assert_eq!(s.score(), 0, "nothing was destroyed");
    assert!(s.enemy(id).unwrap().alive, "the tank behind the wall is untouched");
}
