use arena_core::action::Action;
use arena_core::actor::EnemyKind;
use arena_core::scoreboard::MemoryScores;
use arena_core::ArenaState;
use glam::{Vec3, vec3};

#[test]
fn ufo_pays_big_and_comes_back() {
    let mut s = ArenaState::with_seed(Box::new(MemoryScores::default()), 13);
    s.begin_empty_play();
    let id = s.spawn_enemy_at(EnemyKind::Ufo, vec3(0.0, 0.0, -6.0));
    s.enemy_mut(id)
        .unwrap()
        .queue
        .push_back(Action::Idle { remaining_s: 60.0 });
    s.player_fire(Vec3::NEG_Z);

    for _ in 0..60 {
        s.step(1.0 / 60.0);
    }
    assert_eq!(s.score(), 5000, "saucer bounty");
    assert_eq!(
        s.difficulty(),
        s.cfg.initial_difficulty,
        "saucer kills do not ramp the ground mix"
    );
    assert!(s.enemy(id).is_none());

    // The return window is 10..20s after the kill.
    let mut back = false;
    for _ in 0..(21 * 60) {
        s.step(1.0 / 60.0);
        if s.enemies.iter().any(|e| e.kind == EnemyKind::Ufo) {
            back = true;
            break;
        }
    }
    assert!(back, "ufo slot refills inside its window");
}
