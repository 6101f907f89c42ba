use arena_core::action::Action;
use arena_core::actor::EnemyKind;
use arena_core::scoreboard::MemoryScores;
use arena_core::ArenaState;
use glam::vec3;

#[test]
fn retargets_stop_appending_at_the_cap() {
    let mut s = ArenaState::with_seed(Box::new(MemoryScores::default()), 15);
    s.begin_empty_play();
    let id = s.spawn_enemy_at(EnemyKind::Missile, vec3(0.0, 0.0, -400.0));
    {
        // Pin the missile mid-turn so every retarget sees a non-Move head
        // and appends instead of replacing.
        let e = s.enemy_mut(id).unwrap();
        e.tuning.turn_speed = 1e-3;
        e.plan_rotate(std::f32::consts::PI);
    }

    for _ in 0..(10 * 60) {
        s.step(1.0 / 60.0);
    }
    let e = s.enemy(id).unwrap();
    assert!(
        matches!(e.queue.front(), Some(Action::Rotate { .. })),
        "still on the pinned turn"
    );
    assert_eq!(
        e.queue.len(),
        s.cfg.missile_queue_cap,
        "appends stop at the cap"
    );
    assert_eq!(
        e.pos,
        vec3(0.0, 0.0, -400.0),
        "turning blocks the drive the whole time"
    );
}

/// A waypoint queued behind a long turn goes stale when the player moves on.
/// The missile must still drive the whole stale leg at its own speed, never
/// snap onto it from across the field.
#[test]
fn stale_waypoint_is_driven_to_not_teleported_onto() {
    let mut s = ArenaState::with_seed(Box::new(MemoryScores::default()), 22);
    s.begin_empty_play();
    let id = s.spawn_enemy_at(EnemyKind::Missile, vec3(0.0, 0.0, -400.0));
    // Slow the half turn to ~6s so the retarget cadence keeps appending
    // behind a Rotate head.
    s.enemy_mut(id).unwrap().tuning.turn_speed = 0.5;

    let dt = 1.0 / 60.0;
    for _ in 0..90 {
        s.step(dt);
    }
    // Relocate the player behind the missile. The appended waypoints now
    // disagree with the first leg still deep in its turn.
    s.move_player(vec3(0.0, 0.0, -600.0));

    let step_cap = s.enemy(id).unwrap().tuning.move_speed * dt * 1.5;
    let mut prev = s.enemy(id).unwrap().pos;
    for _ in 0..(12 * 60) {
        s.step(dt);
        let Some(e) = s.enemy(id) else { break };
        let moved = e.pos.distance(prev);
        assert!(moved <= step_cap, "missile jumped {moved} units in one tick");
        prev = e.pos;
    }
}
