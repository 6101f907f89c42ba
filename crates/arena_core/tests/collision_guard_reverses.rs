use arena_core::actor::EnemyKind;
use arena_core::scoreboard::MemoryScores;
use arena_core::ArenaState;
use glam::vec3;

#[test]
fn blocked_drive_backs_straight_out() {
    let mut s = ArenaState::with_seed(Box::new(MemoryScores::default()), 17);
    s.begin_empty_play();
    s.spawn_obstacle_at(vec3(0.0, 0.0, -130.0), vec3(10.0, 10.0, 10.0));
    let id = s.spawn_enemy_at(EnemyKind::Tank, vec3(0.0, 0.0, -100.0));
    {
        // A plan that dead-ends into the wall.
        let e = s.enemy_mut(id).unwrap();
        e.tuning.engages = false;
        e.plan_move_to(vec3(0.0, 0.0, -160.0));
    }

    let mut reversed = false;
    for _ in 0..300 {
        s.step(1.0 / 60.0);
        let e = s.enemy(id).unwrap();
        assert!(
            !e.aabb().overlaps(&s.obstacles[0].aabb()),
            "guard never leaves a tank inside a wall"
        );
        if e.vel.z > 0.0 {
            reversed = true;
        }
    }
    assert!(reversed, "the dead-end plan turned into a reverse maneuver");
}
