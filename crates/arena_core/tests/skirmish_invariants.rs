use arena_core::geom::Aabb;
use arena_core::scoreboard::MemoryScores;
use arena_core::{ArenaState, GameEvent};
use glam::{Vec3, vec3};
use std::collections::HashSet;

/// Thirty seconds of a full battlefield with the player spraying rounds.
/// Checks the structural invariants every tick rather than any scripted
/// outcome.
#[test]
fn thirty_seconds_of_battle_hold_the_invariants() {
    let mut s = ArenaState::with_seed(Box::new(MemoryScores::default()), 1234);
    s.begin_play();
    let dt = 1.0 / 60.0;
    let mut last_score = 0;
    let mut deaths = 0;

    for tick in 0..1800_u32 {
        if tick % 30 == 0 {
            let a = tick as f32 * 0.37;
            s.player_fire(vec3(a.sin(), 0.0, -a.cos()));
        }
        s.step(dt);
        deaths += s
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerDied))
            .count();

        let mut ids = HashSet::new();
        for e in &s.enemies {
            assert!(ids.insert(e.id), "duplicate actor id {:?}", e.id);
            for o in &s.obstacles {
                // Snap arrivals may graze a wall face; anything deeper than
                // a quarter unit is a guard failure.
                let tight = Aabb::centered(o.pos, o.half - Vec3::splat(0.25));
                assert!(
                    !e.aabb().overlaps(&tight),
                    "{:?} parked inside an obstacle",
                    e.id
                );
            }
        }
        let sc = s.score();
        assert!(sc >= last_score, "score never goes down mid-run");
        last_score = sc;
        assert!(s.difficulty() >= s.cfg.initial_difficulty);
        assert!(s.player.health.hp >= 0);
        assert!(s.timers.pending() <= 48, "timer churn stays bounded");
    }
    assert!(deaths <= 1, "dying twice is impossible");
}
