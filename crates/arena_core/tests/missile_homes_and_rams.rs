use arena_core::actor::EnemyKind;
use arena_core::scoreboard::MemoryScores;
use arena_core::{ArenaState, GameEvent};
use glam::vec3;

#[test]
fn missile_homes_rams_and_returns() {
    let mut s = ArenaState::with_seed(Box::new(MemoryScores::default()), 14);
    s.begin_empty_play();
    let id = s.spawn_enemy_at(EnemyKind::Missile, vec3(0.0, 0.0, -300.0));

    // First retarget lands at 1s, then a half turn and a 100 u/s run in.
    let mut ram = None;
    'outer: for _ in 0..(8 * 60) {
        s.step(1.0 / 60.0);
        for ev in s.drain_events() {
            if let GameEvent::PlayerDamaged { amount, hp } = ev {
                ram = Some((amount, hp));
                break 'outer;
            }
        }
    }
    let (amount, hp) = ram.expect("missile reaches the player");
    assert_eq!(amount, s.cfg.missile_damage, "body hit costs more than a round");
    assert_eq!(hp, s.cfg.player.max_hp - s.cfg.missile_damage);
    assert!(s.enemy(id).is_none(), "the missile dies in the ram");

    // Its slot refills like any other loss.
    let mut returned = false;
    for _ in 0..(12 * 60) {
        s.step(1.0 / 60.0);
        if s.enemies.iter().any(|e| e.kind == EnemyKind::Missile) {
            returned = true;
            break;
        }
    }
    assert!(returned, "a fresh missile takes the slot");
}
