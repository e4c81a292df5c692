use crate::world::{FrameEvent, GameWorld};
use game_core::boss::BossKind;
use game_core::constants::{BOSS_WAVE_INTERVAL, SPAWN_DISTANCE, SPAWN_DISTANCE_JITTER};
use game_core::spawn_rules::SpawnOrder;
use game_core::util::{clamp_to_world, population_cap, spawn_position_around_player};
use glam::Vec2;

/// 大群の散らばり（一方向の中心からの半径）
const HORDE_SPREAD: f32 = 60.0;

/// ボスウェーブならボスを出し、そうでなければスケジュールに従って敵を出す。
/// 生きたボスがいる間は通常スポーンを止める。
pub(crate) fn update_spawns(w: &mut GameWorld, dt: f32) {
    let Some(pp) = w.player_position() else { return };

    if w.wave % BOSS_WAVE_INTERVAL == 0 && w.last_boss_wave != w.wave {
        w.last_boss_wave = w.wave;
        let kind = BossKind::for_wave(w.wave);
        let pos = clamp_to_world(ring_position(w, pp));
        w.spawn_boss(kind, pos, w.wave);
        w.push_event(FrameEvent::BossSpawned { kind, wave: w.wave });
        log::info!("boss spawned: {} (wave {})", kind.name(), w.wave);
    }
    if w.has_live_boss() {
        return;
    }

    let mut orders = std::mem::take(&mut w.spawn_orders);
    orders.clear();
    let live = w.enemies().len();
    w.schedule.tick(dt, w.elapsed_seconds, w.wave, live, population_cap(w.wave), &mut orders);
    for order in &orders {
        match *order {
            SpawnOrder::Batch { kind, count } => {
                for _ in 0..count {
                    let pos = clamp_to_world(ring_position(w, pp));
                    w.spawn_enemy(kind, pos, w.wave);
                }
            }
            SpawnOrder::Horde { kind, count } => {
                let center = ring_position(w, pp);
                for _ in 0..count {
                    let offset = w.rng.unit_vec() * w.rng.range(0.0, HORDE_SPREAD);
                    w.spawn_enemy(kind, clamp_to_world(center + offset), w.wave);
                }
            }
        }
        log::debug!("spawn {:?} at {:.1}s (wave {})", order, w.elapsed_seconds, w.wave);
    }
    w.spawn_orders = orders;
}

fn ring_position(w: &mut GameWorld, around: Vec2) -> Vec2 {
    spawn_position_around_player(
        &mut w.rng,
        around,
        SPAWN_DISTANCE - SPAWN_DISTANCE_JITTER,
        SPAWN_DISTANCE + SPAWN_DISTANCE_JITTER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::enemy::EnemyKind;

    fn world() -> GameWorld {
        let mut w = GameWorld::new(13);
        w.reset_run();
        w
    }

    #[test]
    fn boss_wave_spawns_once() {
        let mut w = world();
        w.wave = 5;
        update_spawns(&mut w, 0.016);
        update_spawns(&mut w, 0.016);
        assert_eq!(w.bosses().len(), 1);
        let spawned = w.frame_events().iter().filter(|e| matches!(e, FrameEvent::BossSpawned { .. })).count();
        assert_eq!(spawned, 1);
    }

    #[test]
    fn live_boss_suspends_regular_spawns() {
        let mut w = world();
        w.wave = 5;
        w.elapsed_seconds = 125.0;
        for _ in 0..200 {
            update_spawns(&mut w, 0.1);
        }
        assert_eq!(w.enemies().len(), 1);
    }

    #[test]
    fn population_cap_is_never_exceeded() {
        let mut w = world();
        w.wave = 2;
        let cap = population_cap(w.wave);
        for i in 0..cap - 2 {
            w.spawn_enemy(EnemyKind::Grunt, Vec2::new(100.0 + i as f32, 100.0), 1);
        }
        for step in 0..100 {
            w.elapsed_seconds = 30.0 + step as f32;
            update_spawns(&mut w, 1.0);
            assert!(w.enemies().len() <= cap);
        }
    }

    #[test]
    fn spawns_land_inside_the_world() {
        let mut w = world();
        for step in 0..50 {
            w.elapsed_seconds = step as f32;
            update_spawns(&mut w, 1.0);
        }
        assert!(!w.enemies().is_empty());
        let size = game_core::util::world_size();
        for &id in w.enemies() {
            let p = w.entity(id).map(|e| e.position()).unwrap_or(Vec2::NEG_ONE);
            assert!(p.x >= 0.0 && p.y >= 0.0 && p.x <= size.x && p.y <= size.y);
        }
    }
}
