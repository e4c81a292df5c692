//! Path: native/game_sim/src/game_logic/chase_ai.rs
//! Summary: 追跡方向の計算と最近接の生存敵の探索（find_nearest_*）

use crate::world::{EntityId, GameWorld};
use glam::Vec2;

/// 最近接の生存敵（ボス含む）。`max_dist` より遠いものは無視する
pub fn find_nearest_enemy(w: &GameWorld, from: Vec2, max_dist: f32) -> Option<(EntityId, Vec2)> {
    find_nearest_enemy_excluding(w, from, max_dist, |_| false)
}

/// `exclude` が true を返す敵を除いた最近接の生存敵（ホーミングの命中済み除外用）
pub fn find_nearest_enemy_excluding(
    w: &GameWorld,
    from: Vec2,
    max_dist: f32,
    exclude: impl Fn(EntityId) -> bool,
) -> Option<(EntityId, Vec2)> {
    let max_sq = max_dist * max_dist;
    let mut best: Option<(EntityId, Vec2)> = None;
    let mut best_sq = f32::MAX;
    for &id in w.enemies() {
        if exclude(id) {
            continue;
        }
        let Some(e) = w.live_enemy(id) else { continue };
        // 二乗距離で比較（sqrt を避ける）
        let d_sq = e.position().distance_squared(from);
        if d_sq <= max_sq && d_sq < best_sq {
            best_sq = d_sq;
            best = Some((id, e.position()));
        }
    }
    best
}

/// `from` から `to` へ `speed` で向かう速度（重なっていればゼロ）
#[inline]
pub fn chase_velocity(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}
