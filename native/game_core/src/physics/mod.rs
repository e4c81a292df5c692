//! Path: native/game_core/src/physics/mod.rs
//! Summary: 物理プリミティブ（円同士の交差判定・決定論的 RNG）

pub mod rng;

use glam::Vec2;

/// 円同士の交差判定: 距離の二乗 <= (半径和)^2
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) <= r * r
}

/// 矩形 [margin, size - margin] にクランプする
#[inline]
pub fn clamp_to_bounds(p: Vec2, size: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        p.x.clamp(margin, (size.x - margin).max(margin)),
        p.y.clamp(margin, (size.y - margin).max(margin)),
    )
}

/// 矩形から `margin` 以上はみ出しているか
#[inline]
pub fn outside_bounds(p: Vec2, size: Vec2, margin: f32) -> bool {
    p.x < -margin || p.y < -margin || p.x > size.x + margin || p.y > size.y + margin
}
