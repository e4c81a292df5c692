//! Path: native/game_core/src/util.rs
//! Summary: 経験値曲線・ウェーブ計算・同時出現上限・スポーン位置などの共通ユーティリティ

use crate::constants::{
    BASE_EXP_TO_NEXT, BASE_POPULATION_CAP, EXP_GROWTH, POPULATION_CAP_PER_WAVE,
    WAVE_DURATION_SECS, WORLD_EDGE_MARGIN, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::physics::clamp_to_bounds;
use crate::physics::rng::SimpleRng;
use glam::Vec2;

/// `level` から次のレベルに上がるために必要な経験値（レベルごとに 1.5 倍）
pub fn exp_required_for_next(level: u32) -> f32 {
    BASE_EXP_TO_NEXT * EXP_GROWTH.powi(level.saturating_sub(1) as i32)
}

/// 経過時間から現在のウェーブ（1 始まり）を返す
pub fn current_wave(elapsed_secs: f32) -> u32 {
    1 + (elapsed_secs.max(0.0) / WAVE_DURATION_SECS) as u32
}

/// ウェーブごとの敵の同時出現上限
pub fn population_cap(wave: u32) -> usize {
    BASE_POPULATION_CAP + wave as usize * POPULATION_CAP_PER_WAVE
}

/// プレイヤー周囲の円環上に配置（min_dist..max_dist）
pub fn spawn_position_around_player(
    rng: &mut SimpleRng,
    player: Vec2,
    min_dist: f32,
    max_dist: f32,
) -> Vec2 {
    let angle = rng.angle();
    let dist = rng.range(min_dist, max_dist);
    player + Vec2::from_angle(angle) * dist
}

/// ワールド境界内（端から WORLD_EDGE_MARGIN）へクランプ
pub fn clamp_to_world(p: Vec2) -> Vec2 {
    clamp_to_bounds(p, world_size(), WORLD_EDGE_MARGIN)
}

pub fn world_size() -> Vec2 {
    Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)
}

/// 角度を [0, TAU) に畳み込む
pub fn wrap_angle(a: f32) -> f32 {
    a.rem_euclid(std::f32::consts::TAU)
}
