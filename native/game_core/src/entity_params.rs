//! Path: native/game_core/src/entity_params.rs
//! Summary: 敵・ボスの種類別パラメータテーブル
//!
//! EnemyKind / BossKind をインデックスにして静的テーブルを引く。
//! ウェーブによるスケーリングは呼び出し側で `scaled_*` を使う。

use crate::boss::BossKind;
use crate::enemy::EnemyKind;

/// 死亡時に爆発する敵のパラメータ
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionParams {
    pub radius: f32,
    pub damage: f32,
}

/// 遠距離攻撃する敵のパラメータ
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangedParams {
    pub cooldown:         f32,
    pub projectile_speed: f32,
    pub damage:           f32,
}

/// 敵のパラメータ（EnemyKind で参照）
#[derive(Clone, Copy, Debug)]
pub struct EnemyParams {
    pub max_health:   f32,
    pub speed:        f32,
    pub radius:       f32,
    pub exp_reward:   u32,
    /// 接触中の毎秒ダメージ（実際には 0.5 倍して dt を掛ける）
    pub contact_dps:  f32,
    pub color:        [f32; 4],
    pub explosion:    Option<ExplosionParams>,
    pub ranged:       Option<RangedParams>,
    pub anim_fps:     f32,
    pub frame_count:  u8,
}

/// ウェーブ 1 あたりの加算量
pub const HEALTH_PER_WAVE: f32 = 8.0;
pub const SPEED_PER_WAVE:  f32 = 3.0;
pub const BOSS_HEALTH_PER_WAVE: f32 = 50.0;
pub const BOSS_SPEED_PER_WAVE:  f32 = 2.0;
pub const BOSS_EXP_PER_WAVE:    u32 = 100;

static ENEMY_TABLE: [EnemyParams; 4] = [
    // Grunt
    EnemyParams {
        max_health: 25.0, speed: 70.0,  radius: 14.0, exp_reward: 10, contact_dps: 20.0,
        color: [0.9, 0.25, 0.25, 1.0], explosion: None, ranged: None,
        anim_fps: 6.0, frame_count: 4,
    },
    // Runner
    EnemyParams {
        max_health: 15.0, speed: 130.0, radius: 11.0, exp_reward: 8,  contact_dps: 14.0,
        color: [1.0, 0.85, 0.2, 1.0], explosion: None, ranged: None,
        anim_fps: 12.0, frame_count: 2,
    },
    // Exploder
    EnemyParams {
        max_health: 45.0, speed: 55.0,  radius: 18.0, exp_reward: 15, contact_dps: 24.0,
        color: [1.0, 0.5, 0.1, 1.0],
        explosion: Some(ExplosionParams { radius: 90.0, damage: 25.0 }), ranged: None,
        anim_fps: 4.0, frame_count: 2,
    },
    // Shooter
    EnemyParams {
        max_health: 20.0, speed: 50.0,  radius: 13.0, exp_reward: 12, contact_dps: 12.0,
        color: [0.4, 0.6, 1.0, 1.0], explosion: None,
        ranged: Some(RangedParams { cooldown: 2.5, projectile_speed: 260.0, damage: 10.0 }),
        anim_fps: 6.0, frame_count: 2,
    },
];

impl EnemyParams {
    pub fn get(kind: EnemyKind) -> &'static EnemyParams {
        &ENEMY_TABLE[kind as usize]
    }

    pub fn scaled_health(&self, wave: u32) -> f32 {
        self.max_health + wave as f32 * HEALTH_PER_WAVE
    }

    pub fn scaled_speed(&self, wave: u32) -> f32 {
        self.speed + wave as f32 * SPEED_PER_WAVE
    }
}

// ─── BossParams ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct BossParams {
    pub max_health:  f32,
    pub speed:       f32,
    pub radius:      f32,
    pub contact_dps: f32,
    pub color:       [f32; 4],
    /// HUD 表示用のボス名
    pub name:        &'static str,
}

static BOSS_TABLE: [BossParams; 2] = [
    BossParams { max_health: 1500.0, speed: 100.0, radius: 30.0, contact_dps: 40.0, color: [0.8, 0.1, 0.1, 1.0], name: "Tank" },
    BossParams { max_health: 900.0,  speed: 70.0,  radius: 25.0, contact_dps: 30.0, color: [0.7, 0.2, 0.9, 1.0], name: "Sprayer" },
];

impl BossParams {
    pub fn get(kind: BossKind) -> &'static BossParams {
        &BOSS_TABLE[kind as usize]
    }

    pub fn scaled_health(&self, wave: u32) -> f32 {
        self.max_health + wave as f32 * BOSS_HEALTH_PER_WAVE
    }

    pub fn scaled_speed(&self, wave: u32) -> f32 {
        self.speed + wave as f32 * BOSS_SPEED_PER_WAVE
    }

    /// 撃破時に必ず付与される経験値
    pub fn exp_reward(wave: u32) -> u32 {
        BOSS_EXP_PER_WAVE * wave.max(1)
    }
}
