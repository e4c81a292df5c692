//! Path: native/game_sim/src/world/frame_event.rs
//! Summary: フレーム内で発生したゲームイベント（ホストが毎フレーム drain する）

use game_core::boss::BossKind;
use game_core::enemy::EnemyKind;
use glam::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    EnemyKilled   { kind: EnemyKind, position: Vec2 },
    PlayerDamaged { amount: f32 },
    LevelUp       { level: u32 },
    BossSpawned   { kind: BossKind, wave: u32 },
    BossDefeated  { kind: BossKind },
    OrbCollected  { value: f32 },
    WaveChanged   { wave: u32 },
    GameOver      { elapsed_seconds: f32, level: u32, kills: u32 },
}
