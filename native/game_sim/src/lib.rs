//! Path: native/game_sim/src/lib.rs
//! Summary: モジュール宣言と pub use のみ

pub use game_core::boss::{BossKind, BossState};
pub use game_core::enemy::EnemyKind;
pub use game_core::upgrade::Upgrade;

pub mod audio;
pub mod config;
pub mod game_logic;
pub mod game_loop;
pub mod input;
pub mod logging;
pub mod menu;
pub mod render_snapshot;
pub mod world;

pub use audio::{AudioCommand, AudioQueue};
pub use config::{ConfigError, SimConfig};
pub use game_logic::{
    drain_audio_commands, drain_frame_events, find_nearest_enemy, find_nearest_enemy_excluding,
    handle_menu_action, step_frame,
};
pub use game_loop::{run_frame, FrameOutput, FramePacer};
pub use input::InputSnapshot;
pub use menu::{Menu, MenuAction, MenuKind};
pub use render_snapshot::{build_render_frame, RenderFrame};
pub use world::{
    Entity, EntityId, EntityKind, EntityState, FrameEvent, GamePhase, GameWorld, ProjectileSpec,
};
