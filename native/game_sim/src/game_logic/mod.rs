//! Path: native/game_sim/src/game_logic/mod.rs
//! Summary: フレームステップ・追跡 AI・種類別システム・イベント drain

mod chase_ai;
mod events;
mod frame_step;
pub(crate) mod systems;

pub use chase_ai::{chase_velocity, find_nearest_enemy, find_nearest_enemy_excluding};
pub use events::{drain_audio_commands, drain_frame_events};
pub use frame_step::{handle_menu_action, step_frame};
