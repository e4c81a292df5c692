//! Path: native/game_core/src/lib.rs
//! Summary: ゲームコア共通ロジック（定数・敵/ボス定義・ステータス・強化・出現スケジュール・物理プリミティブ）

pub mod boss;
pub mod constants;
pub mod enemy;
pub mod entity_params;
pub mod physics;
pub mod player;
pub mod spawn_rules;
pub mod upgrade;
pub mod util;
