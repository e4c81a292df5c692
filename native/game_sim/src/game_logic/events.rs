//! Path: native/game_sim/src/game_logic/events.rs
//! Summary: フレームイベント・オーディオ要求の drain（ホストが毎フレーム呼ぶ）

use crate::audio::AudioCommand;
use crate::world::{FrameEvent, GameWorld};

/// このフレームまでに溜まったイベントを取り出す
pub fn drain_frame_events(w: &mut GameWorld) -> Vec<FrameEvent> {
    w.frame_events.drain(..).collect()
}

pub fn drain_audio_commands(w: &mut GameWorld) -> Vec<AudioCommand> {
    w.audio.drain().collect()
}
