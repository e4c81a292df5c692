//! Path: native/game_sim/src/game_loop.rs
//! Summary: フレームペーサー（最小ティック待ち・dt クランプ）とホストループ

use crate::audio::AudioCommand;
use crate::game_logic::{drain_audio_commands, drain_frame_events, step_frame};
use crate::input::InputSnapshot;
use crate::world::{FrameEvent, GameWorld};
use game_core::constants::{MAX_DELTA_SECS, MIN_FRAME_MS};
use std::thread;
use std::time::{Duration, Instant};

/// 最小ティックまで待ち、前フレームからの経過を dt（秒）で返す
pub struct FramePacer {
    min_tick:  Duration,
    max_delta: f32,
    last:      Instant,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::with_limits(Duration::from_millis(MIN_FRAME_MS), MAX_DELTA_SECS)
    }

    pub fn with_limits(min_tick: Duration, max_delta: f32) -> Self {
        Self { min_tick, max_delta, last: Instant::now() }
    }

    /// 次のフレームまで待つ。長い停止の後でも dt は `max_delta` を超えない
    pub fn wait(&mut self) -> f32 {
        let next_tick = self.last + self.min_tick;
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.clamp(dt)
    }

    pub fn clamp(&self, dt: f32) -> f32 {
        if dt.is_finite() { dt.clamp(0.0, self.max_delta) } else { 0.0 }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

/// ホストに返す 1 フレームの出力
#[derive(Debug, Default)]
pub struct FrameOutput {
    pub events: Vec<FrameEvent>,
    pub audio:  Vec<AudioCommand>,
}

/// 入力を流し込み 1 フレーム進めて、溜まった出力を取り出す
pub fn run_frame(w: &mut GameWorld, input: InputSnapshot, dt: f32) -> FrameOutput {
    w.input = input;
    step_frame(w, dt);
    FrameOutput {
        events: drain_frame_events(w),
        audio:  drain_audio_commands(w),
    }
}
