//! Path: native/game_sim/src/audio.rs
//! Summary: BGM 制御コマンドのキュー（再生はホスト側のオーディオサービスが行う）
//!
//! World は音を直接鳴らさず、要求だけを積む。ホストが毎フレーム drain する。

pub const TRACK_MENU:     &str = "menu";
pub const TRACK_GAMEPLAY: &str = "gameplay";

/// オーディオサービスに渡すコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    PlayTrack(&'static str),
    PauseTrack,
    ResumeTrack,
}

/// 現在のトラックを覚えておき、同じ曲の再生要求は積まない
#[derive(Debug, Default)]
pub struct AudioQueue {
    current:  Option<&'static str>,
    paused:   bool,
    commands: Vec<AudioCommand>,
}

impl AudioQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 再生中でなければ再生する（同じトラックなら何もしない）
    pub fn play_track(&mut self, track: &'static str) {
        if self.current == Some(track) && !self.paused {
            return;
        }
        if self.current == Some(track) && self.paused {
            self.resume();
            return;
        }
        self.current = Some(track);
        self.paused = false;
        self.commands.push(AudioCommand::PlayTrack(track));
    }

    pub fn pause(&mut self) {
        if self.current.is_some() && !self.paused {
            self.paused = true;
            self.commands.push(AudioCommand::PauseTrack);
        }
    }

    pub fn resume(&mut self) {
        if self.current.is_some() && self.paused {
            self.paused = false;
            self.commands.push(AudioCommand::ResumeTrack);
        }
    }

    pub fn current_track(&self) -> Option<&'static str> {
        self.current
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, AudioCommand> {
        self.commands.drain(..)
    }
}
