//! Path: native/game_sim/src/main.rs
//! Summary: ヘッドレスホスト（設定読み込み → ログ初期化 → ペーサー付きループ → 集計出力）

use game_sim::config::SimConfig;
use game_sim::game_loop::{run_frame, FramePacer};
use game_sim::input::InputSnapshot;
use game_sim::world::{FrameEvent, GamePhase, GameWorld};
use std::process::ExitCode;

/// 自動操縦で移動方向を切り替える間隔（秒）
const AUTOPILOT_TURN_SECS: f32 = 2.0;

#[derive(Default)]
struct RunSummary {
    frames:       u64,
    kills:        u32,
    levels:       u32,
    bosses:       u32,
    boss_kills:   u32,
    damage_taken: f32,
    game_overs:   u32,
}

impl RunSummary {
    fn record(&mut self, events: &[FrameEvent]) {
        for ev in events {
            match ev {
                FrameEvent::EnemyKilled { .. } => self.kills += 1,
                FrameEvent::LevelUp { .. } => self.levels += 1,
                FrameEvent::BossSpawned { .. } => self.bosses += 1,
                FrameEvent::BossDefeated { .. } => self.boss_kills += 1,
                FrameEvent::PlayerDamaged { amount } => self.damage_taken += amount,
                FrameEvent::GameOver { .. } => self.game_overs += 1,
                FrameEvent::OrbCollected { .. } | FrameEvent::WaveChanged { .. } => {}
            }
        }
    }
}

/// メニューでは決定を押し続け、プレイ中は一定間隔で向きを変えて歩く
fn autopilot_input(w: &GameWorld, clock: f32) -> InputSnapshot {
    if w.phase != GamePhase::Playing {
        return InputSnapshot { confirm: true, ..Default::default() };
    }
    let leg = (clock / AUTOPILOT_TURN_SECS) as u32 % 4;
    InputSnapshot {
        up:    leg == 0,
        right: leg == 1,
        down:  leg == 2,
        left:  leg == 3,
        dash:  clock.fract() < 0.05,
        ..Default::default()
    }
}

fn main() -> ExitCode {
    let cfg = match SimConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            game_sim::logging::init(false);
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    game_sim::logging::init(cfg.verbose);
    log::info!("arena_headless: {:?}", cfg);

    let mut world = GameWorld::new(cfg.seed);
    let mut pacer = FramePacer::new();
    let mut summary = RunSummary::default();
    let mut clock = 0.0_f32;

    while clock < cfg.duration_secs && !world.quit_requested() {
        let dt = pacer.wait();
        clock += dt;
        let input = if cfg.autopilot { autopilot_input(&world, clock) } else { InputSnapshot::default() };
        let out = run_frame(&mut world, input, dt);
        summary.record(&out.events);
        for cmd in &out.audio {
            log::debug!("audio: {:?}", cmd);
        }
        summary.frames += 1;
    }

    log::info!(
        "summary: {} frames, {:.1}s played, wave {}, kills {} (events {}), levels +{}, bosses {}/{}, damage taken {:.1}, game overs {}",
        summary.frames,
        world.elapsed_seconds,
        world.wave,
        world.kill_count,
        summary.kills,
        summary.levels,
        summary.boss_kills,
        summary.bosses,
        summary.damage_taken,
        summary.game_overs,
    );
    ExitCode::SUCCESS
}
