//! Path: native/game_sim/src/config.rs
//! Summary: 環境変数から読む実行時設定（シード・実行時間・ログ詳細度・自動操縦）

use game_core::constants::DEFAULT_RNG_SEED;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_SEED: &str = "ARENA_SEED";
pub const ENV_DURATION: &str = "ARENA_DURATION_SECS";
pub const ENV_VERBOSE: &str = "ARENA_VERBOSE";
pub const ENV_AUTOPILOT: &str = "ARENA_AUTOPILOT";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub seed:          u64,
    /// ヘッドレス実行の長さ（秒）
    pub duration_secs: f32,
    pub verbose:       bool,
    /// スクリプト入力でメニューと移動を操作する
    pub autopilot:     bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: DEFAULT_RNG_SEED, duration_secs: 60.0, verbose: false, autopilot: true }
    }
}

impl SimConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `lookup` で値を引く（テスト用に環境を差し替えられる）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let d = Self::default();
        let duration_secs: f32 = parse(&lookup, ENV_DURATION, d.duration_secs)?;
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(ConfigError::Invalid { key: ENV_DURATION, value: duration_secs.to_string() });
        }
        Ok(Self {
            seed: parse(&lookup, ENV_SEED, d.seed)?,
            duration_secs,
            verbose: parse_bool(&lookup, ENV_VERBOSE, d.verbose)?,
            autopilot: parse_bool(&lookup, ENV_AUTOPILOT, d.autopilot)?,
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value: raw }),
        },
    }
}
