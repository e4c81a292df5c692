//! Path: native/game_core/src/boss.rs
//! Summary: ボス種類と攻撃パターンのステートマシン（状態・持続時間・遷移規則）
//!
//! 状態ごとの振る舞い（弾の発射や突進）は game_sim 側のシステムが担当し、
//! ここではタイマー・攻撃インデックス・連続攻撃カウンタの遷移だけを扱う。

use crate::constants::BOSS_WAVE_INTERVAL;
use crate::entity_params::BossParams;
use glam::Vec2;

/// ボスの種類
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum BossKind {
    /// 高 HP。連射・三連突進・爆撃
    Tank    = 0,
    /// 弾幕型。螺旋・扇・地雷・狙撃ビーム
    Sprayer = 1,
}

impl BossKind {
    pub fn from_u8(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Tank),
            1 => Some(Self::Sprayer),
            _ => None,
        }
    }

    pub fn params(&self) -> &'static BossParams {
        BossParams::get(*self)
    }

    pub fn name(&self) -> &'static str {
        self.params().name
    }

    /// ボスウェーブに出現する種類（5 = Tank, 10 = Sprayer, 15 = Tank ...）
    pub fn for_wave(wave: u32) -> Self {
        if (wave / BOSS_WAVE_INTERVAL) % 2 == 1 {
            Self::Tank
        } else {
            Self::Sprayer
        }
    }
}

/// 突進の連続回数
pub const DASH_SEQUENCE_LEN: u32 = 3;
/// 狙撃ビームの連続回数
pub const BEAM_SEQUENCE_LEN: u32 = 5;

/// ボスの攻撃ステート
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BossState {
    Spawning,
    Chasing,
    Cooldown,
    BurstAttack,
    Telegraphing,
    Dashing,
    Bombing,
    SpiralAttack,
    ConeAttack,
    MineLayer,
    FireBeam,
}

impl BossState {
    /// 状態の持続時間（秒）
    pub fn duration(&self, kind: BossKind) -> f32 {
        match self {
            Self::Spawning     => 2.0,
            Self::Chasing      => 6.0,
            Self::Cooldown     => 1.5,
            Self::BurstAttack  => 3.0,
            Self::Telegraphing => match kind {
                BossKind::Tank    => 0.8,
                BossKind::Sprayer => 0.6,
            },
            Self::Dashing      => 0.5,
            Self::Bombing      => 3.0,
            Self::SpiralAttack => 5.0,
            Self::ConeAttack   => 3.0,
            Self::MineLayer    => 4.0,
            Self::FireBeam     => 0.3,
        }
    }

    pub fn is_attack(&self) -> bool {
        !matches!(self, Self::Spawning | Self::Chasing | Self::Cooldown)
    }
}

/// ボスごとのステートマシン状態
#[derive(Clone, Debug)]
pub struct BossMachine {
    pub state:          BossState,
    /// 現在の状態の残り時間
    pub timer:          f32,
    /// 状態内の連射間隔タイマー（0 以下で発射）
    pub sub_timer:      f32,
    /// 次に選ぶ攻撃（種類のレパートリー内で巡回）
    pub attack_index:   u32,
    /// 連続攻撃の残り回数
    pub attack_counter: u32,
    /// 螺旋攻撃の角度（インスタンスごと）
    pub attack_angle:   f32,
    /// 予告攻撃の狙い。ゼロベクトルなら未確定
    pub target_dir:     Vec2,
}

impl BossMachine {
    pub fn new(kind: BossKind) -> Self {
        let mut m = Self {
            state:          BossState::Spawning,
            timer:          0.0,
            sub_timer:      0.0,
            attack_index:   0,
            attack_counter: 0,
            attack_angle:   0.0,
            target_dir:     Vec2::ZERO,
        };
        m.enter(BossState::Spawning, kind);
        m
    }

    pub fn enter(&mut self, state: BossState, kind: BossKind) {
        self.state = state;
        self.timer = state.duration(kind);
        self.sub_timer = 0.0;
        if state == BossState::Telegraphing {
            self.target_dir = Vec2::ZERO;
        }
    }

    /// 状態タイマーを進める。満了した場合は遷移し、新しい状態を返す。
    pub fn tick(&mut self, kind: BossKind, dt: f32) -> Option<BossState> {
        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }
        let next = self.next_state(kind);
        self.enter(next, kind);
        Some(next)
    }

    fn next_state(&mut self, kind: BossKind) -> BossState {
        match self.state {
            BossState::Spawning => BossState::Chasing,
            BossState::Chasing => self.next_attack(kind),
            BossState::Telegraphing => match kind {
                BossKind::Tank    => BossState::Dashing,
                BossKind::Sprayer => BossState::FireBeam,
            },
            BossState::Dashing | BossState::FireBeam => {
                self.attack_counter = self.attack_counter.saturating_sub(1);
                if self.attack_counter > 0 {
                    BossState::Telegraphing
                } else {
                    BossState::Cooldown
                }
            }
            BossState::Cooldown => BossState::Chasing,
            BossState::BurstAttack
            | BossState::Bombing
            | BossState::SpiralAttack
            | BossState::ConeAttack
            | BossState::MineLayer => BossState::Cooldown,
        }
    }

    fn next_attack(&mut self, kind: BossKind) -> BossState {
        let idx = self.attack_index;
        self.attack_index = self.attack_index.wrapping_add(1);
        match kind {
            BossKind::Tank => match idx % 3 {
                0 => BossState::BurstAttack,
                1 => {
                    self.attack_counter = DASH_SEQUENCE_LEN;
                    BossState::Telegraphing
                }
                _ => BossState::Bombing,
            },
            BossKind::Sprayer => match idx % 4 {
                0 => BossState::SpiralAttack,
                1 => BossState::ConeAttack,
                2 => BossState::MineLayer,
                _ => {
                    self.attack_counter = BEAM_SEQUENCE_LEN;
                    BossState::Telegraphing
                }
            },
        }
    }

    /// 予告中の狙いを確定する。状態に入ってから最初の呼び出しだけが書き込む。
    pub fn capture_target(&mut self, dir: Vec2) -> bool {
        if self.target_dir.length_squared() < 1e-4 {
            self.target_dir = dir.normalize_or_zero();
            true
        } else {
            false
        }
    }

    /// 連射タイマー。`interval` ごとに true を返す（状態に入った直後の 1 回目は即発射）
    pub fn fire_ready(&mut self, dt: f32, interval: f32) -> bool {
        self.sub_timer -= dt;
        if self.sub_timer <= 0.0 {
            self.sub_timer = interval;
            true
        } else {
            false
        }
    }
}
