//! Path: native/game_core/src/enemy.rs
//! Summary: 敵の種類と種類ごとの振る舞いフラグ

use crate::entity_params::EnemyParams;

/// 敵の種類
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum EnemyKind {
    /// 標準的な追跡型
    #[default]
    Grunt    = 0,
    /// 低 HP・高速
    Runner   = 1,
    /// 死亡時に周囲へ爆発ダメージ
    Exploder = 2,
    /// 距離を取って弾を撃つ
    Shooter  = 3,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [Self::Grunt, Self::Runner, Self::Exploder, Self::Shooter];

    pub fn from_u8(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Grunt),
            1 => Some(Self::Runner),
            2 => Some(Self::Exploder),
            3 => Some(Self::Shooter),
            _ => None,
        }
    }

    pub fn params(&self) -> &'static EnemyParams {
        EnemyParams::get(*self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grunt    => "grunt",
            Self::Runner   => "runner",
            Self::Exploder => "exploder",
            Self::Shooter  => "shooter",
        }
    }

    pub fn explodes_on_death(&self) -> bool {
        self.params().explosion.is_some()
    }

    pub fn is_ranged(&self) -> bool {
        self.params().ranged.is_some()
    }
}
