//! Path: native/game_sim/src/world/player.rs
//! Summary: プレイヤー本体（能力値・攻撃タイマー・ダッシュ状態）と Combatant 実装

use super::combat::{apply_damage, Combatant, DeathEffect};
use game_core::player::PlayerStats;
use glam::Vec2;

pub struct PlayerBody {
    pub stats:         PlayerStats,
    /// 次の自動攻撃までの残り時間
    pub attack_timer:  f32,
    pub spiral_angle:  f32,
    pub orbital_angle: f32,
    pub orbital_timer: f32,
    /// ダッシュ中の残り時間（0 ならダッシュしていない）
    pub dash_timer:    f32,
    pub dash_cooldown: f32,
    pub dash_dir:      Vec2,
    /// 最後に移動した向き（入力なしのダッシュ方向）
    pub facing:        Vec2,
}

impl PlayerBody {
    pub fn new(stats: PlayerStats) -> Self {
        Self {
            stats,
            attack_timer:  0.0,
            spiral_angle:  0.0,
            orbital_angle: 0.0,
            orbital_timer: 0.0,
            dash_timer:    0.0,
            dash_cooldown: 0.0,
            dash_dir:      Vec2::X,
            facing:        Vec2::X,
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0.0
    }
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self::new(PlayerStats::default())
    }
}

impl Combatant for PlayerBody {
    fn health(&self) -> f32 {
        self.stats.health
    }

    fn max_health(&self) -> f32 {
        self.stats.max_health
    }

    fn take_damage(&mut self, amount: f32) -> f32 {
        apply_damage(&mut self.stats.health, amount)
    }

    fn heal(&mut self, amount: f32) {
        self.stats.heal(amount);
    }

    fn on_death(&self, _position: Vec2) -> DeathEffect {
        DeathEffect::Player
    }
}
