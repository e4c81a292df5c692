//! Path: native/game_core/src/player.rs
//! Summary: プレイヤーのステータス（HP・強化倍率・武器モード・経験値とレベル）

use crate::constants::{
    PLAYER_CRIT_MULTIPLIER, PLAYER_LIFESTEAL, PLAYER_MAX_HEALTH, PLAYER_MOVE_SPEED,
    PLAYER_ORBITALS, PLAYER_PROJECTILES, PLAYER_REGEN_RATE, BASE_ATTACK_COOLDOWN,
};
use crate::physics::rng::SimpleRng;
use crate::util::exp_required_for_next;

/// プレイヤーのステータス一式
///
/// 強化（Upgrade）はすべてこの構造体を書き換える。
#[derive(Clone, Debug)]
pub struct PlayerStats {
    pub health:            f32,
    pub max_health:        f32,
    pub move_speed:        f32,

    pub damage_mult:       f32,
    pub attack_speed_mult: f32,
    pub projectile_count:  u32,
    /// 貫通回数（0 = 最初の命中で消滅）
    pub pierce:            u32,
    pub crit_chance:       f32,
    pub crit_mult:         f32,
    pub lifesteal:         bool,
    pub lifesteal_pct:     f32,
    pub regen:             bool,
    pub regen_rate:        f32,
    pub exp_mult:          f32,

    // 武器モード
    pub shotgun:           bool,
    pub spiral:            bool,
    pub orbital:           bool,
    pub orbital_count:     u32,
    pub reverse:           bool,
    pub homing:            bool,
    pub explosive:         bool,
    pub dash:              bool,

    pub level:             u32,
    pub experience:        f32,
    pub exp_to_next:       f32,
    /// 未消化のレベルアップ報酬数
    pub pending_upgrades:  u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health:            PLAYER_MAX_HEALTH,
            max_health:        PLAYER_MAX_HEALTH,
            move_speed:        PLAYER_MOVE_SPEED,
            damage_mult:       1.0,
            attack_speed_mult: 1.0,
            projectile_count:  PLAYER_PROJECTILES,
            pierce:            0,
            crit_chance:       0.0,
            crit_mult:         PLAYER_CRIT_MULTIPLIER,
            lifesteal:         false,
            lifesteal_pct:     PLAYER_LIFESTEAL,
            regen:             false,
            regen_rate:        PLAYER_REGEN_RATE,
            exp_mult:          1.0,
            shotgun:           false,
            spiral:            false,
            orbital:           false,
            orbital_count:     PLAYER_ORBITALS,
            reverse:           false,
            homing:            false,
            explosive:         false,
            dash:              false,
            level:             1,
            experience:        0.0,
            exp_to_next:       exp_required_for_next(1),
            pending_upgrades:  0,
        }
    }
}

impl PlayerStats {
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount.max(0.0)).min(self.max_health);
    }

    /// 与えたダメージに応じた吸血量（無効なら 0）
    pub fn lifesteal_amount(&self, dealt: f32) -> f32 {
        if self.lifesteal {
            dealt * self.lifesteal_pct
        } else {
            0.0
        }
    }

    pub fn regenerate(&mut self, dt: f32) {
        if self.regen && self.health > 0.0 {
            self.heal(self.regen_rate * dt);
        }
    }

    /// 自動攻撃の間隔（秒）
    pub fn attack_cooldown(&self) -> f32 {
        BASE_ATTACK_COOLDOWN / self.attack_speed_mult.max(0.01)
    }

    /// 基礎ダメージに倍率とクリティカルを掛ける。(damage, is_crit)
    pub fn roll_damage(&self, base: f32, rng: &mut SimpleRng) -> (f32, bool) {
        let dmg = base * self.damage_mult;
        if self.crit_chance > 0.0 && rng.chance(self.crit_chance) {
            (dmg * self.crit_mult, true)
        } else {
            (dmg, false)
        }
    }

    /// 経験値を加算し、上がったレベル数を返す。
    /// レベルが上がるたびに pending_upgrades が 1 増える。
    pub fn add_experience(&mut self, amount: f32) -> u32 {
        self.experience += amount * self.exp_mult;
        let mut gained = 0;
        while self.experience >= self.exp_to_next {
            self.experience -= self.exp_to_next;
            self.level += 1;
            self.exp_to_next = exp_required_for_next(self.level);
            self.pending_upgrades += 1;
            gained += 1;
        }
        gained
    }

    pub fn consume_pending_upgrade(&mut self) {
        self.pending_upgrades = self.pending_upgrades.saturating_sub(1);
    }
}
