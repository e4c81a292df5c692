//! Path: native/game_sim/src/world/boss.rs
//! Summary: ボス本体（敵としての中核 + 行動ステートマシン）

use super::combat::{Combatant, DeathEffect};
use super::enemy::Enemy;
use game_core::boss::{BossKind, BossMachine};
use game_core::enemy::EnemyKind;
use game_core::entity_params::BossParams;
use glam::Vec2;

/// ボスは敵の一種として扱う。HP などの戦闘値は `core` が持つ。
pub struct Boss {
    pub kind:    BossKind,
    pub core:    Enemy,
    pub machine: BossMachine,
    pub wave:    u32,
}

impl Boss {
    pub fn new(kind: BossKind, wave: u32) -> Self {
        let p = BossParams::get(kind);
        let health = p.scaled_health(wave);
        // 中核の kind は描画・統計用の代表値で、挙動はステートマシンが決める
        let core = Enemy {
            kind:        EnemyKind::Grunt,
            health,
            max_health:  health,
            speed:       p.scaled_speed(wave),
            radius:      p.radius,
            contact_dps: p.contact_dps,
            exp_reward:  BossParams::exp_reward(wave),
            explosion:   None,
            ranged:      None,
            shoot_timer: 0.0,
            color:       p.color,
            facing:      Vec2::X,
        };
        Self { kind, core, machine: BossMachine::new(kind), wave }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl Combatant for Boss {
    fn health(&self) -> f32 {
        self.core.health
    }

    fn max_health(&self) -> f32 {
        self.core.max_health
    }

    fn take_damage(&mut self, amount: f32) -> f32 {
        self.core.take_damage(amount)
    }

    fn heal(&mut self, amount: f32) {
        self.core.heal(amount);
    }

    fn on_death(&self, position: Vec2) -> DeathEffect {
        DeathEffect::Boss {
            kind:       self.kind,
            position,
            exp_reward: self.core.exp_reward,
            color:      self.core.color,
        }
    }
}
