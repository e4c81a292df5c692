//! Path: native/game_sim/src/world/combat.rs
//! Summary: HP を持つエンティティ共通の能力インターフェース（体力・被ダメージ・死亡時効果）

use game_core::boss::BossKind;
use game_core::enemy::EnemyKind;
use game_core::entity_params::ExplosionParams;
use glam::Vec2;

/// 死亡時に Orchestrator が適用する効果
#[derive(Clone, Debug, PartialEq)]
pub enum DeathEffect {
    /// GameOver 遷移はフレーム末に判定する
    Player,
    Enemy {
        kind:       EnemyKind,
        position:   Vec2,
        exp_reward: u32,
        explosion:  Option<ExplosionParams>,
        color:      [f32; 4],
    },
    Boss {
        kind:       BossKind,
        position:   Vec2,
        exp_reward: u32,
        color:      [f32; 4],
    },
}

pub trait Combatant {
    fn health(&self) -> f32;

    fn max_health(&self) -> f32;

    /// HP を減らす（0 未満にはならない）。実際に減った量 = min(amount, 減る前の HP) を返す。
    fn take_damage(&mut self, amount: f32) -> f32;

    fn heal(&mut self, amount: f32);

    fn is_dead(&self) -> bool {
        self.health() <= 0.0
    }

    fn on_death(&self, position: Vec2) -> DeathEffect;
}

/// `health` を `amount` だけ減らして実際の減少量を返す共通実装
pub(crate) fn apply_damage(health: &mut f32, amount: f32) -> f32 {
    let before = *health;
    *health = (*health - amount.max(0.0)).max(0.0);
    before - *health
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_damage_returns_actual_amount() {
        let mut hp = 50.0;
        assert!((apply_damage(&mut hp, 20.0) - 20.0).abs() < 0.001);
        assert!((hp - 30.0).abs() < 0.001);
        assert!((apply_damage(&mut hp, 100.0) - 30.0).abs() < 0.001);
        assert!(hp.abs() < 0.001);
        assert!(apply_damage(&mut hp, 10.0).abs() < 0.001);
    }

    #[test]
    fn negative_damage_is_ignored() {
        let mut hp = 10.0;
        assert!(apply_damage(&mut hp, -5.0).abs() < 0.001);
        assert!((hp - 10.0).abs() < 0.001);
    }
}
