//! Path: native/game_sim/src/world/enemy.rs
//! Summary: 敵本体（種類・HP・接触ダメージ・遠隔攻撃タイマー）と Combatant 実装

use super::combat::{apply_damage, Combatant, DeathEffect};
use game_core::enemy::EnemyKind;
use game_core::entity_params::{EnemyParams, ExplosionParams, RangedParams};
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind:        EnemyKind,
    pub health:      f32,
    pub max_health:  f32,
    pub speed:       f32,
    pub radius:      f32,
    /// 接触中に毎秒与えるダメージ
    pub contact_dps: f32,
    pub exp_reward:  u32,
    pub explosion:   Option<ExplosionParams>,
    pub ranged:      Option<RangedParams>,
    pub shoot_timer: f32,
    pub color:       [f32; 4],
    pub facing:      Vec2,
}

impl Enemy {
    /// ウェーブに応じて HP と速度を上乗せした敵を作る
    pub fn new(kind: EnemyKind, wave: u32) -> Self {
        let p = EnemyParams::get(kind);
        let health = p.scaled_health(wave);
        Self {
            kind,
            health,
            max_health:  health,
            speed:       p.scaled_speed(wave),
            radius:      p.radius,
            contact_dps: p.contact_dps,
            exp_reward:  p.exp_reward,
            explosion:   p.explosion,
            ranged:      p.ranged,
            shoot_timer: p.ranged.map(|r| r.cooldown).unwrap_or(0.0),
            color:       p.color,
            facing:      Vec2::X,
        }
    }

    /// 遠隔攻撃タイマーを進め、撃つフレームならそのパラメータを返す
    pub fn tick_shot(&mut self, dt: f32) -> Option<RangedParams> {
        let ranged = self.ranged?;
        self.shoot_timer -= dt;
        if self.shoot_timer <= 0.0 {
            self.shoot_timer += ranged.cooldown;
            Some(ranged)
        } else {
            None
        }
    }
}

impl Combatant for Enemy {
    fn health(&self) -> f32 {
        self.health
    }

    fn max_health(&self) -> f32 {
        self.max_health
    }

    fn take_damage(&mut self, amount: f32) -> f32 {
        apply_damage(&mut self.health, amount)
    }

    fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount.max(0.0)).min(self.max_health);
    }

    fn on_death(&self, position: Vec2) -> DeathEffect {
        DeathEffect::Enemy {
            kind:       self.kind,
            position,
            exp_reward: self.exp_reward,
            explosion:  self.explosion,
            color:      self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_scaling_applies() {
        let w1 = Enemy::new(EnemyKind::Grunt, 1);
        let w3 = Enemy::new(EnemyKind::Grunt, 3);
        assert!(w3.max_health > w1.max_health);
        assert!(w3.speed > w1.speed);
        assert!((w1.health - w1.max_health).abs() < 0.001);
    }

    #[test]
    fn exploder_death_carries_explosion() {
        let e = Enemy::new(EnemyKind::Exploder, 1);
        match e.on_death(Vec2::new(3.0, 4.0)) {
            DeathEffect::Enemy { explosion, position, .. } => {
                assert!(explosion.is_some());
                assert!((position.x - 3.0).abs() < 0.001);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn melee_never_shoots() {
        let mut e = Enemy::new(EnemyKind::Grunt, 1);
        for _ in 0..100 {
            assert!(e.tick_shot(0.1).is_none());
        }
    }

    #[test]
    fn shooter_fires_on_cooldown() {
        let mut e = Enemy::new(EnemyKind::Shooter, 1);
        let cd = e.ranged.map(|r| r.cooldown).unwrap_or(0.0);
        assert!(e.tick_shot(cd * 0.5).is_none());
        assert!(e.tick_shot(cd * 0.6).is_some());
        assert!(e.tick_shot(0.01).is_none());
    }
}
