//! Path: native/game_sim/src/world/projectile.rs
//! Summary: 弾（陣営・ダメージ・貫通・ホーミング・爆発・命中済み集合）と生成パラメータ

use super::entity::EntityId;
use game_core::constants::{BASE_SHOT_SPEED, PROJECTILE_RADIUS};
use glam::Vec2;
use rustc_hash::FxHashSet;

/// 誰が撃った弾か
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Faction {
    Player,
    Enemy,
}

/// 弾の生成パラメータ。修飾子は使わないときも既定値で必ず埋める。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSpec {
    pub faction:   Faction,
    pub position:  Vec2,
    pub direction: Vec2,
    pub speed:     f32,
    pub damage:    f32,
    pub pierce:    u32,
    pub homing:    bool,
    pub explosive: bool,
    pub crit:      bool,
    pub radius:    f32,
    pub color:     [f32; 4],
}

impl ProjectileSpec {
    pub fn player(position: Vec2, direction: Vec2, speed: f32, damage: f32) -> Self {
        Self {
            faction:   Faction::Player,
            position,
            direction: direction.normalize_or(Vec2::X),
            speed,
            damage,
            pierce:    0,
            homing:    false,
            explosive: false,
            crit:      false,
            radius:    PROJECTILE_RADIUS,
            color:     [1.0, 0.9, 0.3, 1.0],
        }
    }

    pub fn enemy(position: Vec2, direction: Vec2, speed: f32, damage: f32) -> Self {
        Self {
            faction: Faction::Enemy,
            color:   [1.0, 0.3, 0.3, 1.0],
            ..Self::player(position, direction, speed, damage)
        }
    }

    pub fn with_pierce(mut self, pierce: u32) -> Self {
        self.pierce = pierce;
        self
    }

    pub fn with_homing(mut self, homing: bool) -> Self {
        self.homing = homing;
        self
    }

    pub fn with_explosive(mut self, explosive: bool) -> Self {
        self.explosive = explosive;
        self
    }

    pub fn with_crit(mut self, crit: bool) -> Self {
        self.crit = crit;
        if crit {
            self.color = [1.0, 0.5, 0.1, 1.0];
        }
        self
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self::player(Vec2::ZERO, Vec2::X, BASE_SHOT_SPEED, 0.0)
    }
}

pub struct Projectile {
    pub faction:   Faction,
    pub damage:    f32,
    /// 残り貫通回数
    pub pierce:    u32,
    pub homing:    bool,
    pub explosive: bool,
    pub crit:      bool,
    pub speed:     f32,
    /// 同じ敵へ二度当たらないための命中済み集合
    hit_set:       FxHashSet<EntityId>,
}

impl Projectile {
    pub fn from_spec(spec: &ProjectileSpec) -> Self {
        Self {
            faction:   spec.faction,
            damage:    spec.damage,
            pierce:    spec.pierce,
            homing:    spec.homing,
            explosive: spec.explosive,
            crit:      spec.crit,
            speed:     spec.speed,
            hit_set:   FxHashSet::default(),
        }
    }

    pub fn has_hit(&self, id: EntityId) -> bool {
        self.hit_set.contains(&id)
    }

    /// 命中を記録する。初めての相手なら true
    pub fn record_hit(&mut self, id: EntityId) -> bool {
        self.hit_set.insert(id)
    }

    pub fn hit_count(&self) -> usize {
        self.hit_set.len()
    }

    /// 貫通を 1 回消費する。残りがなければ false（弾は消える）
    pub fn consume_pierce(&mut self) -> bool {
        if self.pierce > 0 {
            self.pierce -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> EntityId {
        EntityId { index, generation: 0 }
    }

    #[test]
    fn hit_set_rejects_repeats() {
        let mut p = Projectile::from_spec(&ProjectileSpec::player(Vec2::ZERO, Vec2::X, 800.0, 20.0));
        assert!(p.record_hit(id(1)));
        assert!(!p.record_hit(id(1)));
        assert!(p.has_hit(id(1)));
        assert!(!p.has_hit(id(2)));
        assert_eq!(p.hit_count(), 1);
    }

    #[test]
    fn pierce_runs_out() {
        let spec = ProjectileSpec::player(Vec2::ZERO, Vec2::X, 800.0, 20.0).with_pierce(2);
        let mut p = Projectile::from_spec(&spec);
        assert!(p.consume_pierce());
        assert!(p.consume_pierce());
        assert!(!p.consume_pierce());
    }

    #[test]
    fn spec_normalizes_direction() {
        let spec = ProjectileSpec::enemy(Vec2::ZERO, Vec2::new(3.0, 4.0), 100.0, 5.0);
        assert_eq!(spec.faction, Faction::Enemy);
        assert!((spec.velocity().length() - 100.0).abs() < 0.001);
        // 長さ 0 の向きは +X に倒す
        let spec = ProjectileSpec::player(Vec2::ZERO, Vec2::ZERO, 10.0, 1.0);
        assert!((spec.direction.x - 1.0).abs() < 0.001);
    }
}
