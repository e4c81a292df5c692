//! Path: native/game_sim/src/world/spawn.rs
//! Summary: 種類ごとのエンティティ生成（モジュール構成・寿命・型別リストへの登録）

use super::boss::Boss;
use super::effect::{DelayedExplosion, FloatingText};
use super::enemy::Enemy;
use super::entity::{Body, Entity, EntityId};
use super::game_world::GameWorld;
use super::module::{
    AnimatedRenderer, CircleCollider, Module, PhysicsIntegrator, ShapeRenderer, RENDER_PRIORITY,
};
use super::orb::ExperienceOrb;
use super::particle::ParticlePool;
use super::player::PlayerBody;
use super::projectile::{Projectile, ProjectileSpec};
use game_core::boss::BossKind;
use game_core::constants::{
    EFFECT_PARTICLE_CAPACITY, ORB_LIFETIME, ORB_RADIUS, PLAYER_RADIUS, PROJECTILE_LIFETIME,
};
use game_core::enemy::EnemyKind;
use game_core::entity_params::{BossParams, EnemyParams};
use game_core::player::PlayerStats;
use glam::Vec2;

const PLAYER_COLOR: [f32; 4] = [0.3, 0.9, 1.0, 1.0];
const ORB_COLOR:    [f32; 4] = [0.3, 1.0, 0.4, 1.0];
const RING_LIFETIME: f32 = 0.3;
const FLOATING_TEXT_LIFETIME: f32 = 1.0;

impl GameWorld {
    /// パーティクルプールだけを持つ演出用エンティティ
    pub(crate) fn spawn_effects(&mut self) -> EntityId {
        let seed = self.rng.next_u32() as u64;
        let pool = ParticlePool::new(EFFECT_PARTICLE_CAPACITY, seed);
        self.add(Entity::new(Body::Effect, Vec2::ZERO).with_module(Module::Particles(pool)))
    }

    pub fn spawn_player(&mut self, position: Vec2, stats: PlayerStats) -> EntityId {
        let mut sprite = AnimatedRenderer::new("player", Vec2::splat(PLAYER_RADIUS * 2.0), 8.0)
            .with_animation("idle", vec![0])
            .with_animation("run", vec![1, 2, 3, 4]);
        sprite.color = PLAYER_COLOR;
        let entity = Entity::new(Body::Player(PlayerBody::new(stats)), position)
            .with_module(Module::Physics(PhysicsIntegrator::new(1.0)))
            .with_module(Module::Collider(CircleCollider::new(PLAYER_RADIUS)))
            .with_module(Module::Animated(sprite));
        self.add(entity)
    }

    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec2, wave: u32) -> EntityId {
        let p = EnemyParams::get(kind);
        let frames: Vec<u16> = (0..p.frame_count as u16).collect();
        let mut sprite = AnimatedRenderer::new(kind.name(), Vec2::splat(p.radius * 2.0), p.anim_fps)
            .with_animation("walk", frames);
        sprite.color = p.color;
        let entity = Entity::new(Body::Enemy(Enemy::new(kind, wave)), position)
            .with_module(Module::Physics(PhysicsIntegrator::new(1.0)))
            .with_module(Module::Collider(CircleCollider::new(p.radius)))
            .with_module(Module::Animated(sprite));
        self.add(entity)
    }

    pub fn spawn_boss(&mut self, kind: BossKind, position: Vec2, wave: u32) -> EntityId {
        let p = BossParams::get(kind);
        let sides = match kind {
            BossKind::Tank    => 8,
            BossKind::Sprayer => 6,
        };
        let entity = Entity::new(Body::Boss(Boss::new(kind, wave)), position)
            .with_module(Module::Physics(PhysicsIntegrator::new(5.0)))
            .with_module(Module::Collider(CircleCollider::new(p.radius)))
            .with_module(Module::Renderer(ShapeRenderer::polygon(p.radius, sides, p.color, true)));
        self.add(entity)
    }

    pub fn spawn_projectile(&mut self, spec: ProjectileSpec) -> EntityId {
        let mut phys = PhysicsIntegrator::new(1.0).with_velocity(spec.velocity());
        phys.max_speed = phys.max_speed.max(spec.speed);
        let entity = Entity::new(Body::Projectile(Projectile::from_spec(&spec)), spec.position)
            .with_lifetime(PROJECTILE_LIFETIME)
            .with_module(Module::Physics(phys))
            .with_module(Module::Collider(CircleCollider::new(spec.radius)))
            .with_module(Module::Renderer(ShapeRenderer::polygon(spec.radius * 0.6, 6, spec.color, true)));
        self.add(entity)
    }

    /// 少しだけ漂う初速を付けて経験値オーブを置く
    pub fn spawn_orb(&mut self, position: Vec2, value: f32) -> EntityId {
        let drift = self.rng.unit_vec() * self.rng.range(20.0, 60.0);
        let entity = Entity::new(Body::Orb(ExperienceOrb::new(value)), position)
            .with_lifetime(ORB_LIFETIME)
            .with_module(Module::Physics(PhysicsIntegrator::new(1.0).with_velocity(drift)))
            .with_module(Module::Collider(CircleCollider::new(ORB_RADIUS)))
            .with_module(Module::Renderer(ShapeRenderer::polygon(ORB_RADIUS * 0.75, 4, ORB_COLOR, true)));
        self.add(entity)
    }

    pub fn spawn_delayed_explosion(&mut self, position: Vec2, delay: f32, radius: f32, damage: f32) -> EntityId {
        let ring = ShapeRenderer::polygon(radius, 24, [1.0, 0.3, 0.1, 0.6], false)
            .with_priority(RENDER_PRIORITY - 10);
        let entity = Entity::new(Body::DelayedExplosion(DelayedExplosion::new(delay, radius, damage)), position)
            .with_module(Module::Renderer(ring));
        self.add(entity)
    }

    pub fn spawn_floating_text(&mut self, position: Vec2, text: &str, color: [f32; 4]) -> EntityId {
        let entity = Entity::new(
            Body::FloatingText(FloatingText::new(text, color, FLOATING_TEXT_LIFETIME)),
            position,
        )
        .with_lifetime(FLOATING_TEXT_LIFETIME);
        self.add(entity)
    }

    /// 爆発範囲を示す短命のリング
    pub fn spawn_ring(&mut self, position: Vec2, radius: f32, color: [f32; 4]) -> EntityId {
        let entity = Entity::new(Body::Effect, position)
            .with_lifetime(RING_LIFETIME)
            .with_module(Module::Renderer(ShapeRenderer::polygon(radius, 32, color, false)));
        self.add(entity)
    }
}
