//! Path: native/game_sim/src/world/mod.rs
//! Summary: ワールド型（エンティティ・モジュール・種類別データ・登録簿・カメラ・GameWorld）

mod boss;
mod camera;
mod combat;
mod effect;
mod enemy;
mod entity;
mod frame_event;
mod game_world;
mod module;
mod orb;
mod particle;
mod player;
mod projectile;
mod registry;
mod spawn;

pub use boss::Boss;
pub use camera::Camera;
pub use combat::{Combatant, DeathEffect};
pub use effect::{DelayedExplosion, FloatingText};
pub use enemy::Enemy;
pub use entity::{Body, Entity, EntityId, EntityKind, EntityParts, EntityState, Transform};
pub use frame_event::FrameEvent;
pub use game_world::{world_center, GamePhase, GameWorld};
pub use module::{
    regular_polygon, AnimatedRenderer, CircleCollider, Module, ModuleList, PhysicsIntegrator,
    ShapeRenderer, ANIMATION_PRIORITY, COLLIDER_PRIORITY, PARTICLE_PRIORITY, PHYSICS_PRIORITY,
    RENDER_PRIORITY,
};
pub use orb::ExperienceOrb;
pub use particle::{ParticlePool, ParticleView};
pub use player::PlayerBody;
pub use projectile::{Faction, Projectile, ProjectileSpec};
pub use registry::EntityRegistry;
