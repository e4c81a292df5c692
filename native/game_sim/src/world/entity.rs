//! Path: native/game_sim/src/world/entity.rs
//! Summary: エンティティ本体（ID・状態・Transform・モジュール列・寿命・種類別データ）
//!
//! エンティティ同士は強参照を持たず、EntityId で GameWorld から引き直す。

use super::boss::Boss;
use super::combat::Combatant;
use super::effect::{DelayedExplosion, FloatingText};
use super::enemy::Enemy;
use super::module::{Module, ModuleList};
use super::orb::ExperienceOrb;
use super::player::PlayerBody;
use super::projectile::Projectile;
use glam::Vec2;

/// スロット番号 + 世代。解放済みスロットを指す古い ID は解決されない。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EntityId {
    pub(crate) index:      u32,
    pub(crate) generation: u32,
}

impl EntityId {
    /// 登録前のプレースホルダ
    pub(crate) const DETACHED: EntityId = EntityId { index: u32::MAX, generation: 0 };
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntityState {
    Active,
    Paused,
    /// 終端状態。一度入ったら戻らない
    Destroy,
}

/// 型別リストへの振り分けに使う種類タグ
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EntityKind {
    Effect,
    Player,
    Enemy,
    Boss,
    Projectile,
    Orb,
    DelayedExplosion,
    FloatingText,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f32,
    pub scale:    f32,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self { position, rotation: 0.0, scale: 1.0 }
    }
}

/// 種類別データ
pub enum Body {
    /// モジュールだけを持つ演出用エンティティ（パーティクル・爆発リングなど）
    Effect,
    Player(PlayerBody),
    Enemy(Enemy),
    Boss(Boss),
    Projectile(Projectile),
    Orb(ExperienceOrb),
    DelayedExplosion(DelayedExplosion),
    FloatingText(FloatingText),
}

impl Body {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Effect              => EntityKind::Effect,
            Self::Player(_)           => EntityKind::Player,
            Self::Enemy(_)            => EntityKind::Enemy,
            Self::Boss(_)             => EntityKind::Boss,
            Self::Projectile(_)       => EntityKind::Projectile,
            Self::Orb(_)              => EntityKind::Orb,
            Self::DelayedExplosion(_) => EntityKind::DelayedExplosion,
            Self::FloatingText(_)     => EntityKind::FloatingText,
        }
    }

    /// HP を持つもの（プレイヤー・敵・ボス）
    pub fn combatant(&self) -> Option<&dyn Combatant> {
        match self {
            Self::Player(p) => Some(p),
            Self::Enemy(e)  => Some(e),
            Self::Boss(b)   => Some(b),
            _ => None,
        }
    }

    pub fn combatant_mut(&mut self) -> Option<&mut dyn Combatant> {
        match self {
            Self::Player(p) => Some(p),
            Self::Enemy(e)  => Some(e),
            Self::Boss(b)   => Some(b),
            _ => None,
        }
    }

    /// 敵として扱えるもの（ボスは中核の Enemy を返す）
    pub fn as_enemy(&self) -> Option<&Enemy> {
        match self {
            Self::Enemy(e) => Some(e),
            Self::Boss(b)  => Some(&b.core),
            _ => None,
        }
    }

    pub fn as_player(&self) -> Option<&PlayerBody> {
        match self {
            Self::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerBody> {
        match self {
            Self::Player(p) => Some(p),
            _ => None,
        }
    }
}

/// 更新中に本体・Transform・モジュールを同時に借用するための分割ビュー
pub struct EntityParts<'a> {
    pub id:        EntityId,
    pub transform: &'a mut Transform,
    pub modules:   &'a mut ModuleList,
    pub body:      &'a mut Body,
}

pub struct Entity {
    id:            EntityId,
    pub transform: Transform,
    state:         EntityState,
    pub modules:   ModuleList,
    /// 残り寿命（秒）。None なら無期限
    lifetime:      Option<f32>,
    pub body:      Body,
}

impl Entity {
    pub fn new(body: Body, position: Vec2) -> Self {
        Self {
            id:        EntityId::DETACHED,
            transform: Transform::at(position),
            state:     EntityState::Active,
            modules:   ModuleList::default(),
            lifetime:  None,
            body,
        }
    }

    pub fn with_lifetime(mut self, secs: f32) -> Self {
        self.lifetime = Some(secs);
        self
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.attach(module);
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn kind(&self) -> EntityKind {
        self.body.kind()
    }

    pub fn attach(&mut self, module: Module) {
        self.modules.attach(module);
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    /// Destroy からは戻らない
    pub fn set_state(&mut self, state: EntityState) {
        if self.state != EntityState::Destroy {
            self.state = state;
        }
    }

    pub fn destroy(&mut self) {
        self.state = EntityState::Destroy;
    }

    pub fn is_active(&self) -> bool {
        self.state == EntityState::Active
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == EntityState::Destroy
    }

    pub fn lifetime(&self) -> Option<f32> {
        self.lifetime
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// 当たり判定の半径（コライダーがなければ 0）
    pub fn radius(&self) -> f32 {
        self.modules.collider().map(|c| c.radius).unwrap_or(0.0)
    }

    /// 両者がコライダーを持ち、円が重なっているか
    pub fn intersects(&self, other: &Entity) -> bool {
        match (self.modules.collider(), other.modules.collider()) {
            (Some(a), Some(b)) => a.intersect(self.position(), b, other.position()),
            _ => false,
        }
    }

    /// 寿命を進める。尽きたら Destroy にして false を返す。
    pub(crate) fn tick_lifetime(&mut self, dt: f32) -> bool {
        if let Some(remaining) = self.lifetime.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.destroy();
                return false;
            }
        }
        true
    }

    pub(crate) fn update_modules(&mut self, dt: f32) {
        self.modules.update(&mut self.transform, dt);
    }

    pub fn parts_mut(&mut self) -> EntityParts<'_> {
        EntityParts {
            id:        self.id,
            transform: &mut self.transform,
            modules:   &mut self.modules,
            body:      &mut self.body,
        }
    }
}
