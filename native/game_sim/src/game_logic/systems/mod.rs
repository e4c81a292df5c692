pub(crate) mod boss;
pub(crate) mod combat;
pub(crate) mod effects;
pub(crate) mod enemy;
pub(crate) mod explosion;
pub(crate) mod leveling;
pub(crate) mod orb;
pub(crate) mod player;
pub(crate) mod projectile;
pub(crate) mod spawn;

use crate::world::{Entity, EntityKind, GameWorld};

/// 種類別フックの結果。Destroy なら呼び出し側がエンティティを Destroy 状態にする
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum UpdateOutcome {
    Alive,
    Destroy,
}

/// 寿命・モジュール更新の後に呼ばれる種類別の更新フック
pub(crate) fn update_entity(w: &mut GameWorld, e: &mut Entity, dt: f32) {
    let outcome = match e.kind() {
        EntityKind::Player => player::update_player(w, e, dt),
        EntityKind::Enemy => enemy::update_enemy(w, e, dt),
        EntityKind::Boss => boss::update_boss(w, e, dt),
        EntityKind::Projectile => projectile::update_projectile(w, e, dt),
        EntityKind::Orb => orb::update_orb(w, e, dt),
        EntityKind::DelayedExplosion => effects::update_delayed_explosion(w, e, dt),
        EntityKind::FloatingText => effects::update_floating_text(e, dt),
        EntityKind::Effect => UpdateOutcome::Alive,
    };
    if outcome == UpdateOutcome::Destroy {
        e.destroy();
    }
}
