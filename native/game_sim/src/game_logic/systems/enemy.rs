use super::UpdateOutcome;
use crate::game_logic::chase_ai::chase_velocity;
use crate::world::{Body, Enemy, Entity, GameWorld, ProjectileSpec};
use game_core::constants::{CONTACT_REACH, ENEMY_MUZZLE_GAP, PLAYER_RADIUS};
use game_core::enemy::EnemyKind;
use game_core::util::clamp_to_world;
use glam::Vec2;

/// Shooter が詰めるのをやめる距離
const SHOOTER_HOLD_RANGE: f32 = 250.0;
/// 接触ダメージは毎秒 contact_dps のこの割合
const CONTACT_SCALE: f32 = 0.5;

pub(crate) fn update_enemy(w: &mut GameWorld, e: &mut Entity, dt: f32) -> UpdateOutcome {
    let parts = e.parts_mut();
    let Body::Enemy(en) = parts.body else { return UpdateOutcome::Alive };
    // 死亡処理は被弾側で済んでいる。取りこぼしだけ拾う
    if en.health <= 0.0 {
        return UpdateOutcome::Destroy;
    }
    let pos = parts.transform.position;
    let Some(target) = w.player_position() else {
        parts.modules.set_velocity(Vec2::ZERO);
        return UpdateOutcome::Alive;
    };

    let to_player = target - pos;
    let dist = to_player.length();
    if to_player != Vec2::ZERO {
        en.facing = to_player / dist.max(f32::EPSILON);
    }
    let holding = en.kind == EnemyKind::Shooter && dist <= SHOOTER_HOLD_RANGE;
    let velocity = if holding { Vec2::ZERO } else { chase_velocity(pos, target, en.speed) };
    parts.modules.set_velocity(velocity);

    contact_damage(w, en, dist, dt);

    if let Some(shot) = en.tick_shot(dt) {
        let origin = pos + en.facing * (en.radius + ENEMY_MUZZLE_GAP);
        w.spawn_projectile(ProjectileSpec::enemy(origin, en.facing, shot.projectile_speed, shot.damage));
    }

    parts.transform.position = clamp_to_world(pos);
    UpdateOutcome::Alive
}

/// 距離で判定する継続ダメージ。ボスも中核の Enemy でここを通る
pub(crate) fn contact_damage(w: &mut GameWorld, en: &Enemy, dist: f32, dt: f32) {
    if dist > en.radius + PLAYER_RADIUS + CONTACT_REACH {
        return;
    }
    let dealt = w.damage_player(en.contact_dps * CONTACT_SCALE * dt);
    if dealt > 0.0 {
        w.shake(3.0, 0.1);
    }
}
