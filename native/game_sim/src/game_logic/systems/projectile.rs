use super::combat::damage_enemy;
use super::explosion::detonate;
use super::UpdateOutcome;
use crate::game_logic::chase_ai::find_nearest_enemy_excluding;
use crate::world::{Body, Entity, Faction, GameWorld, Projectile};
use game_core::constants::{
    EXPLOSION_RADIUS, HOMING_RANGE, HOMING_TURN_RATE, PROJECTILE_BOUNDS_MARGIN,
};
use game_core::physics::outside_bounds;
use game_core::util::world_size;
use glam::Vec2;

pub(crate) fn update_projectile(w: &mut GameWorld, e: &mut Entity, dt: f32) -> UpdateOutcome {
    let parts = e.parts_mut();
    let Body::Projectile(proj) = parts.body else { return UpdateOutcome::Alive };
    let pos = parts.transform.position;

    if outside_bounds(pos, world_size(), PROJECTILE_BOUNDS_MARGIN) {
        return UpdateOutcome::Destroy;
    }

    if proj.homing && proj.faction == Faction::Player {
        let target = find_nearest_enemy_excluding(w, pos, HOMING_RANGE, |id| proj.has_hit(id));
        if let Some((_, tp)) = target {
            let v = steer(parts.modules.velocity(), tp - pos, HOMING_TURN_RATE * dt, proj.speed);
            parts.modules.set_velocity(v);
        }
    }

    let Some(radius) = parts.modules.collider().map(|c| c.radius) else { return UpdateOutcome::Alive };
    match proj.faction {
        Faction::Player => hit_enemies(w, proj, pos, radius),
        Faction::Enemy => hit_player(w, proj, pos, radius),
    }
}

/// 自弾と敵の衝突。命中済みの敵は飛ばし、貫通が尽きたら消える
fn hit_enemies(w: &mut GameWorld, proj: &mut Projectile, pos: Vec2, radius: f32) -> UpdateOutcome {
    let ids = w.snapshot_enemies();
    let mut outcome = UpdateOutcome::Alive;
    for &id in &ids {
        if proj.has_hit(id) {
            continue;
        }
        let Some(enemy) = w.live_enemy(id) else { continue };
        let overlap = enemy
            .modules
            .collider()
            .map(|c| game_core::physics::circles_overlap(pos, radius, enemy.position(), c.radius))
            .unwrap_or(false);
        if !overlap {
            continue;
        }

        // 爆発弾は最初の命中点で炸裂して消える
        if proj.explosive {
            proj.record_hit(id);
            detonate(w, pos, EXPLOSION_RADIUS, proj.damage);
            outcome = UpdateOutcome::Destroy;
            break;
        }

        let dealt = damage_enemy(w, id, proj.damage);
        let heal = w.player().map(|p| p.stats.lifesteal_amount(dealt)).unwrap_or(0.0);
        if heal > 0.0 {
            w.heal_player(heal);
        }
        proj.record_hit(id);
        if !proj.consume_pierce() {
            outcome = UpdateOutcome::Destroy;
            break;
        }
    }
    w.recycle_query_buf(ids);
    outcome
}

/// 敵弾とプレイヤーの衝突
fn hit_player(w: &mut GameWorld, proj: &Projectile, pos: Vec2, radius: f32) -> UpdateOutcome {
    let Some(player) = w.player_id().and_then(|id| w.entity(id)) else { return UpdateOutcome::Alive };
    let hit = player
        .modules
        .collider()
        .map(|c| game_core::physics::circles_overlap(pos, radius, player.position(), c.radius))
        .unwrap_or(false);
    if !hit {
        return UpdateOutcome::Alive;
    }
    w.damage_player(proj.damage);
    UpdateOutcome::Destroy
}

/// `velocity` を `desired` の向きへ最大 `max_turn` ラジアン回し、速さ `speed` で返す
fn steer(velocity: Vec2, desired: Vec2, max_turn: f32, speed: f32) -> Vec2 {
    let current = velocity.normalize_or(Vec2::X);
    let Some(want) = desired.try_normalize() else { return current * speed };
    let delta = current.angle_to(want).clamp(-max_turn, max_turn);
    Vec2::from_angle(current.to_angle() + delta) * speed
}
