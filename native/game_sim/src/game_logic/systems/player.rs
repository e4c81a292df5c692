use super::UpdateOutcome;
use crate::game_logic::chase_ai::find_nearest_enemy;
use crate::world::{Body, Entity, GameWorld, PlayerBody, ProjectileSpec};
use game_core::constants::{
    BASE_SHOT_DAMAGE, BASE_SHOT_SPEED, FAN_SPREAD, MUZZLE_OFFSET, ORBITAL_ANGULAR_SPEED,
    ORBITAL_DAMAGE, ORBITAL_FIRE_INTERVAL, ORBITAL_RADIUS, PLAYER_DASH_COOLDOWN,
    PLAYER_DASH_DURATION, PLAYER_DASH_SPEED, PLAYER_RADIUS, REVERSE_DAMAGE_SCALE, SHOTGUN_DAMAGE,
    SHOTGUN_SPEED, SPIRAL_DAMAGE, SPIRAL_STEP,
};
use game_core::physics::clamp_to_bounds;
use game_core::util::{world_size, wrap_angle};
use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// 自動照準の索敵範囲（画面外の敵も狙う）
const AUTO_AIM_RANGE: f32 = 2000.0;
/// 弾の出現位置（プレイヤー中心から）
const MUZZLE_DISTANCE: f32 = PLAYER_RADIUS + MUZZLE_OFFSET;

pub(crate) fn update_player(w: &mut GameWorld, e: &mut Entity, dt: f32) -> UpdateOutcome {
    let input = w.input;
    let parts = e.parts_mut();
    let Body::Player(p) = parts.body else { return UpdateOutcome::Alive };
    if p.stats.is_dead() {
        parts.modules.set_velocity(Vec2::ZERO);
        return UpdateOutcome::Alive;
    }

    p.stats.regenerate(dt);

    // ── 移動・ダッシュ ────────────────────────────────────────
    let dir = input.movement();
    if dir != Vec2::ZERO {
        p.facing = dir;
    }
    p.dash_cooldown = (p.dash_cooldown - dt).max(0.0);
    if p.dash_timer > 0.0 {
        p.dash_timer = (p.dash_timer - dt).max(0.0);
    } else if p.stats.dash && input.dash && p.dash_cooldown <= 0.0 {
        p.dash_timer = PLAYER_DASH_DURATION;
        p.dash_cooldown = PLAYER_DASH_COOLDOWN;
        p.dash_dir = if dir != Vec2::ZERO { dir } else { p.facing };
    }
    let velocity = if p.is_dashing() {
        p.dash_dir * PLAYER_DASH_SPEED
    } else {
        dir * p.stats.move_speed
    };
    parts.modules.set_velocity(velocity);
    if let Some(anim) = parts.modules.animated_mut() {
        anim.set_animation(if velocity == Vec2::ZERO { "idle" } else { "run" });
    }
    parts.transform.position = clamp_to_bounds(parts.transform.position, world_size(), PLAYER_RADIUS);
    let pos = parts.transform.position;

    // ── 自動攻撃 ──────────────────────────────────────────────
    p.attack_timer -= dt;
    if p.attack_timer <= 0.0 {
        p.attack_timer = p.stats.attack_cooldown();
        fire_volley(w, p, pos);
    }

    if p.stats.orbital {
        update_orbitals(w, p, pos, dt);
    }
    UpdateOutcome::Alive
}

/// 1 回分の自動攻撃。ショットガン → 螺旋 → 通常の順に優先する
fn fire_volley(w: &mut GameWorld, p: &mut PlayerBody, pos: Vec2) {
    let n = p.stats.projectile_count.max(1);
    let target = find_nearest_enemy(w, pos, AUTO_AIM_RANGE).map(|(_, tp)| tp);
    let aim = target
        .map(|tp| (tp - pos).normalize_or(p.facing))
        .unwrap_or(p.facing);

    if p.stats.shotgun {
        let base = aim.to_angle();
        for i in 0..n {
            let offset = if n == 1 { 0.0 } else { -PI * 0.5 + PI * i as f32 / (n - 1) as f32 };
            shoot(w, p, pos, Vec2::from_angle(base + offset), SHOTGUN_SPEED, SHOTGUN_DAMAGE);
        }
        if p.stats.reverse {
            shoot(w, p, pos, -aim, SHOTGUN_SPEED, SHOTGUN_DAMAGE * REVERSE_DAMAGE_SCALE);
        }
    } else if p.stats.spiral {
        p.spiral_angle = wrap_angle(p.spiral_angle + SPIRAL_STEP);
        for i in 0..n {
            let a = p.spiral_angle + TAU * i as f32 / n as f32;
            shoot(w, p, pos, Vec2::from_angle(a), BASE_SHOT_SPEED, SPIRAL_DAMAGE);
        }
    } else if target.is_some() {
        let base = aim.to_angle();
        let denom = (n.saturating_sub(1)).max(1) as f32;
        for i in 0..n {
            let offset = (i as f32 - n as f32 / 2.0) / denom * FAN_SPREAD;
            shoot(w, p, pos, Vec2::from_angle(base + offset), BASE_SHOT_SPEED, BASE_SHOT_DAMAGE);
        }
        if p.stats.reverse {
            shoot(w, p, pos, -aim, BASE_SHOT_SPEED, BASE_SHOT_DAMAGE * REVERSE_DAMAGE_SCALE);
        }
    } else {
        // 敵がいなければ全方位
        for i in 0..n {
            let a = TAU * i as f32 / n as f32;
            shoot(w, p, pos, Vec2::from_angle(a), BASE_SHOT_SPEED, BASE_SHOT_DAMAGE);
        }
    }
}

/// 衛星を回し、一定間隔でそれぞれ外向きに撃つ
fn update_orbitals(w: &mut GameWorld, p: &mut PlayerBody, pos: Vec2, dt: f32) {
    p.orbital_angle = wrap_angle(p.orbital_angle + ORBITAL_ANGULAR_SPEED * dt);
    p.orbital_timer -= dt;
    if p.orbital_timer > 0.0 {
        return;
    }
    p.orbital_timer = ORBITAL_FIRE_INTERVAL;
    let count = p.stats.orbital_count.max(1);
    for i in 0..count {
        let dir = Vec2::from_angle(p.orbital_angle + TAU * i as f32 / count as f32);
        let origin = pos + dir * ORBITAL_RADIUS;
        let (dmg, crit) = p.stats.roll_damage(ORBITAL_DAMAGE, &mut w.rng);
        let spec = ProjectileSpec::player(origin, dir, BASE_SHOT_SPEED * 0.5, dmg)
            .with_pierce(p.stats.pierce)
            .with_homing(p.stats.homing)
            .with_explosive(p.stats.explosive)
            .with_crit(crit);
        w.spawn_projectile(spec);
    }
}

/// 能力値の修飾子をすべて載せた弾を撃つ
fn shoot(w: &mut GameWorld, p: &PlayerBody, pos: Vec2, dir: Vec2, speed: f32, base_damage: f32) {
    let (dmg, crit) = p.stats.roll_damage(base_damage, &mut w.rng);
    let spec = ProjectileSpec::player(pos + dir * MUZZLE_DISTANCE, dir, speed, dmg)
        .with_pierce(p.stats.pierce)
        .with_homing(p.stats.homing)
        .with_explosive(p.stats.explosive)
        .with_crit(crit);
    w.spawn_projectile(spec);
}
