use super::enemy::contact_damage;
use super::UpdateOutcome;
use crate::game_logic::chase_ai::chase_velocity;
use crate::world::{Body, Boss, Entity, GameWorld, ProjectileSpec};
use game_core::boss::BossState;
use game_core::constants::DELAYED_EXPLOSION_DAMAGE;
use game_core::util::{clamp_to_world, wrap_angle};
use glam::Vec2;
use std::f32::consts::TAU;

const SPAWN_DRIFT_SPEED: f32 = 60.0;
const DASH_SPEED: f32 = 600.0;

const BURST_INTERVAL: f32 = 0.4;
const BURST_SHOTS: usize = 8;
const BURST_SPEED: f32 = 300.0;
const BURST_DAMAGE: f32 = 20.0;

const BOMB_INTERVAL: f32 = 0.5;
const BOMB_SCATTER: f32 = 80.0;
const BOMB_DELAY: f32 = 1.0;
const BOMB_RADIUS: f32 = 60.0;

const SPIRAL_INTERVAL: f32 = 0.05;
const SPIRAL_STEP: f32 = 0.4;
const SPIRAL_SPEED: f32 = 400.0;

const CONE_INTERVAL: f32 = 0.6;
const CONE_SHOTS: usize = 7;
const CONE_HALF_ANGLE: f32 = 30.0 * std::f32::consts::PI / 180.0;
const CONE_SPEED: f32 = 350.0;

const MINE_INTERVAL: f32 = 0.4;
const MINE_DELAY: f32 = 1.5;
const MINE_RADIUS: f32 = 50.0;

const BEAM_INTERVAL: f32 = 0.03;
const BEAM_SPEED: f32 = 900.0;
const BEAM_DAMAGE: f32 = 25.0;

const BULLET_DAMAGE: f32 = 15.0;

pub(crate) fn update_boss(w: &mut GameWorld, e: &mut Entity, dt: f32) -> UpdateOutcome {
    let parts = e.parts_mut();
    let Body::Boss(boss) = parts.body else { return UpdateOutcome::Alive };
    if boss.core.health <= 0.0 {
        return UpdateOutcome::Destroy;
    }
    let pos = parts.transform.position;

    if let Some(next) = boss.machine.tick(boss.kind, dt) {
        log::debug!("{} -> {:?}", boss.name(), next);
    }

    let target = w.player_position();
    let velocity = act(w, boss, pos, target, dt);
    parts.modules.set_velocity(velocity);

    if let Some(tp) = target {
        let dist = pos.distance(tp);
        if tp != pos {
            boss.core.facing = (tp - pos) / dist;
        }
        contact_damage(w, &boss.core, dist, dt);
    }
    parts.transform.position = clamp_to_world(pos);
    UpdateOutcome::Alive
}

/// 現在の状態の振る舞いを実行し、このフレームの速度を返す
fn act(w: &mut GameWorld, boss: &mut Boss, pos: Vec2, target: Option<Vec2>, dt: f32) -> Vec2 {
    let speed = boss.core.speed;
    let chase = |s: f32| target.map(|tp| chase_velocity(pos, tp, s)).unwrap_or(Vec2::ZERO);
    let m = &mut boss.machine;

    match m.state {
        BossState::Spawning => Vec2::new(0.0, SPAWN_DRIFT_SPEED),
        BossState::Chasing => chase(speed),
        BossState::Cooldown => Vec2::ZERO,
        BossState::BurstAttack => {
            if m.fire_ready(dt, BURST_INTERVAL) {
                for i in 0..BURST_SHOTS {
                    let dir = Vec2::from_angle(TAU * i as f32 / BURST_SHOTS as f32);
                    fire(w, pos, dir, boss.core.radius, BURST_SPEED, BURST_DAMAGE);
                }
            }
            Vec2::ZERO
        }
        BossState::Telegraphing => {
            // プレイヤーがいなければ狙いは確定しない（突進はゼロ方向）
            if let Some(tp) = target {
                m.capture_target(tp - pos);
            }
            Vec2::ZERO
        }
        BossState::Dashing => m.target_dir * DASH_SPEED,
        BossState::Bombing => {
            if m.fire_ready(dt, BOMB_INTERVAL) {
                if let Some(tp) = target {
                    let offset = w.rng.unit_vec() * w.rng.range(0.0, BOMB_SCATTER);
                    w.spawn_delayed_explosion(clamp_to_world(tp + offset), BOMB_DELAY, BOMB_RADIUS, DELAYED_EXPLOSION_DAMAGE);
                }
            }
            chase(speed * 0.3)
        }
        BossState::SpiralAttack => {
            if m.fire_ready(dt, SPIRAL_INTERVAL) {
                m.attack_angle = wrap_angle(m.attack_angle + SPIRAL_STEP);
                let dir = Vec2::from_angle(m.attack_angle);
                fire(w, pos, dir, boss.core.radius, SPIRAL_SPEED, BULLET_DAMAGE);
            }
            chase(speed * 0.5)
        }
        BossState::ConeAttack => {
            if m.fire_ready(dt, CONE_INTERVAL) {
                if let Some(tp) = target {
                    let base = (tp - pos).normalize_or(Vec2::X).to_angle();
                    for i in 0..CONE_SHOTS {
                        let t = i as f32 / (CONE_SHOTS - 1) as f32;
                        let dir = Vec2::from_angle(base - CONE_HALF_ANGLE + 2.0 * CONE_HALF_ANGLE * t);
                        fire(w, pos, dir, boss.core.radius, CONE_SPEED, BULLET_DAMAGE);
                    }
                }
            }
            Vec2::ZERO
        }
        BossState::MineLayer => {
            if m.fire_ready(dt, MINE_INTERVAL) {
                w.spawn_delayed_explosion(pos, MINE_DELAY, MINE_RADIUS, DELAYED_EXPLOSION_DAMAGE);
            }
            chase(speed)
        }
        BossState::FireBeam => {
            if m.target_dir != Vec2::ZERO && m.fire_ready(dt, BEAM_INTERVAL) {
                fire(w, pos, m.target_dir, boss.core.radius, BEAM_SPEED, BEAM_DAMAGE);
            }
            Vec2::ZERO
        }
    }
}

fn fire(w: &mut GameWorld, pos: Vec2, dir: Vec2, radius: f32, speed: f32, damage: f32) {
    w.spawn_projectile(ProjectileSpec::enemy(pos + dir * radius, dir, speed, damage));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{EntityId, EntityKind};
    use game_core::boss::BossKind;

    fn world() -> GameWorld {
        let mut w = GameWorld::new(11);
        w.reset_run();
        w
    }

    fn step(w: &mut GameWorld, id: EntityId, dt: f32) {
        let Some(mut e) = w.registry.checkout(id) else { panic!("checkout") };
        update_boss(w, &mut e, dt);
        w.registry.checkin(e);
    }

    fn state(w: &GameWorld, id: EntityId) -> BossState {
        match w.entity(id).map(|e| &e.body) {
            Some(Body::Boss(b)) => b.machine.state,
            _ => panic!("not a boss"),
        }
    }

    fn force(w: &mut GameWorld, id: EntityId, s: BossState) {
        if let Some(Body::Boss(b)) = w.entity_mut(id).map(|e| &mut e.body) {
            let kind = b.kind;
            b.machine.enter(s, kind);
        }
    }

    fn count(w: &GameWorld, kind: EntityKind) -> usize {
        w.entities().filter(|e| e.kind() == kind).count()
    }

    #[test]
    fn tank_dash_sequence_hits_three_times_then_cools_down() {
        let mut w = world();
        let pp = w.player_position().unwrap_or(Vec2::ZERO);
        let id = w.spawn_boss(BossKind::Tank, pp + Vec2::new(500.0, 0.0), 5);
        // Spawning → Chasing → 2 番目の攻撃（突進）まで進める
        if let Some(Body::Boss(b)) = w.entity_mut(id).map(|e| &mut e.body) {
            b.machine.attack_index = 1;
        }
        force(&mut w, id, BossState::Chasing);
        step(&mut w, id, 6.01);
        assert_eq!(state(&w, id), BossState::Telegraphing);

        let mut dashes = 0;
        for _ in 0..3 {
            step(&mut w, id, 0.81);
            assert_eq!(state(&w, id), BossState::Dashing);
            let v = w.entity(id).map(|e| e.modules.velocity()).unwrap_or(Vec2::ZERO);
            assert!((v.length() - DASH_SPEED).abs() < 0.01);
            dashes += 1;
            step(&mut w, id, 0.51);
        }
        assert_eq!(dashes, 3);
        assert_eq!(state(&w, id), BossState::Cooldown);
    }

    #[test]
    fn telegraph_without_player_captures_nothing() {
        let mut w = GameWorld::new(2);
        let id = w.spawn_boss(BossKind::Tank, Vec2::new(500.0, 500.0), 5);
        force(&mut w, id, BossState::Telegraphing);
        step(&mut w, id, 0.1);
        match w.entity(id).map(|e| &e.body) {
            Some(Body::Boss(b)) => assert_eq!(b.machine.target_dir, Vec2::ZERO),
            _ => panic!("not a boss"),
        }
    }

    #[test]
    fn burst_fires_ring_on_entry() {
        let mut w = world();
        let id = w.spawn_boss(BossKind::Tank, Vec2::new(500.0, 500.0), 5);
        force(&mut w, id, BossState::BurstAttack);
        step(&mut w, id, 0.016);
        assert_eq!(w.projectiles().len(), BURST_SHOTS);
        step(&mut w, id, 0.1);
        assert_eq!(w.projectiles().len(), BURST_SHOTS);
    }

    #[test]
    fn bombing_and_mines_leave_delayed_explosions() {
        let mut w = world();
        let tank = w.spawn_boss(BossKind::Tank, Vec2::new(500.0, 500.0), 5);
        force(&mut w, tank, BossState::Bombing);
        step(&mut w, tank, 0.016);
        assert_eq!(count(&w, EntityKind::DelayedExplosion), 1);

        let sprayer = w.spawn_boss(BossKind::Sprayer, Vec2::new(800.0, 800.0), 10);
        force(&mut w, sprayer, BossState::MineLayer);
        step(&mut w, sprayer, 0.016);
        assert_eq!(count(&w, EntityKind::DelayedExplosion), 2);
    }

    #[test]
    fn spiral_angle_is_per_boss() {
        let mut w = world();
        let a = w.spawn_boss(BossKind::Sprayer, Vec2::new(500.0, 500.0), 10);
        let b = w.spawn_boss(BossKind::Sprayer, Vec2::new(900.0, 900.0), 10);
        force(&mut w, a, BossState::SpiralAttack);
        force(&mut w, b, BossState::SpiralAttack);
        step(&mut w, a, 0.016);
        step(&mut w, a, 0.06);
        step(&mut w, b, 0.016);
        let angle = |id| match w.entity(id).map(|e| &e.body) {
            Some(Body::Boss(bb)) => bb.machine.attack_angle,
            _ => -1.0,
        };
        assert!((angle(a) - 2.0 * SPIRAL_STEP).abs() < 0.001);
        assert!((angle(b) - SPIRAL_STEP).abs() < 0.001);
    }

    #[test]
    fn cone_spreads_seven_shots() {
        let mut w = world();
        let id = w.spawn_boss(BossKind::Sprayer, Vec2::new(500.0, 500.0), 10);
        force(&mut w, id, BossState::ConeAttack);
        step(&mut w, id, 0.016);
        assert_eq!(w.projectiles().len(), CONE_SHOTS);
    }
}
