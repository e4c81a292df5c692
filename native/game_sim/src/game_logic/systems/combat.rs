use crate::world::{DeathEffect, EntityId, FrameEvent, GameWorld};
use game_core::constants::SCREEN_HEIGHT;
use glam::Vec2;

/// ボス撃破時にばらまくオーブの数と、1 個あたりの報酬に対する割合
const BOSS_BONUS_ORBS: usize = 10;
const BOSS_ORB_SHARE:  f32 = 0.05;

const EXPLOSION_COLOR: [f32; 4] = [1.0, 0.5, 0.2, 1.0];

/// 敵（ボス含む）にダメージを与え、実際に減った量を返す。
/// この一撃で倒れたら Destroy にして死亡時効果を適用する。
pub(crate) fn damage_enemy(w: &mut GameWorld, id: EntityId, amount: f32) -> f32 {
    let (dealt, death) = {
        let Some(e) = w.entity_mut(id) else { return 0.0 };
        if !e.is_active() || e.body.as_enemy().is_none() {
            return 0.0;
        }
        let pos = e.position();
        let Some(c) = e.body.combatant_mut() else { return 0.0 };
        let dealt = c.take_damage(amount);
        let death = if c.is_dead() { Some(c.on_death(pos)) } else { None };
        if death.is_some() {
            e.destroy();
        }
        (dealt, death)
    };
    if let Some(effect) = death {
        apply_death(w, effect);
    }
    dealt
}

/// 死亡時効果を適用する。経験値は遅延キューへ積むだけで、ここではレベルは上がらない。
pub(crate) fn apply_death(w: &mut GameWorld, effect: DeathEffect) {
    match effect {
        // GameOver はフレーム末に判定する
        DeathEffect::Player => {}
        DeathEffect::Enemy { kind, position, exp_reward, explosion, color } => {
            w.queue_experience(exp_reward as f32);
            w.kill_count += 1;
            w.push_event(FrameEvent::EnemyKilled { kind, position });
            match explosion {
                Some(ex) => {
                    if let Some(pp) = w.player_position() {
                        let d = pp.distance(position);
                        if d <= ex.radius {
                            let falloff = 1.0 - (d / ex.radius).clamp(0.0, 1.0);
                            w.damage_player(ex.damage * (0.6 + 0.4 * falloff));
                        }
                    }
                    w.spawn_ring(position, ex.radius, [1.0, 0.4, 0.1, 0.8]);
                    w.emit_particles(position, 24, EXPLOSION_COLOR);
                    w.shake(6.0, 0.2);
                }
                None => w.emit_falling_particles(position, 10, color),
            }
        }
        DeathEffect::Boss { kind, position, exp_reward, color } => {
            w.queue_experience(exp_reward as f32);
            w.kill_count += 1;
            let orb_value = exp_reward as f32 * BOSS_ORB_SHARE;
            for _ in 0..BOSS_BONUS_ORBS {
                let offset = w.rng.unit_vec() * w.rng.range(10.0, 60.0);
                w.spawn_orb(position + offset, orb_value);
            }
            w.emit_particles(position, 60, color);
            w.emit_particles(position, 40, EXPLOSION_COLOR);
            w.shake(10.0, 0.5);
            w.spawn_floating_text(position - Vec2::new(0.0, SCREEN_HEIGHT * 0.05), "BOSS DEFEATED", [1.0, 0.9, 0.2, 1.0]);
            w.push_event(FrameEvent::BossDefeated { kind });
            log::info!("boss defeated: {} (wave {}, +{} exp)", kind.name(), w.wave, exp_reward);
        }
    }
}
