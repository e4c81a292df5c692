use super::combat::damage_enemy;
use crate::world::GameWorld;
use game_core::constants::{CHAIN_SCALE, CHAIN_TEXT_THRESHOLD, EXPLOSION_FALLOFF};
use glam::Vec2;

/// 爆発の一次パルス。距離で減衰したダメージを範囲内の生きた敵に与え、
/// それで倒れた敵の位置から半径・ダメージ半分の二次パルスを 1 回ずつ出す。
/// 二次パルスで倒れた敵はさらに連鎖しない。巻き込んだ延べ数を返す。
pub(crate) fn detonate(w: &mut GameWorld, center: Vec2, radius: f32, damage: f32) -> usize {
    let ids = w.snapshot_enemies();
    let mut hits = 0;
    let mut chain_origins: Vec<Vec2> = Vec::new();

    for &id in &ids {
        let Some(pos) = w.live_enemy(id).map(|e| e.position()) else { continue };
        let d = pos.distance(center);
        if d > radius {
            continue;
        }
        let scaled = damage * (1.0 - EXPLOSION_FALLOFF * d / radius.max(f32::EPSILON));
        damage_enemy(w, id, scaled);
        hits += 1;
        if w.live_enemy(id).is_none() {
            chain_origins.push(pos);
        }
    }

    let chain_radius = radius * CHAIN_SCALE;
    let chain_damage = damage * CHAIN_SCALE;
    for origin in chain_origins {
        for &id in &ids {
            let Some(pos) = w.live_enemy(id).map(|e| e.position()) else { continue };
            if pos.distance(origin) <= chain_radius {
                damage_enemy(w, id, chain_damage);
                hits += 1;
            }
        }
    }
    w.recycle_query_buf(ids);

    w.spawn_ring(center, radius, [1.0, 0.6, 0.1, 0.8]);
    w.shake(4.0, 0.2);
    if hits > CHAIN_TEXT_THRESHOLD {
        w.spawn_floating_text(center, "CHAIN!", [1.0, 0.9, 0.0, 1.0]);
    }
    hits
}
