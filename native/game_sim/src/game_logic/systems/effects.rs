use super::UpdateOutcome;
use crate::world::{Body, Entity, GameWorld};
use game_core::constants::PLAYER_RADIUS;

const BLAST_COLOR: [f32; 4] = [1.0, 0.4, 0.1, 1.0];

/// 予告リングを色で進行表示し、時間切れで起爆する
pub(crate) fn update_delayed_explosion(w: &mut GameWorld, e: &mut Entity, dt: f32) -> UpdateOutcome {
    let parts = e.parts_mut();
    let Body::DelayedExplosion(ex) = parts.body else { return UpdateOutcome::Alive };
    let pos = parts.transform.position;

    if !ex.tick(dt) {
        let t = ex.progress();
        if let Some(r) = parts.modules.renderer_mut() {
            r.color = [1.0, 0.6 * (1.0 - t), 0.1, 0.3 + 0.5 * t];
        }
        return UpdateOutcome::Alive;
    }

    if let Some(pp) = w.player_position() {
        if pp.distance(pos) <= ex.radius + PLAYER_RADIUS * 0.5 {
            w.damage_player(ex.damage);
            w.shake(4.0, 0.15);
        }
    }
    w.emit_particles(pos, 16, BLAST_COLOR);
    w.spawn_ring(pos, ex.radius, BLAST_COLOR);
    UpdateOutcome::Destroy
}

pub(crate) fn update_floating_text(e: &mut Entity, dt: f32) -> UpdateOutcome {
    let parts = e.parts_mut();
    let Body::FloatingText(t) = parts.body else { return UpdateOutcome::Alive };
    t.age += dt;
    parts.transform.position.y -= t.rise_speed * dt;
    if t.age >= t.duration {
        UpdateOutcome::Destroy
    } else {
        UpdateOutcome::Alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Combatant, EntityId};
    use glam::Vec2;

    fn world() -> GameWorld {
        let mut w = GameWorld::new(8);
        w.reset_run();
        w
    }

    fn step(w: &mut GameWorld, id: EntityId, dt: f32) -> UpdateOutcome {
        let Some(mut e) = w.registry.checkout(id) else { panic!("checkout") };
        let out = update_delayed_explosion(w, &mut e, dt);
        w.registry.checkin(e);
        out
    }

    fn player_health(w: &GameWorld) -> f32 {
        w.player().map(|p| p.health()).unwrap_or(0.0)
    }

    #[test]
    fn detonates_after_delay_and_hurts_player_in_range() {
        let mut w = world();
        let pp = w.player_position().unwrap_or(Vec2::ZERO);
        let id = w.spawn_delayed_explosion(pp + Vec2::new(20.0, 0.0), 1.0, 60.0, 30.0);
        assert_eq!(step(&mut w, id, 0.5), UpdateOutcome::Alive);
        assert!((player_health(&w) - 100.0).abs() < 0.001);
        assert_eq!(step(&mut w, id, 0.6), UpdateOutcome::Destroy);
        assert!((player_health(&w) - 70.0).abs() < 0.001);
        assert!(w.camera.is_shaking());
    }

    #[test]
    fn out_of_range_detonation_is_harmless() {
        let mut w = world();
        let pp = w.player_position().unwrap_or(Vec2::ZERO);
        let id = w.spawn_delayed_explosion(pp + Vec2::new(300.0, 0.0), 0.1, 60.0, 30.0);
        assert_eq!(step(&mut w, id, 0.2), UpdateOutcome::Destroy);
        assert!((player_health(&w) - 100.0).abs() < 0.001);
    }

    #[test]
    fn floating_text_rises_then_expires() {
        let mut w = world();
        let id = w.spawn_floating_text(Vec2::new(100.0, 100.0), "CHAIN!", [1.0; 4]);
        let Some(mut e) = w.registry.checkout(id) else { panic!("checkout") };
        assert_eq!(update_floating_text(&mut e, 0.5), UpdateOutcome::Alive);
        assert!(e.position().y < 100.0);
        assert_eq!(update_floating_text(&mut e, 0.6), UpdateOutcome::Destroy);
        w.registry.checkin(e);
    }
}
