use super::UpdateOutcome;
use crate::world::{Body, Entity, FrameEvent, GameWorld};
use game_core::constants::{
    ORB_FRICTION, ORB_MAGNET_PULL, ORB_MAGNET_RANGE, ORB_MAX_SPEED, ORB_RADIUS, ORB_REST_SPEED,
    PLAYER_RADIUS,
};

pub(crate) fn update_orb(w: &mut GameWorld, e: &mut Entity, dt: f32) -> UpdateOutcome {
    let parts = e.parts_mut();
    let Body::Orb(orb) = parts.body else { return UpdateOutcome::Alive };
    if orb.is_collected() {
        return UpdateOutcome::Destroy;
    }
    let pos = parts.transform.position;

    let mut velocity = parts.modules.velocity();
    let mut picked = false;
    if let Some(pp) = w.player_position() {
        let to_player = pp - pos;
        let d = to_player.length();
        if d <= PLAYER_RADIUS + ORB_RADIUS || d <= ORB_REST_SPEED {
            picked = true;
        } else if d <= ORB_MAGNET_RANGE {
            let pull = (ORB_MAGNET_RANGE - d) / ORB_MAGNET_RANGE * ORB_MAGNET_PULL;
            velocity += to_player / d * pull * dt;
            velocity = velocity.clamp_length_max(ORB_MAX_SPEED);
        }
    }
    velocity *= (1.0 - ORB_FRICTION * dt).max(0.0);
    parts.modules.set_velocity(velocity);

    if !picked {
        return UpdateOutcome::Alive;
    }
    // ラッチで二重加算を防ぐ
    if let Some(value) = orb.collect() {
        w.queue_experience(value);
        w.push_event(FrameEvent::OrbCollected { value });
    }
    UpdateOutcome::Destroy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::EntityId;
    use glam::Vec2;

    fn world() -> GameWorld {
        let mut w = GameWorld::new(4);
        w.reset_run();
        w
    }

    fn step(w: &mut GameWorld, id: EntityId, dt: f32) -> UpdateOutcome {
        let Some(mut e) = w.registry.checkout(id) else { panic!("checkout") };
        let out = update_orb(w, &mut e, dt);
        w.registry.checkin(e);
        out
    }

    #[test]
    fn touching_orb_queues_experience_once() {
        let mut w = world();
        let pp = w.player_position().unwrap_or(Vec2::ZERO);
        let id = w.spawn_orb(pp + Vec2::new(5.0, 0.0), 7.0);
        assert_eq!(step(&mut w, id, 0.016), UpdateOutcome::Destroy);
        // Destroy 済みでも同じフレームにもう一度呼ばれたとする
        assert_eq!(step(&mut w, id, 0.016), UpdateOutcome::Destroy);
        assert_eq!(w.pending_experience(), &[7.0]);
        let collected = w.frame_events().iter().filter(|e| matches!(e, FrameEvent::OrbCollected { .. })).count();
        assert_eq!(collected, 1);
    }

    #[test]
    fn magnet_pulls_toward_player() {
        let mut w = world();
        let pp = w.player_position().unwrap_or(Vec2::ZERO);
        let id = w.spawn_orb(pp + Vec2::new(100.0, 0.0), 1.0);
        if let Some(e) = w.entity_mut(id) {
            e.modules.set_velocity(Vec2::ZERO);
        }
        assert_eq!(step(&mut w, id, 0.1), UpdateOutcome::Alive);
        let v = w.entity(id).map(|e| e.modules.velocity()).unwrap_or(Vec2::ZERO);
        assert!(v.x < 0.0);
        assert!(v.length() <= ORB_MAX_SPEED);
    }

    #[test]
    fn out_of_range_orb_slows_down() {
        let mut w = world();
        let pp = w.player_position().unwrap_or(Vec2::ZERO);
        let id = w.spawn_orb(pp + Vec2::new(600.0, 0.0), 1.0);
        let before = w.entity(id).map(|e| e.modules.velocity().length()).unwrap_or(0.0);
        step(&mut w, id, 0.1);
        let after = w.entity(id).map(|e| e.modules.velocity().length()).unwrap_or(0.0);
        assert!((after - before * 0.8).abs() < 0.001);
        assert!(w.pending_experience().is_empty());
    }
}
