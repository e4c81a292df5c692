//! Path: native/game_sim/src/game_logic/frame_step.rs
//! Summary: 1 フレーム分の進行（メニュー入力 → 更新パス → 削除 → 経験値 → 判定 → スポーン → カメラ）

use super::systems::{leveling, spawn, update_entity};
use crate::audio::TRACK_MENU;
use crate::menu::{Menu, MenuAction};
use crate::world::{Combatant, FrameEvent, GamePhase, GameWorld};
use game_core::constants::FRAME_BUDGET_MS;
use game_core::util::current_wave;

/// 1 フレーム進める。`dt` は秒（上限のクランプは呼び出し側）
pub fn step_frame(w: &mut GameWorld, dt: f32) {
    // trace にしておき、RUST_LOG=trace のときだけ毎フレーム出力（debug だと 60fps でコンソールが埋まる）
    log::trace!("step_frame: dt={:.4}s frame_id={} entities={}", dt, w.frame_id, w.entity_count());
    let t_start = std::time::Instant::now();
    debug_assert!(dt.is_finite() && dt >= 0.0, "bad dt {}", dt);

    w.frame_id += 1;
    let pause_pressed = w.input.pause && !w.prev_input.pause;

    match w.phase {
        GamePhase::Playing if pause_pressed => w.pause(),
        GamePhase::Playing => simulate(w, dt),
        GamePhase::Paused if pause_pressed => w.resume(),
        GamePhase::MainMenu | GamePhase::Paused | GamePhase::UpgradeMenu | GamePhase::GameOver => {
            let input = w.input;
            if let Some(action) = w.menu.process_input(&input, dt) {
                handle_menu_action(w, action);
            }
        }
    }
    w.prev_input = w.input;

    // ── フレーム時間計測 ─────────────────────────────────────────
    let elapsed_ms = t_start.elapsed().as_secs_f64() * 1000.0;
    w.last_frame_time_ms = elapsed_ms;
    if elapsed_ms > FRAME_BUDGET_MS {
        log::warn!(
            "frame budget exceeded: {:.2}ms (entities: {}, enemies: {})",
            elapsed_ms,
            w.entity_count(),
            w.enemies().len()
        );
    }
}

/// プレイ中の 1 フレーム
fn simulate(w: &mut GameWorld, dt: f32) {
    // ── 経過時間とウェーブ ───────────────────────────────────────
    w.elapsed_seconds += dt;
    let wave = current_wave(w.elapsed_seconds);
    if wave != w.wave {
        w.wave = wave;
        w.push_event(FrameEvent::WaveChanged { wave });
        log::info!("wave {} ({:.0}s)", wave, w.elapsed_seconds);
    }

    update_pass(w, dt);

    // ── Destroy の一括削除（パスの後で 1 回だけ）────────────────────
    w.cleanup();

    // ── 遅延していた経験値の加算 ─────────────────────────────────
    leveling::drain_experience(w);

    if check_game_over(w) {
        return;
    }

    if w.phase == GamePhase::Playing {
        spawn::update_spawns(w, dt);
    }

    if let Some(pp) = w.player_position() {
        w.camera.update(pp, dt, &mut w.rng);
    }
}

/// 更新パス: 寿命 → モジュール → 種類別フック。
/// 更新中に生成されたものは保留され、このパスでは更新されない
fn update_pass(w: &mut GameWorld, dt: f32) {
    w.registry.begin_update();
    let mut i = 0;
    while i < w.registry.order_len() {
        let id = w.registry.order_at(i);
        i += 1;
        let Some(mut e) = id.and_then(|id| w.registry.checkout(id)) else { continue };
        if e.is_active() && e.tick_lifetime(dt) {
            e.update_modules(dt);
            update_entity(w, &mut e, dt);
        }
        w.registry.checkin(e);
    }
    w.registry.end_update();
}

/// プレイヤーの HP が尽きていれば GameOver へ移る
fn check_game_over(w: &mut GameWorld) -> bool {
    let Some((level, dead)) = w.player().map(|p| (p.stats.level, p.is_dead())) else { return false };
    if !dead {
        return false;
    }
    w.phase = GamePhase::GameOver;
    w.menu = Menu::game_over();
    w.upgrade_offers.clear();
    w.audio.play_track(TRACK_MENU);
    w.push_event(FrameEvent::GameOver {
        elapsed_seconds: w.elapsed_seconds,
        level,
        kills: w.kill_count,
    });
    log::info!(
        "game over: {:.1}s, level {}, {} kills",
        w.elapsed_seconds,
        level,
        w.kill_count
    );
    true
}

/// メニューで選ばれた項目を World に反映する
pub fn handle_menu_action(w: &mut GameWorld, action: MenuAction) {
    log::debug!("menu action: {:?}", action);
    match action {
        MenuAction::StartGame | MenuAction::Restart => w.start_run(),
        MenuAction::Resume => w.resume(),
        MenuAction::QuitToMenu => w.quit_to_menu(),
        MenuAction::Quit => w.quit_requested = true,
        MenuAction::PickUpgrade(index) => {
            leveling::apply_upgrade_choice(w, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;
    use crate::world::{Body, EntityKind, ProjectileSpec};
    use game_core::enemy::EnemyKind;
    use glam::Vec2;

    fn playing() -> GameWorld {
        let mut w = GameWorld::new(31);
        w.start_run();
        w
    }

    fn press_confirm(w: &mut GameWorld) {
        w.input = InputSnapshot { confirm: true, ..Default::default() };
        // デバウンスを抜けるまで押し続ける
        for _ in 0..20 {
            step_frame(w, 0.016);
            if w.phase != GamePhase::MainMenu && w.phase != GamePhase::GameOver {
                break;
            }
        }
        w.input = InputSnapshot::default();
    }

    #[test]
    fn main_menu_start_begins_run() {
        let mut w = GameWorld::new(1);
        assert_eq!(w.phase, GamePhase::MainMenu);
        press_confirm(&mut w);
        assert_eq!(w.phase, GamePhase::Playing);
        assert!(w.player_id().is_some());
    }

    #[test]
    fn pause_toggles_on_key_edge() {
        let mut w = playing();
        w.input = InputSnapshot { pause: true, ..Default::default() };
        step_frame(&mut w, 0.016);
        assert_eq!(w.phase, GamePhase::Paused);
        // 押しっぱなしでは戻らない
        step_frame(&mut w, 0.016);
        assert_eq!(w.phase, GamePhase::Paused);
        w.input = InputSnapshot::default();
        step_frame(&mut w, 0.016);
        w.input = InputSnapshot { pause: true, ..Default::default() };
        step_frame(&mut w, 0.016);
        assert_eq!(w.phase, GamePhase::Playing);
    }

    #[test]
    fn paused_world_does_not_advance() {
        let mut w = playing();
        w.pause();
        let before = w.elapsed_seconds;
        step_frame(&mut w, 0.5);
        assert!((w.elapsed_seconds - before).abs() < 0.001);
    }

    #[test]
    fn kill_and_removal_happen_in_one_frame() {
        let mut w = playing();
        let at = Vec2::new(600.0, 600.0);
        let enemy = w.spawn_enemy(EnemyKind::Grunt, at, 1);
        if let Some(Body::Enemy(en)) = w.entity_mut(enemy).map(|e| &mut e.body) {
            en.health = 5.0;
        }
        w.spawn_projectile(ProjectileSpec::player(at, Vec2::X, 1.0, 20.0));
        step_frame(&mut w, 0.016);
        assert!(w.entity(enemy).is_none());
        assert!(!w.enemies().contains(&enemy));
        assert_eq!(w.kill_count, 1);
        assert!(w.pending_experience().is_empty());
        assert!(w.player().map(|p| p.stats.experience > 0.0).unwrap_or(false));
    }

    #[test]
    fn destroyed_enemy_is_skipped_by_later_shots() {
        let mut w = playing();
        let at = Vec2::new(600.0, 600.0);
        let enemy = w.spawn_enemy(EnemyKind::Grunt, at, 1);
        if let Some(Body::Enemy(en)) = w.entity_mut(enemy).map(|e| &mut e.body) {
            en.health = 5.0;
        }
        let first = w.spawn_projectile(ProjectileSpec::player(at, Vec2::X, 1.0, 20.0));
        let second = w.spawn_projectile(ProjectileSpec::player(at, Vec2::X, 1.0, 20.0));

        update_pass(&mut w, 0.016);
        assert!(w.entity(enemy).map(|e| e.is_destroyed()).unwrap_or(false));
        assert!(w.entity(first).map(|e| e.is_destroyed()).unwrap_or(false));
        // 2 発目は倒れた敵を素通りする
        assert!(w.entity(second).map(|e| e.is_active()).unwrap_or(false));
        assert_eq!(w.kill_count, 1);
        assert_eq!(w.pending_experience().len(), 1);

        w.cleanup();
        assert!(w.entity(enemy).is_none());
        assert!(w.entity(first).is_none());
        assert!(w.entity(second).is_some());
    }

    #[test]
    fn entities_created_mid_pass_wait_a_frame() {
        let mut w = playing();
        // 初回の自動攻撃で弾が出る
        step_frame(&mut w, 0.016);
        let shots: Vec<_> = w.projectiles().to_vec();
        assert!(!shots.is_empty());
        for &id in &shots {
            let p = w.entity(id).map(|e| e.lifetime()).unwrap_or(None);
            // 生成フレームでは寿命が減っていない
            assert_eq!(p, Some(game_core::constants::PROJECTILE_LIFETIME));
        }
    }

    #[test]
    fn wave_change_emits_event() {
        let mut w = playing();
        w.elapsed_seconds = 29.99;
        step_frame(&mut w, 0.016);
        assert_eq!(w.wave, 2);
        assert!(w.frame_events().contains(&FrameEvent::WaveChanged { wave: 2 }));
    }

    #[test]
    fn player_death_leads_to_game_over() {
        let mut w = playing();
        if let Some(p) = w.player_mut() {
            p.take_damage(1000.0);
        }
        step_frame(&mut w, 0.016);
        assert_eq!(w.phase, GamePhase::GameOver);
        assert!(w.frame_events().iter().any(|e| matches!(e, FrameEvent::GameOver { .. })));
        press_confirm(&mut w);
        assert_eq!(w.phase, GamePhase::Playing);
        assert!(w.player().map(|p| !p.is_dead()).unwrap_or(false));
    }

    #[test]
    fn expired_lifetime_removes_entity() {
        let mut w = playing();
        let text = w.spawn_floating_text(Vec2::new(100.0, 100.0), "x", [1.0; 4]);
        for _ in 0..70 {
            step_frame(&mut w, 0.016);
        }
        assert!(w.entity(text).is_none());
        assert_eq!(w.entities().filter(|e| e.kind() == EntityKind::FloatingText && e.id() == text).count(), 0);
    }
}
