use crate::menu::Menu;
use crate::world::{FrameEvent, GamePhase, GameWorld};
use game_core::constants::{SCREEN_HEIGHT, UPGRADE_OFFER_COUNT};
use game_core::upgrade::generate_offers;
use glam::Vec2;

/// 更新パス中に積まれた経験値をまとめて加算し、レベルアップを処理する。
/// 未選択の強化があればアップグレードメニューを開く。
pub(crate) fn drain_experience(w: &mut GameWorld) {
    if w.pending_experience.is_empty() {
        return;
    }
    let pending = std::mem::take(&mut w.pending_experience);
    let (from, to) = {
        let Some(p) = w.player_mut() else { return };
        let from = p.stats.level;
        for amount in &pending {
            p.stats.add_experience(*amount);
        }
        (from, p.stats.level)
    };
    // バッファは使い回す
    w.pending_experience = pending;
    w.pending_experience.clear();

    let pos = w.player_position().unwrap_or(Vec2::ZERO);
    for level in from + 1..=to {
        w.push_event(FrameEvent::LevelUp { level });
        w.shake(8.0, 0.3);
        w.spawn_floating_text(pos - Vec2::new(0.0, SCREEN_HEIGHT * 0.05), "LEVEL UP", [0.4, 1.0, 0.4, 1.0]);
        log::info!("level up: {}", level);
    }
    if to > from {
        open_upgrade_menu(w);
    }
}

/// 未選択の強化があれば候補を引き直してメニューを開く。なければ false
pub(crate) fn open_upgrade_menu(w: &mut GameWorld) -> bool {
    let Some(stats) = w.player().map(|p| p.stats.clone()) else { return false };
    if stats.pending_upgrades == 0 {
        return false;
    }
    let offers = generate_offers(&mut w.rng, &stats, UPGRADE_OFFER_COUNT);
    if offers.is_empty() {
        return false;
    }
    log::debug!("upgrade offers: {:?}", offers);
    w.menu = Menu::upgrade(&offers);
    w.upgrade_offers = offers;
    w.phase = GamePhase::UpgradeMenu;
    true
}

/// 提示中の `index` 番目の強化を適用する。
/// まだ未選択が残っていれば引き直し、尽きたらプレイに戻る。
pub(crate) fn apply_upgrade_choice(w: &mut GameWorld, index: usize) -> bool {
    let Some(upgrade) = w.upgrade_offers.get(index).copied() else { return false };
    let Some(p) = w.player_mut() else { return false };
    upgrade.apply(&mut p.stats);
    p.stats.consume_pending_upgrade();
    log::info!("upgrade picked: {}", upgrade.title());

    w.upgrade_offers.clear();
    if !open_upgrade_menu(w) {
        w.resume();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> GameWorld {
        let mut w = GameWorld::new(17);
        w.start_run();
        w
    }

    #[test]
    fn experience_is_applied_only_when_drained() {
        let mut w = world();
        w.queue_experience(40.0);
        w.queue_experience(30.0);
        assert!((w.player().map(|p| p.stats.experience).unwrap_or(-1.0)).abs() < 0.001);
        drain_experience(&mut w);
        assert!((w.player().map(|p| p.stats.experience).unwrap_or(0.0) - 70.0).abs() < 0.001);
        assert!(w.pending_experience().is_empty());
        assert_eq!(w.phase, GamePhase::Playing);
    }

    #[test]
    fn level_up_opens_upgrade_menu() {
        let mut w = world();
        w.queue_experience(100.0);
        drain_experience(&mut w);
        assert_eq!(w.player().map(|p| p.stats.level), Some(2));
        assert_eq!(w.phase, GamePhase::UpgradeMenu);
        assert_eq!(w.upgrade_offers.len(), UPGRADE_OFFER_COUNT);
        assert!(w.frame_events().contains(&FrameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn picking_last_upgrade_resumes_play() {
        let mut w = world();
        w.queue_experience(100.0);
        drain_experience(&mut w);
        assert!(apply_upgrade_choice(&mut w, 0));
        assert_eq!(w.player().map(|p| p.stats.pending_upgrades), Some(0));
        assert_eq!(w.phase, GamePhase::Playing);
        assert!(w.upgrade_offers.is_empty());
    }

    #[test]
    fn multiple_levels_keep_menu_open() {
        let mut w = world();
        // 100 + 150 でちょうど 2 レベル
        w.queue_experience(250.0);
        drain_experience(&mut w);
        assert_eq!(w.player().map(|p| p.stats.pending_upgrades), Some(2));
        assert!(apply_upgrade_choice(&mut w, 1));
        assert_eq!(w.phase, GamePhase::UpgradeMenu);
        assert!(apply_upgrade_choice(&mut w, 0));
        assert_eq!(w.phase, GamePhase::Playing);
    }

    #[test]
    fn out_of_range_choice_is_ignored() {
        let mut w = world();
        assert!(!apply_upgrade_choice(&mut w, 5));
    }
}
