//! Path: native/game_sim/src/menu/mod.rs
//! Summary: メニュー（メイン・ポーズ・アップグレード・ゲームオーバー）の項目選択とデバウンス

use crate::input::InputSnapshot;
use game_core::constants::MENU_INPUT_DEBOUNCE;
use game_core::upgrade::Upgrade;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKind {
    Main,
    Pause,
    Upgrade,
    GameOver,
}

/// 項目を選んだときに World へ返す要求
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    Resume,
    QuitToMenu,
    Restart,
    Quit,
    /// 提示中のアップグレードの添字
    PickUpgrade(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub label:  String,
    pub detail: Option<String>,
    pub action: MenuAction,
}

impl MenuItem {
    fn new(label: &str, action: MenuAction) -> Self {
        Self { label: label.to_string(), detail: None, action }
    }
}

#[derive(Clone, Debug)]
pub struct Menu {
    pub kind:  MenuKind,
    pub title: &'static str,
    items:     Vec<MenuItem>,
    selected:  usize,
    /// 次のキー入力を受け付けるまでの残り時間
    cooldown:  f32,
}

impl Menu {
    fn with_items(kind: MenuKind, title: &'static str, items: Vec<MenuItem>) -> Self {
        Self { kind, title, items, selected: 0, cooldown: MENU_INPUT_DEBOUNCE }
    }

    pub fn main() -> Self {
        Self::with_items(MenuKind::Main, "ARENA", vec![
            MenuItem::new("Start Game", MenuAction::StartGame),
            MenuItem::new("Quit", MenuAction::Quit),
        ])
    }

    pub fn pause() -> Self {
        Self::with_items(MenuKind::Pause, "PAUSED", vec![
            MenuItem::new("Resume", MenuAction::Resume),
            MenuItem::new("Quit to Menu", MenuAction::QuitToMenu),
        ])
    }

    pub fn game_over() -> Self {
        Self::with_items(MenuKind::GameOver, "GAME OVER", vec![
            MenuItem::new("Restart", MenuAction::Restart),
            MenuItem::new("Main Menu", MenuAction::QuitToMenu),
        ])
    }

    pub fn upgrade(offers: &[Upgrade]) -> Self {
        let items = offers
            .iter()
            .enumerate()
            .map(|(i, u)| MenuItem {
                label:  format!("{}{}", u.rarity().label(), u.title()),
                detail: Some(u.description().to_string()),
                action: MenuAction::PickUpgrade(i),
            })
            .collect();
        Self::with_items(MenuKind::Upgrade, "LEVEL UP!", items)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// 直前の画面で押していたキーを拾わないよう待ち時間を戻す
    pub fn reset_input(&mut self) {
        self.cooldown = MENU_INPUT_DEBOUNCE;
    }

    /// 上下で選択、決定で項目の要求を返す。押しっぱなしは 0.2 秒ごとに 1 回。
    pub fn process_input(&mut self, input: &InputSnapshot, dt: f32) -> Option<MenuAction> {
        self.cooldown = (self.cooldown - dt).max(0.0);
        if self.items.is_empty() || self.cooldown > 0.0 {
            return None;
        }
        let n = self.items.len();
        if input.up {
            self.selected = (self.selected + n - 1) % n;
        } else if input.down {
            self.selected = (self.selected + 1) % n;
        } else if input.confirm {
            self.cooldown = MENU_INPUT_DEBOUNCE;
            return self.items.get(self.selected).map(|item| item.action);
        } else {
            return None;
        }
        self.cooldown = MENU_INPUT_DEBOUNCE;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(up: bool, down: bool, confirm: bool) -> InputSnapshot {
        InputSnapshot { up, down, confirm, ..Default::default() }
    }

    #[test]
    fn fresh_menu_ignores_held_key() {
        let mut m = Menu::main();
        assert_eq!(m.process_input(&press(false, false, true), 0.1), None);
        assert_eq!(m.process_input(&press(false, false, true), 0.15), Some(MenuAction::StartGame));
    }

    #[test]
    fn navigation_wraps_and_debounces() {
        let mut m = Menu::pause();
        m.process_input(&InputSnapshot::default(), 1.0);
        m.process_input(&press(true, false, false), 0.0);
        assert_eq!(m.selected(), 1);
        // デバウンス中は動かない
        m.process_input(&press(true, false, false), 0.1);
        assert_eq!(m.selected(), 1);
        m.process_input(&press(true, false, false), 0.15);
        assert_eq!(m.selected(), 0);
    }

    #[test]
    fn upgrade_menu_maps_offers() {
        let offers = [Upgrade::ALL[0], Upgrade::ALL[1], Upgrade::ALL[2]];
        let mut m = Menu::upgrade(&offers);
        assert_eq!(m.items().len(), 3);
        m.process_input(&InputSnapshot::default(), 1.0);
        m.process_input(&press(false, true, false), 0.0);
        assert_eq!(m.process_input(&press(false, false, true), 0.3), Some(MenuAction::PickUpgrade(1)));
    }

    #[test]
    fn upgrade_labels_carry_rarity_prefix_once() {
        let m = Menu::upgrade(&[Upgrade::MaxHealth, Upgrade::PiercingShots]);
        assert_eq!(m.items()[0].label, "MAX HEALTH +20");
        assert_eq!(m.items()[1].label, "[RARE] PIERCING SHOTS");
    }
}
