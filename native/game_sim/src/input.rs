//! Path: native/game_sim/src/input.rs
//! Summary: 1 フレーム分の押下キーのスナップショット

use glam::Vec2;

/// 毎フレーム 1 回ホストがポーリングして World に渡す
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up:      bool,
    pub down:    bool,
    pub left:    bool,
    pub right:   bool,
    /// Space
    pub dash:    bool,
    /// Enter / Space
    pub confirm: bool,
    /// Escape
    pub pause:   bool,
}

impl InputSnapshot {
    /// 正規化した移動方向（入力なしならゼロ）
    pub fn movement(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up    { v.y -= 1.0; }
        if self.down  { v.y += 1.0; }
        if self.left  { v.x -= 1.0; }
        if self.right { v.x += 1.0; }
        v.normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_is_normalized() {
        let i = InputSnapshot { up: true, right: true, ..Default::default() };
        assert!((i.movement().length() - 1.0).abs() < 0.001);
    }

    #[test]
    fn opposite_keys_cancel() {
        let i = InputSnapshot { left: true, right: true, ..Default::default() };
        assert_eq!(i.movement(), Vec2::ZERO);
    }
}
