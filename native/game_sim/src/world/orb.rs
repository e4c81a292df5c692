//! Path: native/game_sim/src/world/orb.rs
//! Summary: 経験値オーブ（経験値量と一度きりの回収ラッチ）

pub struct ExperienceOrb {
    pub value: f32,
    collected: bool,
}

impl ExperienceOrb {
    pub fn new(value: f32) -> Self {
        Self { value, collected: false }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// 回収ラッチを立てる。初回だけ経験値を返し、2 回目以降は None
    pub fn collect(&mut self) -> Option<f32> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.value)
    }
}
