//! Path: native/game_core/src/physics/rng.rs
//! Summary: 決定論的 LCG 乱数ジェネレータ（シード固定で再現可能）

use glam::Vec2;

#[derive(Clone, Debug)]
pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // 上位 32 ビットを使う（下位ビットは周期が短い）
        (self.0 >> 32) as u32
    }

    /// [0, 1]
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// [lo, hi]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// [0, n)。n == 0 なら 0
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.next_u32() as usize % n
    }

    pub fn chance(&mut self, p: f32) -> bool {
        p >= 1.0 || self.next_f32() < p
    }

    pub fn angle(&mut self) -> f32 {
        self.next_f32() * std::f32::consts::TAU
    }

    pub fn unit_vec(&mut self) -> Vec2 {
        Vec2::from_angle(self.angle())
    }
}
