//! Path: native/game_sim/src/world/particle.rs
//! Summary: 固定容量パーティクルプール（SoA + フリーリスト、awaken / kill で再利用）
//!
//! 生成時に容量分のスロットを確保し、以後は伸長しない。
//! 空きがなければ awaken は失敗し、そのパーティクルは出ない。

use super::module::PARTICLE_PRIORITY;
use game_core::physics::rng::SimpleRng;
use glam::Vec2;

/// 描画用に読み出す 1 粒分
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleView {
    pub position: Vec2,
    pub color:    [f32; 4],
    pub size:     f32,
}

pub struct ParticlePool {
    positions:    Vec<Vec2>,
    velocities:   Vec<Vec2>,
    lifetime:     Vec<f32>,
    max_lifetime: Vec<f32>,
    gravity:      Vec<f32>,
    color:        Vec<[f32; 4]>,
    size:         Vec<f32>,
    alive:        Vec<bool>,
    count:        usize,
    rng:          SimpleRng,
    /// 空きスロットのインデックススタック
    free_list:    Vec<usize>,
    pub priority: i32,
}

impl ParticlePool {
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            positions:    vec![Vec2::ZERO; capacity],
            velocities:   vec![Vec2::ZERO; capacity],
            lifetime:     vec![0.0; capacity],
            max_lifetime: vec![0.0; capacity],
            gravity:      vec![0.0; capacity],
            color:        vec![[0.0; 4]; capacity],
            size:         vec![0.0; capacity],
            alive:        vec![false; capacity],
            count:        0,
            rng:          SimpleRng::new(seed),
            free_list:    (0..capacity).rev().collect(),
            priority:     PARTICLE_PRIORITY,
        }
    }

    pub fn capacity(&self) -> usize {
        self.alive.len()
    }

    /// 生きているパーティクル数
    pub fn count(&self) -> usize {
        self.count
    }

    /// 空きスロットを 1 つ起こす。満杯なら None
    pub fn awaken(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        lifetime: f32,
        color: [f32; 4],
        size: f32,
    ) -> Option<usize> {
        let i = self.free_list.pop()?;
        self.positions[i]    = position;
        self.velocities[i]   = velocity;
        self.lifetime[i]     = lifetime;
        self.max_lifetime[i] = lifetime;
        self.gravity[i]      = 0.0;
        self.color[i]        = color;
        self.size[i]         = size;
        self.alive[i]        = true;
        self.count += 1;
        Some(i)
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive.get(i).copied().unwrap_or(false) {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    /// 全方向へ飛び散るバースト。実際に出せた数を返す
    pub fn emit(&mut self, origin: Vec2, count: usize, color: [f32; 4]) -> usize {
        let mut emitted = 0;
        for _ in 0..count {
            let vel = self.rng.unit_vec() * self.rng.range(50.0, 200.0);
            let lifetime = self.rng.range(0.3, 0.7);
            let size = self.rng.range(4.0, 8.0);
            let c = jitter(&mut self.rng, color);
            if self.awaken(origin, vel, lifetime, c, size).is_none() {
                break;
            }
            emitted += 1;
        }
        warn_if_exhausted(emitted, count);
        emitted
    }

    /// 上に跳ねてから落ちる破片
    pub fn emit_falling(&mut self, origin: Vec2, count: usize, color: [f32; 4]) -> usize {
        let mut emitted = 0;
        for _ in 0..count {
            let vel = Vec2::new(self.rng.range(-80.0, 80.0), self.rng.range(-220.0, -120.0));
            let lifetime = self.rng.range(0.5, 0.9);
            let size = self.rng.range(3.0, 6.0);
            let c = jitter(&mut self.rng, color);
            match self.awaken(origin, vel, lifetime, c, size) {
                Some(i) => self.gravity[i] = 500.0,
                None => break,
            }
            emitted += 1;
        }
        warn_if_exhausted(emitted, count);
        emitted
    }

    pub fn update(&mut self, dt: f32) {
        for i in 0..self.alive.len() {
            if !self.alive[i] {
                continue;
            }
            self.lifetime[i] -= dt;
            if self.lifetime[i] <= 0.0 {
                self.kill(i);
                continue;
            }
            self.velocities[i].y += self.gravity[i] * dt;
            self.positions[i] += self.velocities[i] * dt;
        }
    }

    /// 寿命に応じてアルファを落とした描画用データ
    pub fn iter_alive(&self) -> impl Iterator<Item = ParticleView> + '_ {
        (0..self.alive.len()).filter(|&i| self.alive[i]).map(move |i| {
            let alpha = (self.lifetime[i] / self.max_lifetime[i].max(f32::EPSILON)).clamp(0.0, 1.0);
            let mut color = self.color[i];
            color[3] *= alpha;
            ParticleView { position: self.positions[i], color, size: self.size[i] }
        })
    }
}

fn warn_if_exhausted(emitted: usize, requested: usize) {
    if emitted < requested {
        log::warn!("particle pool exhausted: {}/{} emitted", emitted, requested);
    }
}

/// 色を少しだけばらつかせる
fn jitter(rng: &mut SimpleRng, c: [f32; 4]) -> [f32; 4] {
    let d = rng.range(-0.1, 0.1);
    [
        (c[0] + d).clamp(0.0, 1.0),
        (c[1] + d).clamp(0.0, 1.0),
        (c[2] + d).clamp(0.0, 1.0),
        c[3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awaken_until_full() {
        let mut pool = ParticlePool::new(4, 1);
        for _ in 0..4 {
            assert!(pool.awaken(Vec2::ZERO, Vec2::X, 1.0, [1.0; 4], 2.0).is_some());
        }
        assert!(pool.awaken(Vec2::ZERO, Vec2::X, 1.0, [1.0; 4], 2.0).is_none());
        assert_eq!(pool.count(), 4);
        assert_eq!(pool.capacity(), 4);
    }

    #[test]
    fn kill_returns_slot() {
        let mut pool = ParticlePool::new(1, 1);
        let i = pool.awaken(Vec2::ZERO, Vec2::X, 1.0, [1.0; 4], 2.0).unwrap();
        pool.kill(i);
        pool.kill(i);
        assert_eq!(pool.count(), 0);
        assert!(pool.awaken(Vec2::ZERO, Vec2::X, 1.0, [1.0; 4], 2.0).is_some());
    }

    #[test]
    fn expired_particles_are_recycled() {
        let mut pool = ParticlePool::new(8, 7);
        assert_eq!(pool.emit(Vec2::ZERO, 8, [1.0, 0.0, 0.0, 1.0]), 8);
        pool.update(1.0);
        assert_eq!(pool.count(), 0);
        assert_eq!(pool.emit(Vec2::ZERO, 3, [1.0; 4]), 3);
    }

    #[test]
    fn emit_stops_at_capacity() {
        let mut pool = ParticlePool::new(5, 3);
        assert_eq!(pool.emit(Vec2::ZERO, 20, [1.0; 4]), 5);
        assert_eq!(pool.emit_falling(Vec2::ZERO, 2, [1.0; 4]), 0);
    }

    #[test]
    fn particles_move_and_fade() {
        let mut pool = ParticlePool::new(1, 1);
        pool.awaken(Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0, [1.0; 4], 2.0);
        pool.update(0.5);
        let v: Vec<ParticleView> = pool.iter_alive().collect();
        assert_eq!(v.len(), 1);
        assert!((v[0].position.x - 5.0).abs() < 0.001);
        assert!((v[0].color[3] - 0.5).abs() < 0.001);
    }
}
