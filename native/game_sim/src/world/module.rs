//! Path: native/game_sim/src/world/module.rs
//! Summary: エンティティに付けるモジュール（形状描画・スプライトアニメ・物理積分・円コライダー・パーティクルプール）
//!
//! priority の小さい順に更新・描画される。

use super::entity::Transform;
use super::particle::ParticlePool;
use game_core::constants::{MAX_VELOCITY, VELOCITY_EPSILON};
use game_core::physics::circles_overlap;
use glam::Vec2;
use rustc_hash::FxHashMap;

pub const PHYSICS_PRIORITY:   i32 = 10;
pub const PARTICLE_PRIORITY:  i32 = 20;
pub const COLLIDER_PRIORITY:  i32 = 50;
pub const ANIMATION_PRIORITY: i32 = 90;
pub const RENDER_PRIORITY:    i32 = 100;

/// 頂点列 + 色で描く図形（塗りつぶし or 線）
#[derive(Clone, Debug)]
pub struct ShapeRenderer {
    pub vertices:   Vec<Vec2>,
    pub color:      [f32; 4],
    pub filled:     bool,
    /// false なら画面座標（HUD 用）
    pub use_camera: bool,
    pub visible:    bool,
    pub priority:   i32,
}

impl ShapeRenderer {
    pub fn new(vertices: Vec<Vec2>, color: [f32; 4], filled: bool) -> Self {
        Self {
            vertices,
            color,
            filled,
            use_camera: true,
            visible:    true,
            priority:   RENDER_PRIORITY,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 中心原点の正多角形
    pub fn polygon(radius: f32, sides: usize, color: [f32; 4], filled: bool) -> Self {
        Self::new(regular_polygon(radius, sides), color, filled)
    }
}

pub fn regular_polygon(radius: f32, sides: usize) -> Vec<Vec2> {
    let sides = sides.max(3);
    (0..sides)
        .map(|i| Vec2::from_angle(i as f32 * std::f32::consts::TAU / sides as f32) * radius)
        .collect()
}

/// スプライトシートのフレーム列を名前で切り替えて再生する
#[derive(Clone, Debug)]
pub struct AnimatedRenderer {
    pub sheet:      &'static str,
    animations:     FxHashMap<&'static str, Vec<u16>>,
    current:        &'static str,
    pub fps:        f32,
    /// フレーム位置（小数部は次フレームまでの進み）
    timer:          f32,
    pub paused:     bool,
    pub size:       Vec2,
    pub color:      [f32; 4],
    pub use_camera: bool,
    pub priority:   i32,
}

impl AnimatedRenderer {
    pub fn new(sheet: &'static str, size: Vec2, fps: f32) -> Self {
        Self {
            sheet,
            animations: FxHashMap::default(),
            current:    "",
            fps,
            timer:      0.0,
            paused:     false,
            size,
            color:      [1.0; 4],
            use_camera: true,
            priority:   RENDER_PRIORITY,
        }
    }

    pub fn add_animation(&mut self, name: &'static str, frames: Vec<u16>) {
        if self.current.is_empty() {
            self.current = name;
        }
        self.animations.insert(name, frames);
    }

    pub fn with_animation(mut self, name: &'static str, frames: Vec<u16>) -> Self {
        self.add_animation(name, frames);
        self
    }

    /// 未登録の名前は無視する。同じ名前なら位置を保つ
    pub fn set_animation(&mut self, name: &'static str) {
        if self.current != name && self.animations.contains_key(name) {
            self.current = name;
            self.timer = 0.0;
        }
    }

    pub fn current_animation(&self) -> &'static str {
        self.current
    }

    /// 現在表示するシート上のフレーム番号
    pub fn current_frame(&self) -> Option<u16> {
        let frames = self.animations.get(self.current)?;
        if frames.is_empty() {
            return None;
        }
        frames.get(self.timer as usize % frames.len()).copied()
    }

    fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        let Some(len) = self.animations.get(self.current).map(|f| f.len()) else {
            return;
        };
        if len == 0 {
            return;
        }
        self.timer = (self.timer + dt * self.fps).rem_euclid(len as f32);
    }
}

/// 速度・加速度・質量を持ち、毎フレーム位置を積分する
#[derive(Clone, Debug)]
pub struct PhysicsIntegrator {
    pub velocity:      Vec2,
    acceleration:      Vec2,
    mass:              f32,
    pub max_speed:     f32,
    pub angular_speed: f32,
    pub priority:      i32,
}

impl PhysicsIntegrator {
    pub fn new(mass: f32) -> Self {
        debug_assert!(mass > 0.0, "PhysicsIntegrator mass must be positive");
        Self {
            velocity:      Vec2::ZERO,
            acceleration:  Vec2::ZERO,
            mass,
            max_speed:     MAX_VELOCITY,
            angular_speed: 0.0,
            priority:      PHYSICS_PRIORITY,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force / self.mass;
    }

    fn update(&mut self, transform: &mut Transform, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.velocity = self.velocity.clamp_length_max(self.max_speed);
        transform.position += self.velocity * dt;
        self.acceleration = Vec2::ZERO;
        if self.velocity.x.abs() < VELOCITY_EPSILON {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < VELOCITY_EPSILON {
            self.velocity.y = 0.0;
        }
        transform.rotation += self.angular_speed * dt;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CircleCollider {
    pub radius:   f32,
    pub priority: i32,
}

impl CircleCollider {
    pub fn new(radius: f32) -> Self {
        Self { radius, priority: COLLIDER_PRIORITY }
    }

    /// 所有者の位置同士で円の交差を判定する
    pub fn intersect(&self, own_pos: Vec2, other: &CircleCollider, other_pos: Vec2) -> bool {
        circles_overlap(own_pos, self.radius, other_pos, other.radius)
    }
}

pub enum Module {
    Renderer(ShapeRenderer),
    Animated(AnimatedRenderer),
    Physics(PhysicsIntegrator),
    Collider(CircleCollider),
    Particles(ParticlePool),
}

impl Module {
    pub fn priority(&self) -> i32 {
        match self {
            Self::Renderer(m)  => m.priority,
            Self::Animated(m)  => m.priority,
            Self::Physics(m)   => m.priority,
            Self::Collider(m)  => m.priority,
            Self::Particles(m) => m.priority,
        }
    }

    fn update(&mut self, transform: &mut Transform, dt: f32) {
        match self {
            Self::Physics(m)   => m.update(transform, dt),
            Self::Animated(m)  => m.update(dt),
            Self::Particles(m) => m.update(dt),
            Self::Renderer(_) | Self::Collider(_) => {}
        }
    }
}

/// priority 昇順に並んだモジュール列
#[derive(Default)]
pub struct ModuleList {
    modules: Vec<Module>,
}

impl ModuleList {
    pub fn attach(&mut self, module: Module) {
        self.modules.push(module);
        self.modules.sort_by_key(|m| m.priority());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub(crate) fn update(&mut self, transform: &mut Transform, dt: f32) {
        debug_assert!(dt.is_finite(), "module update with non-finite dt");
        for m in self.modules.iter_mut() {
            m.update(transform, dt);
        }
    }

    pub fn physics(&self) -> Option<&PhysicsIntegrator> {
        self.modules.iter().find_map(|m| match m {
            Module::Physics(p) => Some(p),
            _ => None,
        })
    }

    pub fn physics_mut(&mut self) -> Option<&mut PhysicsIntegrator> {
        self.modules.iter_mut().find_map(|m| match m {
            Module::Physics(p) => Some(p),
            _ => None,
        })
    }

    pub fn collider(&self) -> Option<&CircleCollider> {
        self.modules.iter().find_map(|m| match m {
            Module::Collider(c) => Some(c),
            _ => None,
        })
    }

    pub fn renderer_mut(&mut self) -> Option<&mut ShapeRenderer> {
        self.modules.iter_mut().find_map(|m| match m {
            Module::Renderer(r) => Some(r),
            _ => None,
        })
    }

    pub fn animated_mut(&mut self) -> Option<&mut AnimatedRenderer> {
        self.modules.iter_mut().find_map(|m| match m {
            Module::Animated(a) => Some(a),
            _ => None,
        })
    }

    pub fn particles_mut(&mut self) -> Option<&mut ParticlePool> {
        self.modules.iter_mut().find_map(|m| match m {
            Module::Particles(p) => Some(p),
            _ => None,
        })
    }

    /// 速度を設定する（物理モジュールがなければ何もしない）
    pub fn set_velocity(&mut self, velocity: Vec2) {
        if let Some(p) = self.physics_mut() {
            p.velocity = velocity;
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.physics().map(|p| p.velocity).unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_sorts_by_priority() {
        let mut list = ModuleList::default();
        list.attach(Module::Renderer(ShapeRenderer::polygon(5.0, 6, [1.0; 4], true)));
        list.attach(Module::Collider(CircleCollider::new(5.0)));
        list.attach(Module::Physics(PhysicsIntegrator::new(1.0)));
        let order: Vec<i32> = list.iter().map(|m| m.priority()).collect();
        assert_eq!(order, vec![PHYSICS_PRIORITY, COLLIDER_PRIORITY, RENDER_PRIORITY]);
    }

    #[test]
    fn force_is_divided_by_mass() {
        let mut p = PhysicsIntegrator::new(2.0);
        p.apply_force(Vec2::new(10.0, 0.0));
        assert!((p.acceleration().x - 5.0).abs() < 0.001);
    }

    #[test]
    fn integrate_then_reset_acceleration() {
        let mut p = PhysicsIntegrator::new(1.0);
        let mut t = Transform::at(Vec2::ZERO);
        p.apply_force(Vec2::new(100.0, 0.0));
        p.update(&mut t, 0.1);
        assert!((p.velocity.x - 10.0).abs() < 0.001);
        assert!((t.position.x - 1.0).abs() < 0.001);
        assert_eq!(p.acceleration(), Vec2::ZERO);
    }

    #[test]
    fn speed_is_clamped() {
        let mut p = PhysicsIntegrator::new(1.0).with_velocity(Vec2::new(MAX_VELOCITY * 3.0, 0.0));
        let mut t = Transform::at(Vec2::ZERO);
        p.update(&mut t, 0.01);
        assert!((p.velocity.length() - MAX_VELOCITY).abs() < 0.01);
    }

    #[test]
    fn tiny_velocity_snaps_to_zero() {
        let mut p = PhysicsIntegrator::new(1.0).with_velocity(Vec2::new(0.005, 3.0));
        let mut t = Transform::at(Vec2::ZERO);
        p.update(&mut t, 0.016);
        assert_eq!(p.velocity.x, 0.0);
        assert!((p.velocity.y - 3.0).abs() < 0.001);
    }

    #[test]
    fn rotation_integrates_angular_speed() {
        let mut p = PhysicsIntegrator::new(1.0);
        p.angular_speed = 2.0;
        let mut t = Transform::at(Vec2::ZERO);
        p.update(&mut t, 0.5);
        assert!((t.rotation - 1.0).abs() < 0.001);
    }

    #[test]
    fn animation_wraps_frames() {
        let mut a = AnimatedRenderer::new("enemies", Vec2::splat(32.0), 10.0)
            .with_animation("walk", vec![4, 5, 6]);
        assert_eq!(a.current_frame(), Some(4));
        a.update(0.15);
        assert_eq!(a.current_frame(), Some(5));
        a.update(0.2);
        // 3.5 → 0.5
        assert_eq!(a.current_frame(), Some(4));
    }

    #[test]
    fn unknown_animation_is_ignored() {
        let mut a = AnimatedRenderer::new("player", Vec2::splat(32.0), 8.0)
            .with_animation("idle", vec![0])
            .with_animation("run", vec![1, 2]);
        a.set_animation("fly");
        assert_eq!(a.current_animation(), "idle");
        a.set_animation("run");
        assert_eq!(a.current_frame(), Some(1));
    }

    #[test]
    fn collider_intersect_uses_radius_sum() {
        let a = CircleCollider::new(10.0);
        let b = CircleCollider::new(6.0);
        assert!(a.intersect(Vec2::ZERO, &b, Vec2::new(16.0, 0.0)));
        assert!(!a.intersect(Vec2::ZERO, &b, Vec2::new(16.5, 0.0)));
    }
}
