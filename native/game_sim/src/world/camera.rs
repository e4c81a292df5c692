//! Path: native/game_sim/src/world/camera.rs
//! Summary: プレイヤー追従カメラと画面揺れ

use game_core::constants::{CAMERA_LERP_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH};
use game_core::physics::rng::SimpleRng;
use glam::Vec2;

#[derive(Clone, Debug, Default)]
pub struct Camera {
    /// 画面中央が映すワールド座標
    pub center:      Vec2,
    shake_intensity: f32,
    shake_timer:     f32,
    shake_offset:    Vec2,
}

impl Camera {
    pub fn new(center: Vec2) -> Self {
        Self { center, ..Self::default() }
    }

    /// 揺れを要求する。揺れている最中は強い方を残す。
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        if self.shake_timer <= 0.0 || intensity >= self.shake_intensity {
            self.shake_intensity = intensity;
            self.shake_timer = duration;
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_timer > 0.0
    }

    pub fn shake_intensity(&self) -> f32 {
        if self.is_shaking() { self.shake_intensity } else { 0.0 }
    }

    /// 目標へ `5·dt` で寄せ、揺れを進める
    pub fn update(&mut self, target: Vec2, dt: f32, rng: &mut SimpleRng) {
        let t = (CAMERA_LERP_SPEED * dt).min(1.0);
        self.center += (target - self.center) * t;

        if self.shake_timer > 0.0 {
            self.shake_timer -= dt;
            if self.shake_timer <= 0.0 {
                self.shake_intensity = 0.0;
                self.shake_offset = Vec2::ZERO;
            } else {
                self.shake_offset = rng.unit_vec() * self.shake_intensity * rng.next_f32();
            }
        }
    }

    pub fn shake_offset(&self) -> Vec2 {
        self.shake_offset
    }

    /// 画面左上に対応するワールド座標（揺れ込み）
    pub fn view_origin(&self) -> Vec2 {
        self.center + self.shake_offset - Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) * 0.5
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        p - self.view_origin()
    }
}
