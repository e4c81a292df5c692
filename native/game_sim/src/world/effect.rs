//! Path: native/game_sim/src/world/effect.rs
//! Summary: 時限爆発（予告リング → 起爆）と浮遊テキスト

/// 遅延後に起爆する爆発。ボスの爆撃・地雷が置く。
pub struct DelayedExplosion {
    /// 起爆までの残り時間
    pub timer:  f32,
    pub delay:  f32,
    pub radius: f32,
    pub damage: f32,
}

impl DelayedExplosion {
    pub fn new(delay: f32, radius: f32, damage: f32) -> Self {
        Self { timer: delay, delay, radius, damage }
    }

    /// タイマーを進め、起爆するフレームなら true
    pub fn tick(&mut self, dt: f32) -> bool {
        self.timer -= dt;
        self.timer <= 0.0
    }

    /// 予告の進み具合 0..1（リングの点滅・塗りに使う）
    pub fn progress(&self) -> f32 {
        if self.delay <= 0.0 {
            return 1.0;
        }
        (1.0 - self.timer / self.delay).clamp(0.0, 1.0)
    }
}

/// 上昇しながら消える文字列
pub struct FloatingText {
    pub text:       String,
    pub color:      [f32; 4],
    pub rise_speed: f32,
    pub duration:   f32,
    pub age:        f32,
}

impl FloatingText {
    pub fn new(text: impl Into<String>, color: [f32; 4], duration: f32) -> Self {
        Self { text: text.into(), color, rise_speed: 40.0, duration, age: 0.0 }
    }

    pub fn alpha(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.duration).clamp(0.0, 1.0)
    }
}
