//! Path: native/game_sim/src/render_snapshot.rs
//! Summary: GameWorld から描画用スナップショットを構築（図形・スプライト・パーティクル・文字・HUD・メニュー）
//!
//! 描画側がワールドを保持し続けないよう、必要なデータを RenderFrame にコピーして渡す。

use crate::menu::MenuKind;
use crate::world::{Body, Combatant, GamePhase, GameWorld, Module, ParticleView};
use glam::Vec2;

/// 1 つの描画要素の中身
#[derive(Clone, Debug, PartialEq)]
pub enum DrawShape {
    /// ワールド座標に変換済みの頂点列
    Polygon { vertices: Vec<Vec2>, filled: bool },
    Sprite { sheet: &'static str, frame: u16, size: Vec2 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub position:   Vec2,
    pub rotation:   f32,
    pub scale:      f32,
    pub shape:      DrawShape,
    pub color:      [f32; 4],
    /// false なら画面座標
    pub use_camera: bool,
    pub priority:   i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextView {
    pub text:     String,
    pub position: Vec2,
    pub color:    [f32; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct BossHud {
    pub name:       &'static str,
    pub health:     f32,
    pub max_health: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudData {
    pub health:          f32,
    pub max_health:      f32,
    pub level:           u32,
    pub experience:      f32,
    pub exp_to_next:     f32,
    pub wave:            u32,
    pub kills:           u32,
    pub elapsed_seconds: f32,
    pub enemy_count:     usize,
    pub bosses:          Vec<BossHud>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuView {
    pub kind:     MenuKind,
    pub title:    &'static str,
    pub items:    Vec<String>,
    pub selected: usize,
}

#[derive(Clone, Debug, Default)]
pub struct RenderFrame {
    /// priority 昇順（同順位は登録順）
    pub draw_calls:    Vec<DrawCall>,
    pub particles:     Vec<ParticleView>,
    pub texts:         Vec<TextView>,
    /// 揺れ込みのカメラ左上
    pub camera_origin: Vec2,
    pub hud:           HudData,
    /// プレイ中以外で表示するメニュー
    pub menu:          Option<MenuView>,
}

/// GameWorld から RenderFrame を構築する
pub fn build_render_frame(w: &GameWorld) -> RenderFrame {
    let mut draw_calls = Vec::with_capacity(w.entity_count());
    let mut particles = Vec::new();
    let mut texts = Vec::new();

    for e in w.entities() {
        if !e.is_active() {
            continue;
        }
        let t = &e.transform;
        for m in e.modules.iter() {
            match m {
                Module::Renderer(r) if r.visible => draw_calls.push(DrawCall {
                    position:   t.position,
                    rotation:   t.rotation,
                    scale:      t.scale,
                    shape:      DrawShape::Polygon {
                        vertices: r.vertices.iter().map(|v| t.position + *v * t.scale).collect(),
                        filled:   r.filled,
                    },
                    color:      r.color,
                    use_camera: r.use_camera,
                    priority:   r.priority,
                }),
                Module::Animated(a) => {
                    if let Some(frame) = a.current_frame() {
                        draw_calls.push(DrawCall {
                            position:   t.position,
                            rotation:   t.rotation,
                            scale:      t.scale,
                            shape:      DrawShape::Sprite { sheet: a.sheet, frame, size: a.size },
                            color:      a.color,
                            use_camera: a.use_camera,
                            priority:   a.priority,
                        });
                    }
                }
                Module::Particles(p) => particles.extend(p.iter_alive()),
                _ => {}
            }
        }
        if let Body::FloatingText(ft) = &e.body {
            let mut color = ft.color;
            color[3] *= ft.alpha();
            texts.push(TextView { text: ft.text.clone(), position: t.position, color });
        }
    }
    // 安定ソートなので同順位は登録順のまま
    draw_calls.sort_by_key(|d| d.priority);

    RenderFrame {
        draw_calls,
        particles,
        texts,
        camera_origin: w.camera.view_origin(),
        hud: build_hud(w),
        menu: build_menu(w),
    }
}

fn build_hud(w: &GameWorld) -> HudData {
    let bosses = w
        .bosses()
        .iter()
        .filter_map(|&id| w.live_enemy(id))
        .filter_map(|e| match &e.body {
            Body::Boss(b) => Some(BossHud {
                name:       b.name(),
                health:     b.health(),
                max_health: b.max_health(),
            }),
            _ => None,
        })
        .collect();

    let mut hud = HudData {
        wave: w.wave,
        kills: w.kill_count,
        elapsed_seconds: w.elapsed_seconds,
        enemy_count: w.enemies().len(),
        bosses,
        ..Default::default()
    };
    if let Some(p) = w.player() {
        hud.health = p.health();
        hud.max_health = p.max_health();
        hud.level = p.stats.level;
        hud.experience = p.stats.experience;
        hud.exp_to_next = p.stats.exp_to_next;
    }
    hud
}

fn build_menu(w: &GameWorld) -> Option<MenuView> {
    if w.phase == GamePhase::Playing {
        return None;
    }
    Some(MenuView {
        kind:     w.menu.kind,
        title:    w.menu.title,
        items:    w.menu.items().iter().map(|i| i.label.clone()).collect(),
        selected: w.menu.selected(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::boss::BossKind;
    use game_core::enemy::EnemyKind;

    #[test]
    fn main_menu_frame_has_menu_and_no_entities() {
        let w = GameWorld::new(1);
        let f = build_render_frame(&w);
        assert!(f.draw_calls.is_empty());
        let menu = f.menu.map(|m| (m.kind, m.items.len()));
        assert_eq!(menu, Some((MenuKind::Main, 2)));
    }

    #[test]
    fn draw_calls_are_sorted_by_priority() {
        let mut w = GameWorld::new(1);
        w.start_run();
        w.spawn_enemy(EnemyKind::Grunt, Vec2::new(100.0, 100.0), 1);
        w.spawn_delayed_explosion(Vec2::new(200.0, 200.0), 1.0, 40.0, 10.0);
        let f = build_render_frame(&w);
        assert!(f.draw_calls.len() >= 3);
        assert!(f.draw_calls.windows(2).all(|p| p[0].priority <= p[1].priority));
        assert!(f.menu.is_none());
    }

    #[test]
    fn hud_reports_player_and_bosses() {
        let mut w = GameWorld::new(1);
        w.start_run();
        w.spawn_boss(BossKind::Sprayer, Vec2::new(300.0, 300.0), 10);
        let f = build_render_frame(&w);
        assert!((f.hud.health - 100.0).abs() < 0.001);
        assert_eq!(f.hud.level, 1);
        assert_eq!(f.hud.bosses.len(), 1);
        assert_eq!(f.hud.bosses[0].name, BossKind::Sprayer.name());
    }

    #[test]
    fn floating_text_is_copied() {
        let mut w = GameWorld::new(1);
        w.start_run();
        w.spawn_floating_text(Vec2::new(50.0, 50.0), "CHAIN!", [1.0; 4]);
        let f = build_render_frame(&w);
        assert_eq!(f.texts.len(), 1);
        assert_eq!(f.texts[0].text, "CHAIN!");
    }
}
