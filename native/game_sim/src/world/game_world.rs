//! Path: native/game_sim/src/world/game_world.rs
//! Summary: ゲームワールド（エンティティの所有・型別リスト・遅延キュー・フェーズ・スポーン状態）
//!
//! 型別リスト（enemies / projectiles / bosses / orbs）は生成時の追加と
//! フレーム末の cleanup でしか変更しない。更新パス中の走査は snapshot で行う。

use super::camera::Camera;
use super::entity::{Entity, EntityId, EntityKind};
use super::frame_event::FrameEvent;
use super::player::PlayerBody;
use super::registry::EntityRegistry;
use crate::audio::{AudioQueue, TRACK_GAMEPLAY, TRACK_MENU};
use crate::input::InputSnapshot;
use crate::menu::Menu;
use game_core::constants::{DEFAULT_RNG_SEED, WORLD_HEIGHT, WORLD_WIDTH};
use game_core::physics::rng::SimpleRng;
use game_core::player::PlayerStats;
use game_core::spawn_rules::{SpawnOrder, SpawnSchedule};
use game_core::upgrade::Upgrade;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    MainMenu,
    Playing,
    Paused,
    UpgradeMenu,
    GameOver,
}

pub struct GameWorld {
    pub frame_id:            u64,
    pub(crate) registry:     EntityRegistry,
    player_id:               Option<EntityId>,
    /// パーティクルプールを持つ演出用エンティティ
    effects_id:              Option<EntityId>,
    /// ボスも含む
    enemies:                 Vec<EntityId>,
    projectiles:             Vec<EntityId>,
    bosses:                  Vec<EntityId>,
    orbs:                    Vec<EntityId>,
    pub rng:                 SimpleRng,
    seed:                    u64,
    pub camera:              Camera,
    pub input:               InputSnapshot,
    pub(crate) prev_input:   InputSnapshot,
    /// 更新パス中に得た経験値。パスの後でまとめて加算する
    pub(crate) pending_experience: Vec<f32>,
    /// このフレームで発生したイベント（毎フレーム drain される）
    pub(crate) frame_events: Vec<FrameEvent>,
    pub audio:               AudioQueue,
    pub phase:               GamePhase,
    pub menu:                Menu,
    /// 提示中のアップグレード（phase が UpgradeMenu のとき有効）
    pub upgrade_offers:      Vec<Upgrade>,
    pub schedule:            SpawnSchedule,
    pub elapsed_seconds:     f32,
    pub wave:                u32,
    /// ボスを出したウェーブ（同じウェーブで二度出さない）
    pub(crate) last_boss_wave: u32,
    pub kill_count:          u32,
    /// 直近フレームのステップ処理時間（ミリ秒）
    pub last_frame_time_ms:  f64,
    /// 型別リスト走査用の再利用バッファ
    pub(crate) query_buf:    Vec<EntityId>,
    removed_buf:             Vec<(EntityId, EntityKind)>,
    pub(crate) spawn_orders: Vec<SpawnOrder>,
    pub(crate) quit_requested: bool,
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new(DEFAULT_RNG_SEED)
    }
}

impl GameWorld {
    /// メインメニューから始まる空のワールド
    pub fn new(seed: u64) -> Self {
        let mut audio = AudioQueue::new();
        audio.play_track(TRACK_MENU);
        Self {
            frame_id:           0,
            registry:           EntityRegistry::new(),
            player_id:          None,
            effects_id:         None,
            enemies:            Vec::new(),
            projectiles:        Vec::new(),
            bosses:             Vec::new(),
            orbs:               Vec::new(),
            rng:                SimpleRng::new(seed),
            seed,
            camera:             Camera::new(world_center()),
            input:              InputSnapshot::default(),
            prev_input:         InputSnapshot::default(),
            pending_experience: Vec::new(),
            frame_events:       Vec::new(),
            audio,
            phase:              GamePhase::MainMenu,
            menu:               Menu::main(),
            upgrade_offers:     Vec::new(),
            schedule:           SpawnSchedule::default(),
            elapsed_seconds:    0.0,
            wave:               1,
            last_boss_wave:     0,
            kill_count:         0,
            last_frame_time_ms: 0.0,
            query_buf:          Vec::new(),
            removed_buf:        Vec::new(),
            spawn_orders:       Vec::new(),
            quit_requested:     false,
        }
    }

    /// 全エンティティと進行状況を捨て、プレイヤーを中央に置き直す
    pub fn reset_run(&mut self) {
        self.clear_entities();
        self.rng = SimpleRng::new(self.seed);
        self.schedule = SpawnSchedule::default();
        self.elapsed_seconds = 0.0;
        self.wave = 1;
        self.last_boss_wave = 0;
        self.kill_count = 0;
        self.upgrade_offers.clear();
        self.pending_experience.clear();
        self.camera = Camera::new(world_center());

        let effects = self.spawn_effects();
        self.effects_id = Some(effects);
        self.spawn_player(world_center(), PlayerStats::default());
    }

    pub fn start_run(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Playing;
        self.audio.play_track(TRACK_GAMEPLAY);
        log::info!("run started (seed={})", self.seed);
    }

    pub fn quit_to_menu(&mut self) {
        self.clear_entities();
        self.phase = GamePhase::MainMenu;
        self.menu = Menu::main();
        self.audio.play_track(TRACK_MENU);
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            self.menu = Menu::pause();
            self.audio.pause();
        }
    }

    pub fn resume(&mut self) {
        if matches!(self.phase, GamePhase::Paused | GamePhase::UpgradeMenu) {
            self.phase = GamePhase::Playing;
            self.audio.resume();
        }
    }

    fn clear_entities(&mut self) {
        self.registry.clear();
        self.player_id = None;
        self.effects_id = None;
        self.enemies.clear();
        self.projectiles.clear();
        self.bosses.clear();
        self.orbs.clear();
    }

    // ── 登録・削除 ────────────────────────────────────────────────

    /// 登録し、種類タグに応じて型別リストへ追加する
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let kind = entity.kind();
        let id = self.registry.insert(entity);
        match kind {
            EntityKind::Player => self.player_id = Some(id),
            EntityKind::Enemy => self.enemies.push(id),
            EntityKind::Boss => {
                self.enemies.push(id);
                self.bosses.push(id);
            }
            EntityKind::Projectile => self.projectiles.push(id),
            EntityKind::Orb => self.orbs.push(id),
            EntityKind::Effect | EntityKind::DelayedExplosion | EntityKind::FloatingText => {}
        }
        id
    }

    /// Destroy 状態のエンティティを削除する（フレーム末に 1 回だけ呼ぶ）
    pub(crate) fn cleanup(&mut self) {
        let mut removed = std::mem::take(&mut self.removed_buf);
        removed.clear();
        self.registry.sweep_destroyed(&mut removed);
        let mut touched = [false; 4];
        for &(id, kind) in &removed {
            self.on_removed(id, kind, &mut touched);
        }
        let registry = &self.registry;
        if touched[0] {
            self.enemies.retain(|id| registry.contains(*id));
        }
        if touched[1] {
            self.bosses.retain(|id| registry.contains(*id));
        }
        if touched[2] {
            self.projectiles.retain(|id| registry.contains(*id));
        }
        if touched[3] {
            self.orbs.retain(|id| registry.contains(*id));
        }
        self.removed_buf = removed;
    }

    /// 削除時フック。種類タグで振り分け、型別リストの掃除対象に印を付ける
    fn on_removed(&mut self, id: EntityId, kind: EntityKind, touched: &mut [bool; 4]) {
        match kind {
            EntityKind::Player => {
                if self.player_id == Some(id) {
                    self.player_id = None;
                }
            }
            EntityKind::Effect => {
                if self.effects_id == Some(id) {
                    self.effects_id = None;
                }
            }
            EntityKind::Enemy => touched[0] = true,
            EntityKind::Boss => {
                touched[0] = true;
                touched[1] = true;
            }
            EntityKind::Projectile => touched[2] = true,
            EntityKind::Orb => touched[3] = true,
            EntityKind::DelayedExplosion | EntityKind::FloatingText => {}
        }
    }

    // ── 参照 ──────────────────────────────────────────────────────

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.registry.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.registry.get_mut(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.registry.iter()
    }

    pub fn entity_count(&self) -> usize {
        self.registry.len()
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player_id
    }

    pub fn player(&self) -> Option<&PlayerBody> {
        self.player_id
            .and_then(|id| self.registry.get(id))
            .and_then(|e| e.body.as_player())
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerBody> {
        let id = self.player_id?;
        self.registry.get_mut(id).and_then(|e| e.body.as_player_mut())
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.player_id
            .and_then(|id| self.registry.get(id))
            .map(|e| e.position())
    }

    pub fn enemies(&self) -> &[EntityId] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[EntityId] {
        &self.projectiles
    }

    pub fn bosses(&self) -> &[EntityId] {
        &self.bosses
    }

    pub fn orbs(&self) -> &[EntityId] {
        &self.orbs
    }

    pub fn effects_id(&self) -> Option<EntityId> {
        self.effects_id
    }

    /// 生きたボスがいるか（通常スポーンを止める条件）
    pub fn has_live_boss(&self) -> bool {
        self.bosses.iter().any(|&id| self.live_enemy(id).is_some())
    }

    /// Active で HP が残っている敵（ボス含む）
    pub fn live_enemy(&self, id: EntityId) -> Option<&Entity> {
        self.registry.get(id).filter(|e| {
            e.is_active() && e.body.as_enemy().map(|en| en.health > 0.0).unwrap_or(false)
        })
    }

    /// 型別の敵リストを再利用バッファへ写す。使い終わったら `recycle_query_buf` で返す
    pub(crate) fn snapshot_enemies(&mut self) -> Vec<EntityId> {
        let mut buf = std::mem::take(&mut self.query_buf);
        buf.clear();
        buf.extend_from_slice(&self.enemies);
        buf
    }

    pub(crate) fn recycle_query_buf(&mut self, buf: Vec<EntityId>) {
        if buf.capacity() >= self.query_buf.capacity() {
            self.query_buf = buf;
        }
    }

    // ── 遅延キュー・イベント ──────────────────────────────────────

    /// 経験値は更新パスの後でまとめて加算する
    pub fn queue_experience(&mut self, amount: f32) {
        if amount > 0.0 {
            self.pending_experience.push(amount);
        }
    }

    pub fn pending_experience(&self) -> &[f32] {
        &self.pending_experience
    }

    pub fn push_event(&mut self, event: FrameEvent) {
        self.frame_events.push(event);
    }

    pub fn frame_events(&self) -> &[FrameEvent] {
        &self.frame_events
    }

    pub fn shake(&mut self, intensity: f32, duration: f32) {
        self.camera.shake(intensity, duration);
    }

    /// プレイヤーにダメージ。プレイヤーがいなければ何もしない
    pub fn damage_player(&mut self, amount: f32) -> f32 {
        use super::combat::Combatant;
        let dealt = match self.player_mut() {
            Some(p) if !p.is_dead() => p.take_damage(amount),
            _ => 0.0,
        };
        if dealt > 0.0 {
            self.frame_events.push(FrameEvent::PlayerDamaged { amount: dealt });
        }
        dealt
    }

    pub fn heal_player(&mut self, amount: f32) {
        use super::combat::Combatant;
        if let Some(p) = self.player_mut() {
            if !p.is_dead() {
                p.heal(amount);
            }
        }
    }

    pub fn emit_particles(&mut self, origin: Vec2, count: usize, color: [f32; 4]) {
        if let Some(pool) = self.effects_pool() {
            pool.emit(origin, count, color);
        }
    }

    pub fn emit_falling_particles(&mut self, origin: Vec2, count: usize, color: [f32; 4]) {
        if let Some(pool) = self.effects_pool() {
            pool.emit_falling(origin, count, color);
        }
    }

    fn effects_pool(&mut self) -> Option<&mut super::particle::ParticlePool> {
        let id = self.effects_id?;
        self.registry.get_mut(id)?.modules.particles_mut()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// メインメニューで Quit を選んだ
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

pub fn world_center() -> Vec2 {
    Vec2::new(WORLD_WIDTH * 0.5, WORLD_HEIGHT * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::entity::Body;
    use crate::world::enemy::Enemy;
    use game_core::enemy::EnemyKind;

    #[test]
    fn new_world_waits_in_main_menu() {
        let w = GameWorld::new(1);
        assert_eq!(w.phase, GamePhase::MainMenu);
        assert!(w.player_id().is_none());
        assert_eq!(w.audio.current_track(), Some(TRACK_MENU));
    }

    #[test]
    fn start_run_places_player() {
        let mut w = GameWorld::new(1);
        w.start_run();
        assert_eq!(w.phase, GamePhase::Playing);
        assert!(w.player().is_some());
        assert!(w.effects_id().is_some());
        assert_eq!(w.audio.current_track(), Some(TRACK_GAMEPLAY));
    }

    #[test]
    fn typed_lists_follow_kind_tag() {
        let mut w = GameWorld::new(1);
        w.reset_run();
        let e = w.add(Entity::new(Body::Enemy(Enemy::new(EnemyKind::Grunt, 1)), Vec2::ZERO));
        assert_eq!(w.enemies(), &[e]);
        if let Some(ent) = w.entity_mut(e) {
            ent.destroy();
        }
        // cleanup までは残る
        assert_eq!(w.enemies().len(), 1);
        w.cleanup();
        assert!(w.enemies().is_empty());
        assert!(w.entity(e).is_none());
    }

    #[test]
    fn damage_player_without_player_is_noop() {
        let mut w = GameWorld::new(1);
        assert!(w.damage_player(10.0).abs() < 0.001);
        assert!(w.frame_events().is_empty());
    }

    #[test]
    fn pause_and_resume_toggle_audio() {
        let mut w = GameWorld::new(1);
        w.start_run();
        w.pause();
        assert_eq!(w.phase, GamePhase::Paused);
        assert!(w.audio.is_paused());
        w.resume();
        assert_eq!(w.phase, GamePhase::Playing);
        assert!(!w.audio.is_paused());
    }
}
