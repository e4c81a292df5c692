//! Path: native/game_core/src/constants.rs
//! Summary: ワールドサイズ・画面解像度・戦闘パラメータ・フレーム制御などの定数定義

// Window resolution
pub const SCREEN_WIDTH:  f32 = 1024.0;
pub const SCREEN_HEIGHT: f32 = 768.0;

// World size (camera scrolls inside this rectangle)
pub const WORLD_WIDTH:  f32 = 4000.0;
pub const WORLD_HEIGHT: f32 = 4000.0;

// Camera lerp speed
pub const CAMERA_LERP_SPEED: f32 = 5.0;

// Frame pacing: 最低 16ms / フレーム、dt は 0.05s でクランプ
pub const MIN_FRAME_MS: u64 = 16;
pub const MAX_DELTA_SECS: f32 = 0.05;
/// これを超えたフレームは warn を出す
pub const FRAME_BUDGET_MS: f64 = 16.0;

// Physics integrator
pub const MAX_VELOCITY:      f32 = 1500.0;
pub const VELOCITY_EPSILON:  f32 = 0.01;

// Player
pub const PLAYER_RADIUS:          f32 = 16.0;
pub const PLAYER_MAX_HEALTH:      f32 = 100.0;
pub const PLAYER_MOVE_SPEED:      f32 = 300.0;
pub const PLAYER_PROJECTILES:     u32 = 8;
pub const PLAYER_REGEN_RATE:      f32 = 5.0;
pub const PLAYER_CRIT_MULTIPLIER: f32 = 2.0;
pub const PLAYER_LIFESTEAL:       f32 = 0.1;
pub const PLAYER_ORBITALS:        u32 = 4;
pub const PLAYER_DASH_SPEED:      f32 = 900.0;
pub const PLAYER_DASH_DURATION:   f32 = 0.15;
pub const PLAYER_DASH_COOLDOWN:   f32 = 2.0;
/// 砲口オフセット（プレイヤー半径の外側から弾を出す）
pub const MUZZLE_OFFSET:          f32 = 10.0;

// Player weapon
pub const BASE_ATTACK_COOLDOWN: f32 = 0.5;
pub const BASE_SHOT_SPEED:      f32 = 800.0;
pub const BASE_SHOT_DAMAGE:     f32 = 20.0;
pub const FAN_SPREAD:           f32 = 0.3;
pub const SHOTGUN_SPEED:        f32 = 1200.0;
pub const SHOTGUN_DAMAGE:       f32 = 12.0;
pub const SPIRAL_STEP:          f32 = 0.5;
pub const SPIRAL_DAMAGE:        f32 = 16.0;
pub const REVERSE_DAMAGE_SCALE: f32 = 0.8;
pub const ORBITAL_RADIUS:       f32 = 40.0;
pub const ORBITAL_ANGULAR_SPEED: f32 = 3.0;
pub const ORBITAL_FIRE_INTERVAL: f32 = 0.3;
pub const ORBITAL_DAMAGE:       f32 = 16.0;

// Projectile
pub const PROJECTILE_RADIUS:       f32 = 8.0;
pub const PROJECTILE_LIFETIME:     f32 = 2.0;
pub const PROJECTILE_BOUNDS_MARGIN: f32 = 100.0;
pub const HOMING_TURN_RATE:        f32 = 4.5;
pub const HOMING_RANGE:            f32 = 200.0;
pub const EXPLOSION_RADIUS:        f32 = 80.0;
/// 爆発ダメージの距離減衰: damage * (1 - FALLOFF * d / r)
pub const EXPLOSION_FALLOFF:       f32 = 0.4;
/// 連鎖爆発は半径・ダメージとも半分
pub const CHAIN_SCALE:             f32 = 0.5;
/// この数を超える敵を巻き込むと "CHAIN!" を表示
pub const CHAIN_TEXT_THRESHOLD:    usize = 3;

// Enemy
/// 接触判定距離 = 敵半径 + CONTACT_REACH
pub const CONTACT_REACH:           f32 = 15.0;
pub const ENEMY_MUZZLE_GAP:        f32 = 6.0;
pub const WORLD_EDGE_MARGIN:       f32 = 20.0;

// Experience orb
pub const ORB_RADIUS:        f32 = 8.0;
pub const ORB_LIFETIME:      f32 = 20.0;
pub const ORB_MAGNET_RANGE:  f32 = 250.0;
pub const ORB_MAGNET_PULL:   f32 = 800.0;
pub const ORB_MAX_SPEED:     f32 = 450.0;
pub const ORB_FRICTION:      f32 = 2.0;
pub const ORB_REST_SPEED:    f32 = 5.0;

// Delayed explosion
pub const DELAYED_EXPLOSION_DAMAGE: f32 = 30.0;

// Waves and spawning
pub const WAVE_DURATION_SECS:   f32 = 30.0;
pub const BASE_POPULATION_CAP:  usize = 300;
pub const POPULATION_CAP_PER_WAVE: usize = 20;
pub const SPAWN_DISTANCE:       f32 = 350.0;
pub const SPAWN_DISTANCE_JITTER: f32 = 50.0;
/// ボスは BOSS_WAVE_INTERVAL ウェーブごとに出現
pub const BOSS_WAVE_INTERVAL:   u32 = 5;

// Experience curve
pub const BASE_EXP_TO_NEXT: f32 = 100.0;
pub const EXP_GROWTH:       f32 = 1.5;

// Menus
pub const MENU_INPUT_DEBOUNCE: f32 = 0.2;
pub const UPGRADE_OFFER_COUNT: usize = 3;

/// エフェクト用パーティクルプールの容量
pub const EFFECT_PARTICLE_CAPACITY: usize = 1024;

/// デフォルト RNG シード
pub const DEFAULT_RNG_SEED: u64 = 67890;
