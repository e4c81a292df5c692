//! フレームステップのベンチマーク: 敵が密集した状態での 1 フレーム

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use game_sim::{step_frame, EnemyKind, GameWorld};
use glam::Vec2;

fn setup_world(n: usize) -> GameWorld {
    let mut w = GameWorld::new(7);
    w.start_run();
    let center = w.player_position().unwrap_or(Vec2::splat(2000.0));
    for i in 0..n {
        let angle = i as f32 * 0.37;
        let dist = 150.0 + (i % 50) as f32 * 8.0;
        let kind = EnemyKind::ALL[i % EnemyKind::ALL.len()];
        w.spawn_enemy(kind, center + Vec2::from_angle(angle) * dist, 1);
    }
    w
}

fn bench_frame(c: &mut Criterion) {
    let dt = 0.016;

    c.bench_function("step_frame_300_enemies", |b| {
        b.iter_batched(
            || setup_world(300),
            |mut w| {
                step_frame(&mut w, dt);
                w
            },
            BatchSize::LargeInput,
        )
    });

    c.bench_function("step_frame_60_frames", |b| {
        b.iter_batched(
            || setup_world(300),
            |mut w| {
                for _ in 0..60 {
                    step_frame(&mut w, dt);
                }
                w
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
