use std::hint::black_box;
use std::time::Instant;

use glam::Vec3;
use rollfield_terrain::{TerrainStreamer, TileCoord, required_coords};

fn bench_required_coords(steps: i32, iterations: usize) {
    let anchor = TileCoord::new(3, -7);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(required_coords(black_box(anchor), black_box(steps)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  required coords (steps={steps}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_noop_scan(view_radius: f32, iterations: usize) {
    let mut streamer = TerrainStreamer::new(10.0, view_radius);
    streamer.update(Vec3::ZERO);

    let start = Instant::now();
    for _ in 0..iterations {
        // Anchor never changes: the per-frame degenerate pass.
        let _ = black_box(streamer.update(black_box(Vec3::new(4.0, 5.0, 4.0))));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  no-op scan (r={view_radius}, {} tiles, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        streamer.live_count()
    );
}

fn bench_moving_camera(view_radius: f32, iterations: usize) {
    let mut streamer = TerrainStreamer::new(10.0, view_radius);
    streamer.update(Vec3::ZERO);

    let start = Instant::now();
    for i in 0..iterations {
        // Cross one tile boundary per iteration.
        let eye = Vec3::new((i as f32 + 1.0) * 10.0, 5.0, 0.0);
        let _ = black_box(streamer.update(black_box(eye)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  boundary crossing (r={view_radius}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Terrain Streaming Benchmarks ===\n");

    println!("Required-set enumeration:");
    bench_required_coords(5, 100_000);
    bench_required_coords(10, 10_000);
    bench_required_coords(20, 1_000);

    println!("\nDegenerate per-frame scan (anchor unchanged):");
    bench_noop_scan(50.0, 10_000);
    bench_noop_scan(100.0, 1_000);

    println!("\nBoundary-crossing updates (create + remove one column):");
    bench_moving_camera(50.0, 1_000);
    bench_moving_camera(100.0, 100);

    println!("\n=== Done ===");
}
