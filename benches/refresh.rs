use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_scroll::core::{levels, TileBuffer, Viewport, ViewportConfig};
use tile_scroll::term::{FrameBuffer, ScrollStatus, ScrollView, TermSize};
use tile_scroll::types::{ScrollMode, VRAM_TILES_H, VRAM_TILES_V};

fn bench_refresh_without_crossing(c: &mut Criterion) {
    let map = levels::load(ScrollMode::Both).unwrap();
    let mut vram = TileBuffer::new(VRAM_TILES_H, VRAM_TILES_V);
    let mut viewport = Viewport::init(&map, ViewportConfig::default(), &mut vram).unwrap();

    c.bench_function("refresh_idle", |b| {
        b.iter(|| black_box(viewport.refresh(&mut vram)))
    });
}

fn bench_refresh_diagonal_crossing(c: &mut Criterion) {
    let map = levels::load(ScrollMode::Both).unwrap();
    let mut vram = TileBuffer::new(VRAM_TILES_H, VRAM_TILES_V);
    let mut viewport = Viewport::init(&map, ViewportConfig::default(), &mut vram).unwrap();
    viewport.move_to(200, 200);
    viewport.fill(&mut vram);

    // Alternate one tile forward and back so every refresh repaints two strips.
    let mut step = 8;
    c.bench_function("refresh_diagonal_crossing", |b| {
        b.iter(|| {
            viewport.move_by(step, step);
            step = -step;
            black_box(viewport.refresh(&mut vram))
        })
    });
}

fn bench_full_fill(c: &mut Criterion) {
    let map = levels::load(ScrollMode::Both).unwrap();
    let mut vram = TileBuffer::new(VRAM_TILES_H, VRAM_TILES_V);
    let mut viewport = Viewport::init(&map, ViewportConfig::default(), &mut vram).unwrap();

    c.bench_function("jump_to_refill", |b| {
        b.iter(|| black_box(viewport.jump_to(black_box(333), black_box(121), &mut vram)))
    });
}

fn bench_render_screen(c: &mut Criterion) {
    let map = levels::load(ScrollMode::Both).unwrap();
    let config = ViewportConfig::default();
    let mut vram = TileBuffer::new(VRAM_TILES_H, VRAM_TILES_V);
    let viewport = Viewport::init(&map, config, &mut vram).unwrap();

    let view = ScrollView::new(config);
    let status = ScrollStatus {
        camera: viewport.camera(),
        ..ScrollStatus::default()
    };
    let size = TermSize::new(100, 40);
    let mut fb = FrameBuffer::new(size.width, size.height);

    c.bench_function("render_screen_view", |b| {
        b.iter(|| view.render_into(black_box(&vram), &status, size, &mut fb))
    });
}

criterion_group!(
    benches,
    bench_refresh_without_crossing,
    bench_refresh_diagonal_crossing,
    bench_full_fill,
    bench_render_screen
);
criterion_main!(benches);
