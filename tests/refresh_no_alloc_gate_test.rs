use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tile_scroll::core::{levels, SimpleRng, TileBuffer, Viewport, ViewportConfig};
use tile_scroll::term::{FrameBuffer, ScrollStatus, ScrollView, TermSize, ViewMode};
use tile_scroll::types::{ScrollMode, TILE_WIDTH, VRAM_TILES_H, VRAM_TILES_V};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn scroll_frame_is_allocation_free_after_warmup() {
    let map = levels::load(ScrollMode::Both).unwrap();
    let config = ViewportConfig::new(ScrollMode::Both);
    let mut vram = TileBuffer::new(VRAM_TILES_H, VRAM_TILES_V);
    let mut viewport = Viewport::init(&map, config, &mut vram).unwrap();

    let size = TermSize::new(100, 40);
    let mut fb = FrameBuffer::new(size.width, size.height);
    let mut view = ScrollView::new(config);
    let mut status = ScrollStatus {
        mode: ScrollMode::Both,
        ..ScrollStatus::default()
    };

    // Deltas are drawn up front so the measured loop only scrolls and renders.
    let max = i32::from(TILE_WIDTH);
    let mut rng = SimpleRng::new(42);
    let deltas: Vec<(i32, i32)> = (0..400)
        .map(|_| (rng.next_between(-max, max), rng.next_between(-max, max)))
        .collect();

    // Warm-up (initial clears, first crossing in each direction).
    for dx in [max, -max] {
        viewport.move_by(dx, dx);
        viewport.refresh(&mut vram);
    }
    view.render_into(&vram, &status, size, &mut fb);

    let allocs = with_alloc_counting(|| {
        for (i, &(dx, dy)) in deltas.iter().enumerate() {
            if i == deltas.len() / 2 {
                view.toggle_view_mode();
            }
            viewport.move_by(dx, dy);
            let report = viewport.refresh(&mut vram);
            status.camera = viewport.camera();
            status.strips = report.strips().len() as u8;
            status.cells = report.cells_painted();
            status.total_paints = vram.paint_count();
            view.render_into(&vram, &status, size, &mut fb);
        }
    });

    assert_eq!(view.view_mode(), ViewMode::Buffer);
    assert_eq!(allocs, 0);
}
