use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use gridsource::{LoadDirection, LoadingState, WindowOptions, WindowedBuffer};

fn items(n: usize) -> Vec<u32> {
    (0..n as u32).collect()
}

fn coordinator(n: usize, cap: usize, page_size: usize) -> ScrollCoordinator<u32> {
    let buffer = WindowedBuffer::new(
        items(n),
        WindowOptions::new()
            .with_page_size(page_size)
            .with_max_render_item_count(Some(cap)),
    )
    .unwrap();
    let mut c = ScrollCoordinator::new(buffer, BoundaryThresholds::default());
    c.connect();
    c
}

fn capture_loading(c: &mut ScrollCoordinator<u32>) -> Arc<Mutex<Vec<LoadDirection>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    c.set_on_loading(Some(move |state: LoadingState| {
        sink.lock().unwrap().push(state.requesting);
    }));
    seen
}

#[test]
fn thresholds_default_to_twenty_percent() {
    let t = BoundaryThresholds::default();
    assert_eq!((t.top_percent, t.bottom_percent), (20, 20));
}

#[test]
fn boundary_signals_are_gated_until_first_scroll() {
    let mut watcher = BoundaryWatcher::default();
    // Initial layout puts the edge inside the margin, but nobody scrolled.
    assert_eq!(watcher.check(0, 100, 1000), BoundaryHits::default());

    watcher.note_scroll();
    let hits = watcher.check(0, 100, 1000);
    assert!(hits.near_start);
    assert!(!hits.near_end);
}

#[test]
fn boundary_math_respects_thresholds() {
    let mut watcher = BoundaryWatcher::new(BoundaryThresholds {
        top_percent: 20,
        bottom_percent: 20,
    });
    watcher.note_scroll();

    // Viewport 100 → 20-unit margins on both edges.
    assert!(watcher.check(20, 100, 1000).near_start);
    assert!(!watcher.check(21, 100, 1000).near_start);

    assert!(watcher.check(880, 100, 1000).near_end);
    assert!(!watcher.check(879, 100, 1000).near_end);

    // Content barely exceeding the viewport trips both edges at once.
    let hits = watcher.check(0, 100, 110);
    assert!(hits.near_start && hits.near_end);

    // A zero-sized viewport can never fire.
    assert_eq!(watcher.check(0, 0, 1000), BoundaryHits::default());
}

#[test]
fn local_grow_emits_one_loading_event() {
    let mut c = coordinator(200, 100, 50);
    let seen = capture_loading(&mut c);

    c.request(LoadDirection::Next);
    assert_eq!(c.state(), PullState::Idle);
    assert_eq!(c.buffer().window(), (0, 100));
    assert_eq!(seen.lock().unwrap().as_slice(), &[LoadDirection::Next]);
}

#[test]
fn exhausted_grow_emits_no_loading_event() {
    let mut c = coordinator(100, 100, 50);
    let seen = capture_loading(&mut c);

    // Window [0, 50): one grow reaches the end of local data.
    c.request(LoadDirection::Next);
    assert_eq!(c.buffer().window(), (0, 100));

    // No upstream configured: an exhausted pull resolves to idle silently.
    c.request(LoadDirection::Next);
    assert_eq!(c.state(), PullState::Idle);
    assert_eq!(seen.lock().unwrap().as_slice(), &[LoadDirection::Next]);
}

#[test]
fn exhausted_grow_defers_upstream_and_stays_pending() {
    let mut c = coordinator(100, 100, 50);
    let seen = capture_loading(&mut c);
    let upstream = Arc::new(AtomicUsize::new(0));
    let u = upstream.clone();
    c.set_load_more(Some(move |_direction: LoadDirection| {
        u.fetch_add(1, Ordering::SeqCst);
        true
    }));

    c.request(LoadDirection::Next);
    assert_eq!(c.buffer().window(), (0, 100));

    c.request(LoadDirection::Next);
    assert_eq!(c.state(), PullState::Pending(LoadDirection::Next));
    assert_eq!(upstream.load(Ordering::SeqCst), 1);
    // The coordinator emits nothing for an upstream pull; that's the host's
    // loading event.
    assert_eq!(seen.lock().unwrap().len(), 1);

    // Re-entrant signals while pending are dropped.
    c.request(LoadDirection::Next);
    c.request(LoadDirection::Previous);
    assert_eq!(upstream.load(Ordering::SeqCst), 1);

    // The fetched snapshot resolves the pull and lands forward.
    c.push_snapshot(items(150));
    assert_eq!(c.state(), PullState::Idle);
    assert_eq!(c.buffer().window(), (50, 150));

    // Idle again: the next boundary signal goes through.
    c.request(LoadDirection::Previous);
    assert_eq!(c.buffer().window(), (0, 100));
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn declined_upstream_pull_returns_to_idle() {
    let mut c = coordinator(100, 100, 50);
    c.set_load_more(Some(|_: LoadDirection| false));

    c.request(LoadDirection::Next);
    c.request(LoadDirection::Next);
    assert_eq!(c.state(), PullState::Idle);
}

#[test]
fn loading_events_are_suppressed_during_reset() {
    let mut c = coordinator(300, 100, 50);
    let seen = capture_loading(&mut c);

    c.begin_reset();
    c.request(LoadDirection::Next);
    assert!(seen.lock().unwrap().is_empty());

    c.end_reset();
    c.request(LoadDirection::Next);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn viewport_geometry_drives_pulls() {
    let mut c = coordinator(200, 100, 50);

    // Not scrolled yet: geometry inside the margin does nothing.
    c.on_viewport(25, 30, 50);
    assert_eq!(c.buffer().window(), (0, 50));

    c.note_scroll();
    // 25 + 30 + 6 ≥ 50: near the end, pull forward.
    c.on_viewport(25, 30, 50);
    assert_eq!(c.buffer().window(), (0, 100));

    // Mid-content: neither edge.
    c.on_viewport(40, 30, 100);
    assert_eq!(c.buffer().window(), (0, 100));
}

#[test]
fn initial_snapshot_never_reanchors() {
    let mut c = coordinator(200, 100, 50);
    assert_eq!(c.take_reanchor(50, true), None);
}

#[test]
fn forward_eviction_reanchors_to_previous_last_row() {
    let mut c = coordinator(200, 100, 50);

    c.request(LoadDirection::Next);
    // First grow only fills the window (removed 0): nothing to correct.
    assert_eq!(c.take_reanchor(100, true), None);

    c.request(LoadDirection::Next);
    assert_eq!(c.buffer().last_removed_count(), 50);
    assert_eq!(
        c.take_reanchor(100, true),
        Some(ScrollAnchorTarget::PreviousLastRow { index: 49 })
    );
    // Consumed: the same update yields no second correction.
    assert_eq!(c.take_reanchor(100, true), None);
}

#[test]
fn forward_eviction_without_bottom_pin_needs_no_correction() {
    let mut c = coordinator(200, 100, 50);
    c.request(LoadDirection::Next);
    c.request(LoadDirection::Next);
    assert_eq!(c.take_reanchor(100, false), None);
}

#[test]
fn backward_eviction_reanchors_to_previous_first_row() {
    let mut c = coordinator(200, 100, 50);
    for _ in 0..3 {
        c.request(LoadDirection::Next);
    }
    assert_eq!(c.buffer().window(), (100, 200));
    let _ = c.take_reanchor(100, false);

    c.request(LoadDirection::Previous);
    assert_eq!(c.buffer().last_removed_count(), 50);
    assert_eq!(
        c.take_reanchor(100, false),
        Some(ScrollAnchorTarget::PreviousFirstRow)
    );
}

#[test]
fn reanchor_math() {
    use gridsource::LoadDirection::{Next, Previous};

    // Net growth or an empty row list: no correction.
    assert_eq!(reanchor_after_update(Next, 0, 100, true), None);
    assert_eq!(reanchor_after_update(Next, -50, 100, true), None);
    assert_eq!(reanchor_after_update(Next, 50, 0, true), None);
    assert_eq!(reanchor_after_update(Previous, -1, 100, false), None);

    assert_eq!(
        reanchor_after_update(Previous, 50, 100, false),
        Some(ScrollAnchorTarget::PreviousFirstRow)
    );
    assert_eq!(reanchor_after_update(Next, 50, 100, false), None);
    assert_eq!(
        reanchor_after_update(Next, 50, 100, true),
        Some(ScrollAnchorTarget::PreviousLastRow { index: 49 })
    );
    // Evictions beyond the row list saturate at the first row.
    assert_eq!(
        reanchor_after_update(Next, 500, 100, true),
        Some(ScrollAnchorTarget::PreviousLastRow { index: 0 })
    );
}

#[test]
fn disconnect_drops_pending_pulls() {
    let mut c = coordinator(100, 100, 50);
    c.set_load_more(Some(|_: LoadDirection| true));
    c.request(LoadDirection::Next);
    c.request(LoadDirection::Next);
    assert_eq!(c.state(), PullState::Pending(LoadDirection::Next));

    c.disconnect();
    assert_eq!(c.state(), PullState::Idle);
    assert!(!c.buffer().is_connected());

    // Closed sessions ignore everything.
    c.request(LoadDirection::Next);
    assert_eq!(c.state(), PullState::Idle);
    let before = c.buffer().window();
    c.push_snapshot(items(500));
    assert_eq!(c.buffer().window(), before);
}
