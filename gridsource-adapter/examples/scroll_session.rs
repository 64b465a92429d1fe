// Example: a simulated scroll session with boundary-triggered pulls and
// eviction-corrected re-anchoring.
use gridsource::{LoadDirection, WindowOptions, WindowedBuffer};
use gridsource_adapter::{BoundaryThresholds, ScrollCoordinator};

fn main() {
    let data: Vec<u32> = (0..200).collect();
    let buffer = WindowedBuffer::new(
        data,
        WindowOptions::new()
            .with_page_size(50)
            .with_max_render_item_count(Some(100)),
    )
    .unwrap();

    let mut coordinator = ScrollCoordinator::new(buffer, BoundaryThresholds::default());
    coordinator.set_on_loading(Some(|state: gridsource::LoadingState| {
        println!("loading: {:?}", state.requesting);
    }));
    coordinator.connect();
    coordinator.note_scroll();

    // Rows are 1 unit tall; the viewport shows 30 of them.
    let viewport = 30;
    for step in 0..5 {
        let rows = coordinator.buffer().current().len() as u64;
        let offset = rows.saturating_sub(viewport);
        coordinator.on_viewport(offset, viewport, rows);

        let row_count = coordinator.buffer().current().len();
        if let Some(target) = coordinator.take_reanchor(row_count, true) {
            println!("step {step}: re-anchor to {target:?}");
        }
        println!("step {step}: window={:?}", coordinator.buffer().window());
    }

    // The far edge of local data: hand the request upstream instead.
    coordinator.set_load_more(Some(|direction: LoadDirection| {
        println!("need more data: {direction:?}");
        true
    }));
    coordinator.request(LoadDirection::Next);
    coordinator.push_snapshot((0..250).collect());
    println!("after fetch: window={:?}", coordinator.buffer().window());
}
