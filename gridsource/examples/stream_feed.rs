// Example: a push-based feed that keeps growing past the render cap.
use gridsource::{DataInput, WindowOptions, WindowedBuffer};

fn main() {
    let mut buffer: WindowedBuffer<u64> = WindowedBuffer::new(
        DataInput::Stream,
        WindowOptions::new()
            .with_page_size(25)
            .with_max_render_item_count(Some(50))
            .with_on_update(Some(|update: gridsource::WindowUpdate<'_, u64>| {
                println!(
                    "visible={} removed_count={}",
                    update.data.len(),
                    update.removed_count
                );
            })),
    )
    .unwrap();
    buffer.connect();

    let mut feed: Vec<u64> = (0..50).collect();
    buffer.apply_snapshot(feed.clone());

    // Scroll toward the end until local data runs out, then "fetch" more.
    for _ in 0..4 {
        if buffer.grow_forward() {
            let next = feed.len() as u64;
            feed.extend(next..next + 25);
            buffer.apply_snapshot(feed.clone());
        }
        println!("window={:?} of {}", buffer.window(), feed.len());
    }

    buffer.disconnect();
}
