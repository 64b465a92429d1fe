// Example: window growth and eviction reporting over a static dataset.
use gridsource::{WindowOptions, WindowedBuffer};

fn main() {
    let data: Vec<u32> = (0..200).collect();
    let mut buffer = WindowedBuffer::new(
        data,
        WindowOptions::new()
            .with_page_size(50)
            .with_max_render_item_count(Some(100)),
    )
    .unwrap();
    buffer.connect();
    println!("initial window={:?}", buffer.window());

    loop {
        let exhausted = buffer.grow_forward();
        if exhausted {
            println!("exhausted at window={:?}", buffer.window());
            break;
        }
        println!(
            "window={:?} removed_count={}",
            buffer.window(),
            buffer.last_removed_count()
        );
    }
}
