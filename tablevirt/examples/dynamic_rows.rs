// Example: folding post-paint measurements back into the estimator.
use tablevirt::{Rect, Windower};

fn main() {
    let mut w = Windower::new(1_000, 50);
    let mut offset = 5_000u64;
    let viewport = 600;

    let win = w.compute_window(offset, viewport, 5);
    println!("before: rows={:?} total={}", win.range(), w.total_size());

    // The rendering layer reports real heights after paint. Rows above the viewport shift the
    // content, so the returned delta is applied to the scroll offset to avoid a visible jump.
    for item in &win.items {
        let measured = if item.index % 3 == 0 { 72 } else { 48 };
        let delta = w.resize_row(item.index, measured, offset);
        offset = offset.saturating_add_signed(delta);
    }

    // A detached element reports no rectangle; the estimate stays in place.
    w.measure_rect(990, None);
    w.measure_rect(991, Some(Rect { main: 64, cross: 1200 }));

    let win = w.compute_window(offset, viewport, 5);
    println!(
        "after: offset={offset} rows={:?} total={} measured={}",
        win.range(),
        w.total_size(),
        w.estimator().measured_len()
    );
}
