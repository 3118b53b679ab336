use std::time::Instant;

use tablevirt::{Align, ConfigOverrides};
use tablevirt_view::{Column, ScrollPositionStore, VirtualTable};

struct Order {
    id: u64,
    customer: String,
    lines: u32,
}

fn main() {
    // Example: drive a virtual table the way a UI adapter would, with tracing output enabled.
    //
    // An adapter would:
    // - call sync_data when the rows or the loading flag change, and apply the returned position
    // - forward scroll and resize events
    // - paint `view`, then report each painted row's measured height
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(true)
        .init();

    let clock = Instant::now();
    let orders: Vec<Order> = (0..25_000)
        .map(|i| Order {
            id: i,
            customer: format!("customer-{}", i % 313),
            lines: 1 + (i % 4) as u32,
        })
        .collect();
    let columns = vec![
        Column::new("id", "Order", |o: &Order| o.id.to_string()).with_width(90),
        Column::new("customer", "Customer", |o: &Order| o.customer.clone()),
        Column::new("lines", "Lines", |o: &Order| o.lines.to_string()),
    ];

    let mut store = ScrollPositionStore::new();
    let mut table = VirtualTable::new(
        "orders".to_string(),
        ConfigOverrides::new().with_enable_debug(true),
    )
    .with_on_scroll(Some(|top: u64, left: u64| {
        println!("host on_scroll top={top} left={left}");
    }));

    table.sync_data(&store, 0, 1, true);
    println!("state while loading: {:?}", table.state());

    let restored = table.sync_data(&store, orders.len(), 1, false);
    println!(
        "loaded {} rows tier={:?} config={:?} restored={restored:?}",
        table.row_count(),
        table.tier(),
        table.config()
    );

    for top in [0u64, 4_000, 90_000] {
        let start = table.begin_paint(clock.elapsed());
        table.on_scroll(&mut store, top, 0);

        let view = table.view(&orders, &columns);
        let mut measured = Vec::new();
        if let Some(body) = view.body() {
            println!(
                "top={top}: {} rows, padding {}/{}",
                body.rows.len(),
                body.padding_top,
                body.padding_bottom
            );
            for row in &body.rows {
                // Rows with more order lines wrap to a taller height.
                measured.push((row.index, 32 + 14 * row.record.lines));
            }
        }
        for (index, size) in measured {
            if let Some(pos) = table.report_measurement(&mut store, index, Some(size)) {
                println!("adjust scroll to {}", pos.top);
            }
        }

        let metrics = table.after_paint(start, clock.elapsed());
        println!(
            "metrics: visible={} saving={} render={:?}",
            metrics.visible_items, metrics.estimated_memory_saving, metrics.render_time
        );
    }

    let pos = table.scroll_to_index(&mut store, 12_000, Align::Center);
    println!("scroll_to_index(12000) -> {pos:?}");

    // Simulated re-mount: a fresh table with the same key resumes at the saved offset.
    let mut remounted = VirtualTable::new("orders".to_string(), ConfigOverrides::default());
    let restored = remounted.sync_data(&store, orders.len(), 1, false);
    println!(
        "remounted at {restored:?}, first row {:?}",
        remounted.window().first_index()
    );

    remounted.teardown(&mut store);
    println!("store entries after teardown: {}", store.len());
}
