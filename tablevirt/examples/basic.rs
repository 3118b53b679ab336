// Example: window computation for a large table with fixed row estimates.
use tablevirt::{ConfigOverrides, Windower, derive_config};

fn main() {
    let rows = 120_000;
    let config = derive_config(rows, &ConfigOverrides::default());
    let w = Windower::from_config(rows, &config);

    println!("config={config:?} total_size={}", w.total_size());

    for offset in [0u64, 10_000, 2_500_000, u64::MAX] {
        let win = w.compute_window(offset, config.container_height, config.overscan);
        println!(
            "offset={offset}: rows={:?} padding_top={} padding_bottom={}",
            win.range(),
            win.padding_top,
            win.padding_bottom
        );
    }
}
