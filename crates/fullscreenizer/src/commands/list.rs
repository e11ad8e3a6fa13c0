use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use fullscreenizer_core::{Rect, config};

pub fn execute() {
    let windows =
        fullscreenizer_windows::enumerate_windows().expect("failed to enumerate windows");
    let tracked = config::load().map(|c| c.classes).unwrap_or_default();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("Title"),
            Cell::new("Class"),
            Cell::new("Width").set_alignment(CellAlignment::Right),
            Cell::new("Height").set_alignment(CellAlignment::Right),
            Cell::new("Tracked"),
        ]);

    let mut count = 0;
    for window in &windows {
        let title = window.title().unwrap_or_default();
        if title.is_empty() {
            continue;
        }

        let class = window.class().unwrap_or_default();
        let rect = window.rect().unwrap_or(Rect::new(0, 0, 0, 0));
        let is_tracked = tracked.iter().any(|c| *c == class);

        table.add_row(vec![
            Cell::new(format!("0x{:X}", window.raw())),
            Cell::new(title),
            Cell::new(class),
            Cell::new(rect.width).set_alignment(CellAlignment::Right),
            Cell::new(rect.height).set_alignment(CellAlignment::Right),
            Cell::new(if is_tracked { "yes" } else { "" }),
        ]);
        count += 1;
    }

    println!("{table}");
    println!("\n{count} windows found");
}
