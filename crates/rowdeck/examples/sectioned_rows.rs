//! rowdeck end-to-end example.
//!
//! Drives a sectioned list the way a host UI would: configure, render the
//! layout plan as text, hover and choose rows, scroll to the bottom, then
//! shrink the list out from under the highlight and watch reconciliation
//! retarget it.
//!
//! Run with: cargo run -p rowdeck --example sectioned_rows
//! Set RUST_LOG=trace to watch the internals.

use std::sync::Arc;

use rowdeck::prelude::*;
use tracing_subscriber::EnvFilter;

/// Fruit and vegetable names, two sections' worth.
const SECTIONS: [&[&str]; 2] = [
    &["Apple", "Banana", "Cherry", "Damson"],
    &["Asparagus", "Beet", "Carrot"],
];

fn label(path: RowIndexPath) -> &'static str {
    SECTIONS[path.section()][path.row()]
}

fn render(view: &RowsView) {
    let scroll_top = view.viewport().scroll_top();
    println!("--- list (scrolled to {scroll_top}) ---");
    for element in view.layout() {
        match element {
            ListElement::TopHeader { offset, .. } => {
                println!("{offset:>6.1}  == Produce ==");
            }
            ListElement::SectionHeader {
                section, offset, ..
            } => {
                println!("{offset:>6.1}  [section {section}]");
            }
            ListElement::Row {
                path,
                offset,
                highlighted,
                selected,
                ..
            } => {
                let mark = match (highlighted, selected) {
                    (true, true) => "*>",
                    (true, false) => " >",
                    (false, true) => " *",
                    (false, false) => "  ",
                };
                println!("{offset:>6.1}  {mark} {}", label(path));
            }
        }
    }
}

fn config(counts: Vec<usize>) -> ListConfig {
    ListConfig::new(
        Arc::new(SectionCounts::new(counts)),
        ListMetrics::uniform(20.0)
            .with_section_headers(16.0)
            .with_top_header(24.0),
    )
    .with_top_header(true)
    .with_section_headers(true)
    .with_keep_highlight(true)
    .with_auto_highlight_first(true)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut view = RowsView::new(config(vec![4, 3]), 100.0)?;

    view.controller().selection_changed.connect(|selection| {
        match selection.highlighted_row() {
            Some(path) => println!("    (highlight -> absolute {})", path.absolute_row()),
            None => println!("    (highlight cleared)"),
        }
    });
    view.controller().row_chosen.connect(|path| {
        println!("    (chose absolute {})", path.absolute_row());
    });
    view.controller().reached_end().connect(|_| {
        println!("    (reached the end of the list)");
    });

    // Auto-highlight picked the first row at construction.
    render(&view);

    // Hover the third row of the first section (top 24 + header 16 + two
    // rows = 80, inside the 100px window), then commit it.
    view.pointer_moved(82.0);
    view.pointer_pressed(82.0);
    if let Some(path) = view.row_at(82.0) {
        view.controller_mut().select_row(path);
    }
    render(&view);

    // Wheel down until the end notification fires (content is 196px tall,
    // so the 100px window reaches it quickly).
    view.wheel(60.0);
    view.wheel(60.0);

    // Shrink the first section to two rows: the committed selection on its
    // third row is gone, and the highlight is reconciled.
    view.update(config(vec![2, 3]))?;
    render(&view);

    // Programmatic navigation through the imperative handle.
    view.controller_mut().highlight_next();
    view.controller_mut().reveal_highlight();
    render(&view);

    Ok(())
}
