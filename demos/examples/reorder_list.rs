// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop reordering of a persisted task list.
//!
//! This example shows how to:
//! - key a `DragAndDropList` by task ids read from the demo store,
//! - drive one gesture with hover events carrying row bounds and pointer Y,
//! - commit the drop to the store and let the list resynchronize.
//!
//! Run:
//! - `cargo run -p tabula_demos --example reorder_list`

use kurbo::Rect;
use serde_json::Value;
use tabula_demos::{DemoError, TaskStore, init_logging};
use tabula_reorder::{DragAndDropList, DropEvent, DropResponse, SlotProps};

const ROW_HEIGHT: f64 = 32.0;

fn row_bounds(slot: usize) -> Rect {
    let top = slot as f64 * ROW_HEIGHT;
    Rect::new(0.0, top, 480.0, top + ROW_HEIGHT)
}

fn ids(tasks: &[Value]) -> Vec<Value> {
    tasks.iter().map(|task| task["id"].clone()).collect()
}

fn print_rows(list: &DragAndDropList<Value>, tasks: &[Value]) {
    let renderer = |task: &Value, props: &SlotProps| {
        let marker = if props.dropped { "*" } else { " " };
        format!(
            "{marker} {slot}: {title} (opacity {opacity})",
            slot = props.slot,
            title = task["title"].as_str().unwrap_or("?"),
            opacity = props.style.opacity,
        )
    };
    for line in list.render(tasks, Some(&renderer)) {
        println!("{line}");
    }
    println!();
}

fn main() -> Result<(), DemoError> {
    init_logging();

    let path = std::env::temp_dir().join("tabula-reorder-demo.json");
    let mut store = TaskStore::open(&path)?;
    let mut list = DragAndDropList::new(ids(store.tasks()));
    println!("Loaded {} tasks from {}", list.len(), store.path().display());
    print_rows(&list, store.tasks());

    // Grab the first row and drag it down over the next two rows.
    let Ok(mut session) = list.begin_drag(0) else {
        println!("Nothing to drag.");
        return Ok(());
    };
    for (slot, offset) in [(1, 10.0), (1, 24.0), (2, 20.0)] {
        let pointer_y = row_bounds(slot).y0 + offset;
        let decision = list.hover(&mut session, slot, Some(row_bounds(slot)), Some(pointer_y));
        println!("hover slot {slot} at y={pointer_y}: {decision:?}");
    }
    print_rows(&list, store.tasks());

    let target = session.current_slot();
    let mut commit = |event: DropEvent| {
        store.move_task(event.source, event.target);
        DropResponse::Keep
    };
    list.drop_on(&mut session, target, &mut commit);
    println!("drag ended: {:?}", list.end_drag(session));

    store.save()?;
    list.sync(ids(store.tasks()));
    print_rows(&list, store.tasks());
    Ok(())
}
