// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sortable, filterable, paginated task table over JSON rows.
//!
//! This example shows how to:
//! - declare columns by JSON field name (the `json` feature of `tabula_table`),
//! - drive the search box, header clicks, and pager from `TableViewState`,
//! - reorder rows by hand while no column sort is active.
//!
//! Run:
//! - `cargo run -p tabula_demos --example data_table`

use kurbo::Rect;
use serde_json::Value;
use tabula_demos::{DemoError, TaskStore, init_logging};
use tabula_reorder::{DragAndDropList, DropResponse};
use tabula_table::{
    Column, Propagation, RowClass, SortState, Table, TableOptions, TableView, TableViewState,
};

fn print_view(table: &Table<Value>, view: &TableView<'_, Value>, state: &TableViewState) {
    let headers: Vec<String> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(column, spec)| {
            let arrow = match SortState::of(column, state.order_by) {
                SortState::Unsorted => "",
                SortState::Ascending => " ^",
                SortState::Descending => " v",
            };
            format!("{}{arrow}", spec.name())
        })
        .collect();
    println!("{}", headers.join(" | "));
    if let Some(empty) = &view.empty_text {
        println!("  ({empty})");
    }
    for row in &view.rows {
        let cells: Vec<String> = table
            .columns()
            .iter()
            .map(|column| column.value(row.row).to_string())
            .collect();
        let class = row.class_name.as_deref().unwrap_or("");
        println!("  {} [{class}]", cells.join(" | "));
    }
    if let Some(footer) = &view.footer {
        let sums: Vec<&str> = footer.iter().map(|sum| sum.as_deref().unwrap_or("")).collect();
        println!("  = {}", sums.join(" | "));
    }
    println!(
        "  {} page {}/{} buttons {:?}{}",
        table.range_label(view).unwrap_or_default(),
        view.pager.page + 1,
        view.pager.page_count,
        view.pager.buttons,
        if view.manual_reorder { " (drag to reorder)" } else { "" },
    );
    println!();
}

fn main() -> Result<(), DemoError> {
    init_logging();

    let path = std::env::temp_dir().join("tabula-table-demo.json");
    let mut store = TaskStore::open(&path)?;

    let table = Table::new(vec![
        Column::new("Title", "title").sortable(),
        Column::new("Owner", "owner").sortable().class_name("owner"),
        Column::new("Estimate", "estimate")
            .sortable()
            .sum_formatted(|total| format!("{total} pts"))
            .on_click(|row: &Value| {
                println!("  estimate cell clicked for task {}", row["id"]);
                Propagation::Stop
            }),
    ])
    .filter_column("title")
    .move_id("id")
    .row_class_name(RowClass::from_fn(|row: &Value| {
        let class = if row["estimate"].is_null() { "unestimated" } else { "estimated" };
        class.to_owned()
    }))
    .on_row_click(|row: &Value| println!("  row clicked: {}", row["title"]))
    .with_options(TableOptions {
        rows_per_page: Some(3),
        text_on_empty: Some("No matching tasks".to_owned()),
        ..TableOptions::default()
    });

    let mut state = table.initial_state();
    if let Some(view) = table.view(Some(store.tasks()), &mut state) {
        print_view(&table, &view, &state);
        if let Some(first) = view.rows.first() {
            table.dispatch_click(first.row, Some(2));
            table.dispatch_click(first.row, Some(0));
        }
    }

    println!("Search \"the\", sort by estimate:");
    state.set_filter_text("the");
    table.click_header(&mut state, 2);
    if let Some(view) = table.view(Some(store.tasks()), &mut state) {
        print_view(&table, &view, &state);
    }

    println!("Descending, then next page:");
    table.click_header(&mut state, 2);
    if let Some(view) = table.view(Some(store.tasks()), &mut state) {
        state.next_page(&view.pager);
    }
    if let Some(view) = table.view(Some(store.tasks()), &mut state) {
        print_view(&table, &view, &state);
    }

    println!("Third click restores the stored order; drag the first row down:");
    table.click_header(&mut state, 2);
    state.set_filter_text("");
    let mut list = DragAndDropList::default();
    let mut committed = None;
    if let Some(view) = table.view(Some(store.tasks()), &mut state) {
        table.sync_reorder_list(&view, &mut list);
        if let Ok(mut session) = list.begin_drag(0) {
            list.hover(
                &mut session,
                1,
                Some(Rect::new(0.0, 20.0, 400.0, 40.0)),
                Some(35.0),
            );
            let mut mover = view.mover(|request| {
                committed = Some((request.from, request.to));
                DropResponse::Keep
            });
            list.drop_on(&mut session, 1, &mut mover);
            list.end_drag(session);
        }
    }
    if let Some((from, to)) = committed {
        store.move_task(from, to);
        store.save()?;
    }
    if let Some(view) = table.view(Some(store.tasks()), &mut state) {
        table.sync_reorder_list(&view, &mut list);
        print_view(&table, &view, &state);
    }

    println!("Search with no hits:");
    state.set_filter_text("nothing like this");
    if let Some(view) = table.view(Some(store.tasks()), &mut state) {
        print_view(&table, &view, &state);
    }
    Ok(())
}
