// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A task editor in a modal that starts fresh every time it opens.
//!
//! This example shows how to:
//! - configure fields with defaults, requiredness, options, and derived updates,
//! - gate submission on validation and finish it with the `Done` token,
//! - reset the form through a trigger bumped on each modal open,
//! - keep widgets rendered outside a form inert through `FormHandle`.
//!
//! Run:
//! - `cargo run -p tabula_demos --example modal_form`

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use hashbrown::HashMap;
use tabula_demos::init_logging;
use tabula_form::{
    Done, FieldConfig, FieldValue, FormContext, FormData, FormHandle, FormState, OptionEntry,
    OptionList,
};

const OWNERS_JSON: &str = r#"[
    { "id": "ana", "name": "Ana" },
    { "id": "joe", "name": "Joe" },
    { "id": "kim", "name": "Kim" }
]"#;

const BROKEN_LABELS_JSON: &str = r#"[{ "id": "bug" }, { "name": "Feature" }]"#;

fn options(field: &str, json: &str) -> Option<OptionList> {
    let entries: Vec<OptionEntry> = match serde_json::from_str(json) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!(field, %err, "option list is not valid JSON");
            return None;
        }
    };
    OptionList::from_entries(field, entries)
}

fn fields() -> HashMap<String, FieldConfig> {
    let mut owner = FieldConfig::new("Owner").required();
    if let Some(owners) = options("owner", OWNERS_JSON) {
        owner = owner.options(owners);
    }
    // Malformed: logged, and the labels picker renders nothing.
    let labels = options("labels", BROKEN_LABELS_JSON);
    println!("labels picker available: {}", labels.is_some());

    let mut fields = HashMap::new();
    fields.insert("title".to_owned(), FieldConfig::new("Title").required());
    fields.insert("owner".to_owned(), owner);
    fields.insert(
        "estimate".to_owned(),
        FieldConfig::new("Estimate").initial_value(1),
    );
    fields.insert(
        "done".to_owned(),
        FieldConfig::new("Done")
            .initial_value(false)
            .on_change(|done, _data| {
                // Finished tasks need no further estimate.
                let mut update = FormData::from([("done".to_owned(), done.clone())]);
                if done.as_bool() == Some(true) {
                    update.insert("estimate".to_owned(), FieldValue::Number(0.0));
                }
                update
            }),
    );
    fields
}

fn show(form: &FormState) {
    let data = serde_json::to_string(form.form_data()).unwrap_or_default();
    println!("  data:    {data}");
    println!(
        "  pristine={} validated={} loading={}",
        form.is_pristine(),
        form.is_validated(),
        form.is_loading()
    );
    for (field, error) in form.visible_errors() {
        println!("  error:   {field}: {error}");
    }
}

fn main() {
    init_logging();

    let pending: Rc<RefCell<Vec<Done>>> = Rc::default();
    let sink = pending.clone();
    let Some(form) = FormState::new(
        Some(fields()),
        FormData::from([("title".to_owned(), FieldValue::from("New task"))]),
        move |data, done| {
            println!("  submitting {} fields", data.len());
            sink.borrow_mut().push(done);
        },
    ) else {
        return;
    };
    let mut form = form.with_validator(|data| {
        let title = data.get("title").and_then(FieldValue::as_str).unwrap_or("");
        BTreeMap::from([(
            "title".to_owned(),
            (title.len() > 40).then(|| "keep titles under 40 characters".to_owned()),
        )])
    });

    let mut opened = 0_u64;
    for attempt in 1..=2 {
        opened += 1;
        form.sync_reset_trigger(opened);
        println!("Modal opened (attempt {attempt}):");
        show(&form);

        println!("Submit without an owner:");
        let _ = form.submit();
        show(&form);

        println!("Pick an owner and mark as done:");
        form.set_value("owner", "kim");
        form.set_value("done", true);
        if let Some(owner) = form
            .fields()
            .get("owner")
            .and_then(FieldConfig::option_list)
            .and_then(|owners| owners.selected(form.value("owner")).first().copied())
        {
            println!("  owner is {}", owner.name);
        }
        println!("  submit: {:?}", form.submit());
        show(&form);

        for done in pending.borrow_mut().drain(..) {
            form.complete(done);
        }
        println!("Request finished:");
        show(&form);
    }

    println!("A widget outside any form:");
    let mut detached = FormHandle::new(None);
    detached.set_value("title", FieldValue::from("ignored"));
    println!("  value: {:?}", detached.value("title"));
}
