// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tabula_form --heading-base-level=0

//! Tabula Form: headless form state.
//!
//! A [`FormState`] is a key/value store over [`FieldValue`]s with a
//! declarative configuration per field ([`FieldConfig`]):
//!
//! - **Derived updates**: a field's `on_change` function sees the new value
//!   and the current data, and its result is what gets merged into the form.
//!   One field can clear or recompute others, or reject its own input by
//!   leaving its key out.
//! - **Validation**: errors are recomputed from the current data on demand.
//!   They combine an optional whole-form validator with a [`REQUIRED`] error
//!   for every empty required field, and stay hidden until the first submit.
//! - **Submit lifecycle**: a valid submit calls the handler once and sets a
//!   loading flag that only [`FormState::complete`] clears. There is no
//!   timeout.
//! - **Reset**: [`FormState::reset_form`] restores the initial snapshot;
//!   [`FormState::sync_reset_trigger`] does the same whenever a host-provided
//!   trigger value changes (for example, each time a modal reopens).
//!
//! Input widgets talk to the form through the [`FormContext`] trait. A widget
//! rendered outside any form gets a [`DetachedForm`] through [`FormHandle`],
//! which logs each use and returns inert defaults instead of panicking.
//!
//! ## Minimal example
//!
//! ```rust
//! use hashbrown::HashMap;
//! use tabula_form::{FieldConfig, FieldValue, FormData, FormState, SubmitOutcome};
//!
//! let mut fields = HashMap::new();
//! fields.insert("quantity".to_owned(), FieldConfig::new("Quantity").initial_value(1));
//! fields.insert(
//!     "price".to_owned(),
//!     FieldConfig::new("Price").required().on_change(|price, data| {
//!         let quantity = data.get("quantity").and_then(FieldValue::as_number);
//!         let total = price.as_number().zip(quantity).map(|(p, q)| p * q);
//!         FormData::from([
//!             ("price".to_owned(), price.clone()),
//!             ("total".to_owned(), total.into()),
//!         ])
//!     }),
//! );
//!
//! let mut form = FormState::new(Some(fields), FormData::new(), |_data, _done| {}).unwrap();
//!
//! form.set_value("price", 9.5);
//! assert_eq!(form.value("price"), &FieldValue::Number(9.5));
//! assert_eq!(form.value("total"), &FieldValue::Number(9.5));
//! assert_eq!(form.submit(), SubmitOutcome::Submitted);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `tracing` and `thiserror`.
//! - `serde`: `Serialize`/`Deserialize` for [`FieldValue`] and [`OptionEntry`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod error;
mod field;
mod form;
mod options;
mod value;

pub use context::{DetachedForm, FormContext, FormHandle};
pub use error::FormError;
pub use field::{FieldConfig, FormFields};
pub use form::{Done, FormState, REQUIRED, SubmitOutcome, ValidationErrors};
pub use options::{OptionEntry, OptionList, SelectOption};
pub use value::{FieldValue, FormData};
