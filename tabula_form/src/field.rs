// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-field configuration.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use hashbrown::HashMap;

use crate::{FieldValue, FormData, OptionList};

/// Field configurations keyed by field name.
pub type FormFields = HashMap<String, FieldConfig>;

type DerivedUpdate = Box<dyn Fn(&FieldValue, &FormData) -> FormData>;

/// Declarative configuration of one form field.
///
/// ```
/// use tabula_form::{FieldConfig, FieldValue, FormData};
///
/// // Picking a country clears the previously chosen city.
/// let country = FieldConfig::new("Country")
///     .required()
///     .on_change(|value, _data| {
///         FormData::from([
///             ("country".into(), value.clone()),
///             ("city".into(), FieldValue::Null),
///         ])
///     });
/// assert!(country.is_required());
/// assert_eq!(country.label(), "Country");
/// ```
pub struct FieldConfig {
    label: String,
    required: bool,
    initial_value: FieldValue,
    on_change: Option<DerivedUpdate>,
    options: Option<OptionList>,
}

impl FieldConfig {
    /// An optional field with no initial value.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            required: false,
            initial_value: FieldValue::Null,
            on_change: None,
            options: None,
        }
    }

    /// Marks the field as required: an empty value is a validation error.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value used when the form's initial state does not provide one.
    #[must_use]
    pub fn initial_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.initial_value = value.into();
        self
    }

    /// Derived update run by [`FormState::set_value`](crate::FormState::set_value).
    ///
    /// Receives the new value and the form data before the change. Only the
    /// returned entries are merged, so the update must include the field's own
    /// key for the new value to be stored; leaving it out rejects the input.
    #[must_use]
    pub fn on_change(
        mut self,
        update: impl Fn(&FieldValue, &FormData) -> FormData + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(update));
        self
    }

    /// Attaches the options of a dropdown or badge field.
    #[must_use]
    pub fn options(mut self, options: OptionList) -> Self {
        self.options = Some(options);
        self
    }

    /// Label shown next to the input.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` if the field must not be empty.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Default value of the field.
    #[must_use]
    pub const fn default_value(&self) -> &FieldValue {
        &self.initial_value
    }

    /// Options of a dropdown or badge field.
    #[must_use]
    pub const fn option_list(&self) -> Option<&OptionList> {
        self.options.as_ref()
    }

    pub(crate) fn derive(&self, value: &FieldValue, data: &FormData) -> Option<FormData> {
        self.on_change.as_ref().map(|update| update(value, data))
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("label", &self.label)
            .field("required", &self.required)
            .field("initial_value", &self.initial_value)
            .field("on_change", &self.on_change.is_some())
            .field("options", &self.options)
            .finish()
    }
}
