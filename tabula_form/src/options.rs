// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Option lists for dropdown and badge fields.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{FieldValue, FormError};

/// An option entry as loaded from configuration, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptionEntry {
    /// Value stored in the form when this option is picked.
    pub id: Option<String>,
    /// Label shown to the user.
    pub name: Option<String>,
}

impl OptionEntry {
    /// A well-formed entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }
}

/// A validated select option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    /// Value stored in the form when this option is picked.
    pub id: String,
    /// Label shown to the user.
    pub name: String,
}

/// Options of a dropdown or badge field; every entry has an `id` and a `name`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionList {
    options: Vec<SelectOption>,
}

impl OptionList {
    /// Validates `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MalformedOption`] for the first entry missing its
    /// `id` or `name`.
    pub fn try_from_entries(
        entries: impl IntoIterator<Item = OptionEntry>,
    ) -> Result<Self, FormError> {
        let options = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let id = entry.id.ok_or(FormError::MalformedOption { index, key: "id" })?;
                let name = entry
                    .name
                    .ok_or(FormError::MalformedOption { index, key: "name" })?;
                Ok(SelectOption { id, name })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { options })
    }

    /// Like [`try_from_entries`](Self::try_from_entries), but logs a malformed
    /// list and returns `None` so the field renders nothing.
    pub fn from_entries(
        field: &str,
        entries: impl IntoIterator<Item = OptionEntry>,
    ) -> Option<Self> {
        Self::try_from_entries(entries)
            .inspect_err(|err| tracing::error!(field, %err, "malformed option list"))
            .ok()
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SelectOption> + '_ {
        self.options.iter()
    }

    /// The option with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SelectOption> {
        self.options.iter().find(|option| option.id == id)
    }

    /// Options picked by a field value: a single id, or a list of ids for
    /// multi-select badges. Unknown ids are skipped.
    #[must_use]
    pub fn selected(&self, value: &FieldValue) -> Vec<&SelectOption> {
        match value {
            FieldValue::Text(id) => self.get(id).into_iter().collect(),
            FieldValue::List(ids) => ids
                .iter()
                .filter_map(FieldValue::as_str)
                .filter_map(|id| self.get(id))
                .collect(),
            _ => Vec::new(),
        }
    }
}
