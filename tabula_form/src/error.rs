// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while configuring a form.

use alloc::string::String;

/// Reasons a form or one of its option lists could not be built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The form was mounted without any field configuration.
    #[error("form has no field configuration")]
    MissingFields,
    /// A field name that the form does not declare.
    #[error("unknown form field `{0}`")]
    UnknownField(String),
    /// An option list entry lacks a required key.
    #[error("option {index} is missing its `{key}`")]
    MalformedOption {
        /// Position of the entry in the list.
        index: usize,
        /// The missing key, `id` or `name`.
        key: &'static str,
    },
}
