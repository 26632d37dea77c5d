// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit form access for input widgets, with an inert fallback.

use alloc::string::String;

use crate::{FieldValue, FormState, SubmitOutcome, ValidationErrors};

/// What an input widget needs from the form it belongs to.
///
/// Widgets receive a `FormContext` explicitly instead of looking one up.
/// [`FormState`] implements it; [`DetachedForm`] is the stand-in for widgets
/// rendered outside any form.
pub trait FormContext {
    /// Current value of `key`.
    fn value(&self, key: &str) -> FieldValue;
    /// Sets `key`, running any derived update.
    fn set_value(&mut self, key: &str, value: FieldValue);
    /// Attempts to submit the form.
    fn submit(&mut self) -> SubmitOutcome;
    /// Restores the initial snapshot.
    fn reset_form(&mut self);
    /// See [`FormState::is_pristine`].
    fn is_pristine(&self) -> bool;
    /// See [`FormState::is_validated`].
    fn is_validated(&self) -> bool;
    /// See [`FormState::is_loading`].
    fn is_loading(&self) -> bool;
    /// Errors to display next to the inputs.
    fn visible_errors(&self) -> ValidationErrors;
}

impl FormContext for FormState {
    fn value(&self, key: &str) -> FieldValue {
        Self::value(self, key).clone()
    }

    fn set_value(&mut self, key: &str, value: FieldValue) {
        Self::set_value(self, key, value);
    }

    fn submit(&mut self) -> SubmitOutcome {
        Self::submit(self)
    }

    fn reset_form(&mut self) {
        Self::reset_form(self);
    }

    fn is_pristine(&self) -> bool {
        Self::is_pristine(self)
    }

    fn is_validated(&self) -> bool {
        Self::is_validated(self)
    }

    fn is_loading(&self) -> bool {
        Self::is_loading(self)
    }

    fn visible_errors(&self) -> ValidationErrors {
        Self::visible_errors(self)
    }
}

/// Context of a widget rendered outside any form.
///
/// Every call logs an error and returns an inert default: empty text,
/// pristine, not validated, not loading, no errors. Setters do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedForm;

impl DetachedForm {
    fn report(operation: &'static str) {
        tracing::error!(operation, "form context used outside of a form");
    }
}

impl FormContext for DetachedForm {
    fn value(&self, key: &str) -> FieldValue {
        tracing::error!(key, "form value read outside of a form");
        FieldValue::Text(String::new())
    }

    fn set_value(&mut self, key: &str, _value: FieldValue) {
        tracing::error!(key, "form value written outside of a form");
    }

    fn submit(&mut self) -> SubmitOutcome {
        Self::report("submit");
        SubmitOutcome::Invalid
    }

    fn reset_form(&mut self) {
        Self::report("reset_form");
    }

    fn is_pristine(&self) -> bool {
        Self::report("is_pristine");
        true
    }

    fn is_validated(&self) -> bool {
        Self::report("is_validated");
        false
    }

    fn is_loading(&self) -> bool {
        Self::report("is_loading");
        false
    }

    fn visible_errors(&self) -> ValidationErrors {
        Self::report("visible_errors");
        ValidationErrors::new()
    }
}

/// A widget's form context: the enclosing form, or [`DetachedForm`].
#[derive(Debug)]
pub enum FormHandle<'a> {
    /// Inside a form.
    Attached(&'a mut FormState),
    /// Outside any form.
    Detached(DetachedForm),
}

impl<'a> FormHandle<'a> {
    /// Wraps an optional enclosing form.
    pub fn new(form: Option<&'a mut FormState>) -> Self {
        form.map_or(Self::Detached(DetachedForm), Self::Attached)
    }

    /// Returns `true` if there is an enclosing form.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        matches!(self, Self::Attached(_))
    }

    fn context(&self) -> &dyn FormContext {
        match self {
            Self::Attached(form) => &**form,
            Self::Detached(detached) => detached,
        }
    }

    fn context_mut(&mut self) -> &mut dyn FormContext {
        match self {
            Self::Attached(form) => &mut **form,
            Self::Detached(detached) => detached,
        }
    }
}

impl FormContext for FormHandle<'_> {
    fn value(&self, key: &str) -> FieldValue {
        self.context().value(key)
    }

    fn set_value(&mut self, key: &str, value: FieldValue) {
        self.context_mut().set_value(key, value);
    }

    fn submit(&mut self) -> SubmitOutcome {
        self.context_mut().submit()
    }

    fn reset_form(&mut self) {
        self.context_mut().reset_form();
    }

    fn is_pristine(&self) -> bool {
        self.context().is_pristine()
    }

    fn is_validated(&self) -> bool {
        self.context().is_validated()
    }

    fn is_loading(&self) -> bool {
        self.context().is_loading()
    }

    fn visible_errors(&self) -> ValidationErrors {
        self.context().visible_errors()
    }
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;

    use super::{FormContext, FormHandle};
    use crate::{FieldConfig, FieldValue, FormData, FormState, SubmitOutcome};

    fn widget_submit(ctx: &mut dyn FormContext) -> SubmitOutcome {
        ctx.set_value("name", FieldValue::from("Ada"));
        ctx.submit()
    }

    #[test]
    fn attached_handle_drives_the_form() {
        let mut fields = HashMap::new();
        fields.insert("name".into(), FieldConfig::new("Name").required());
        let mut form = FormState::try_new(Some(fields), FormData::new(), |_, _| {}).unwrap();

        let mut handle = FormHandle::new(Some(&mut form));
        assert!(handle.is_attached());
        assert!(handle.is_pristine());
        assert_eq!(widget_submit(&mut handle), SubmitOutcome::Submitted);
        assert!(handle.is_loading());
        assert_eq!(handle.value("name"), FieldValue::from("Ada"));

        assert_eq!(form.value("name"), &FieldValue::from("Ada"));
    }

    #[test]
    fn detached_handle_is_inert() {
        let mut handle = FormHandle::new(None);
        assert!(!handle.is_attached());
        assert_eq!(widget_submit(&mut handle), SubmitOutcome::Invalid);
        assert_eq!(handle.value("name"), FieldValue::Text("".into()));
        assert!(handle.is_pristine());
        assert!(!handle.is_validated());
        assert!(!handle.is_loading());
        assert!(handle.visible_errors().is_empty());
        handle.reset_form();
    }
}
