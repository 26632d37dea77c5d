// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The form state machine.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

use crate::{FieldConfig, FieldValue, FormData, FormError, FormFields};

/// Validation errors keyed by field name.
pub type ValidationErrors = BTreeMap<String, String>;

/// Error reported for a required field whose value is empty.
pub const REQUIRED: &str = "required";

type Validator = Box<dyn Fn(&FormData) -> BTreeMap<String, Option<String>>>;
type SubmitHandler = Box<dyn FnMut(&FormData, Done)>;

/// Token handed to the submit handler; pass it back to
/// [`FormState::complete`] to clear the loading flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use = "the form stays loading until this token is passed to `FormState::complete`"]
pub struct Done {
    token: u64,
}

/// Result of [`FormState::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are now visible and the handler was not called.
    Invalid,
    /// The handler was called and the form is loading.
    Submitted,
    /// A previous submission has not completed yet; nothing happened.
    Busy,
}

/// Key/value state of one form.
///
/// The form starts from an initial snapshot: each field's
/// [`initial_value`](FieldConfig::initial_value), overridden by the entries of
/// the `initial_state` it was mounted with. Validation errors are derived
/// from the current data on every call and never stored.
///
/// ```
/// use hashbrown::HashMap;
/// use tabula_form::{FieldConfig, FormData, FormState, SubmitOutcome};
///
/// let fields = HashMap::from([("title".into(), FieldConfig::new("Title").required())]);
/// let mut form = FormState::new(Some(fields), FormData::new(), |data, done| {
///     // Start the request here and keep `done` for its completion.
///     assert!(data.contains_key("title"));
///     let _ = done;
/// })
/// .unwrap();
///
/// assert_eq!(form.submit(), SubmitOutcome::Invalid);
/// assert_eq!(form.visible_errors()["title"], "required");
///
/// form.set_value("title", "Quarterly report");
/// assert_eq!(form.submit(), SubmitOutcome::Submitted);
/// assert!(form.is_loading());
/// ```
pub struct FormState {
    fields: FormFields,
    initial: FormData,
    data: FormData,
    pristine: bool,
    loading: Option<u64>,
    next_token: u64,
    validator: Option<Validator>,
    on_submit: SubmitHandler,
    reset_trigger: Option<u64>,
}

impl FormState {
    /// Mounts a form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingFields`] if `fields` is `None`.
    pub fn try_new(
        fields: Option<FormFields>,
        initial_state: FormData,
        on_submit: impl FnMut(&FormData, Done) + 'static,
    ) -> Result<Self, FormError> {
        let fields = fields.ok_or(FormError::MissingFields)?;
        let mut initial: FormData = fields
            .iter()
            .map(|(name, field)| (name.clone(), field.default_value().clone()))
            .collect();
        initial.extend(initial_state);
        Ok(Self {
            fields,
            data: initial.clone(),
            initial,
            pristine: true,
            loading: None,
            next_token: 0,
            validator: None,
            on_submit: Box::new(on_submit),
            reset_trigger: None,
        })
    }

    /// Like [`try_new`](Self::try_new), but logs a missing field
    /// configuration and returns `None` so the form renders nothing.
    pub fn new(
        fields: Option<FormFields>,
        initial_state: FormData,
        on_submit: impl FnMut(&FormData, Done) + 'static,
    ) -> Option<Self> {
        Self::try_new(fields, initial_state, on_submit)
            .inspect_err(|err| tracing::error!(%err, "form not mounted"))
            .ok()
    }

    /// Adds a whole-form validator.
    ///
    /// Entries mapped to `None` or to an empty message are ignored.
    #[must_use]
    pub fn with_validator(
        mut self,
        validate: impl Fn(&FormData) -> BTreeMap<String, Option<String>> + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validate));
        self
    }

    /// Field configurations.
    #[must_use]
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Configuration of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if the form does not declare `name`.
    pub fn field(&self, name: &str) -> Result<&FieldConfig, FormError> {
        self.fields
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.into()))
    }

    /// Current form data.
    #[must_use]
    pub fn form_data(&self) -> &FormData {
        &self.data
    }

    /// The snapshot restored by [`reset_form`](Self::reset_form).
    #[must_use]
    pub fn initial_data(&self) -> &FormData {
        &self.initial
    }

    /// Current value of `key`, or [`FieldValue::Null`] if it has none.
    #[must_use]
    pub fn value(&self, key: &str) -> &FieldValue {
        static NULL: FieldValue = FieldValue::Null;
        self.data.get(key).unwrap_or(&NULL)
    }

    /// Updates the form for a new `value` of `key`.
    ///
    /// If the field has a derived update, only its returned entries are
    /// merged; `key` itself changes only if the update includes it.
    /// Otherwise `key` is set to `value`.
    pub fn set_value(&mut self, key: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self
            .fields
            .get(key)
            .and_then(|field| field.derive(&value, &self.data))
        {
            Some(derived) => {
                tracing::trace!(key, changed = derived.len(), "derived field update");
                self.data.extend(derived);
            }
            None => {
                self.data.insert(key.into(), value);
            }
        }
    }

    /// Replaces the whole form data.
    pub fn set_form_data(&mut self, data: FormData) {
        self.data = data;
    }

    /// Errors for the current data: the validator's non-empty messages plus
    /// [`REQUIRED`] for every empty required field the validator left alone.
    #[must_use]
    pub fn validation_errors(&self) -> ValidationErrors {
        let mut errors: ValidationErrors = self
            .validator
            .as_ref()
            .map(|validate| {
                validate(&self.data)
                    .into_iter()
                    .filter_map(|(key, message)| {
                        message
                            .filter(|message| !message.is_empty())
                            .map(|message| (key, message))
                    })
                    .collect()
            })
            .unwrap_or_default();
        for (name, field) in &self.fields {
            if field.is_required() && self.value(name).is_empty() {
                errors
                    .entry(name.clone())
                    .or_insert_with(|| REQUIRED.into());
            }
        }
        errors
    }

    /// Returns `true` if there are no validation errors.
    #[must_use]
    pub fn is_validated(&self) -> bool {
        self.validation_errors().is_empty()
    }

    /// Errors to display: none until the first submit attempt.
    #[must_use]
    pub fn visible_errors(&self) -> ValidationErrors {
        if self.pristine {
            ValidationErrors::new()
        } else {
            self.validation_errors()
        }
    }

    /// Visible error of one field.
    #[must_use]
    pub fn error(&self, key: &str) -> Option<String> {
        self.visible_errors().remove(key)
    }

    /// Returns `true` until the first submit attempt after mount or reset.
    #[must_use]
    pub const fn is_pristine(&self) -> bool {
        self.pristine
    }

    /// Returns `true` between a submission and its [`complete`](Self::complete).
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Attempts to submit.
    ///
    /// Always makes errors visible. If the form validates, it starts loading
    /// and calls the submit handler once with the current data and a [`Done`]
    /// token. The loading flag has no timeout.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.pristine = false;
        if self.loading.is_some() {
            tracing::debug!("submit ignored while a submission is pending");
            return SubmitOutcome::Busy;
        }
        let errors = self.validation_errors();
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "submit blocked by validation errors");
            return SubmitOutcome::Invalid;
        }
        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        self.loading = Some(token);
        (self.on_submit)(&self.data, Done { token });
        SubmitOutcome::Submitted
    }

    /// Clears the loading flag of the submission `done` belongs to.
    ///
    /// Returns `false` for a token from an older submission.
    pub fn complete(&mut self, done: Done) -> bool {
        if self.loading != Some(done.token) {
            tracing::trace!(token = done.token, "stale submit completion ignored");
            return false;
        }
        self.loading = None;
        true
    }

    /// Restores the initial snapshot and hides errors again.
    pub fn reset_form(&mut self) {
        self.data = self.initial.clone();
        self.pristine = true;
    }

    /// Resets the form whenever `trigger` differs from the last value seen.
    ///
    /// Hosts pass a value that changes each time the form should start over,
    /// such as a counter bumped when a modal opens. Returns `true` if the form
    /// was reset.
    pub fn sync_reset_trigger(&mut self, trigger: u64) -> bool {
        if self.reset_trigger == Some(trigger) {
            return false;
        }
        self.reset_trigger = Some(trigger);
        self.reset_form();
        true
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("fields", &self.fields)
            .field("data", &self.data)
            .field("pristine", &self.pristine)
            .field("loading", &self.loading)
            .field("validator", &self.validator.is_some())
            .field("reset_trigger", &self.reset_trigger)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use hashbrown::HashMap;

    use super::{Done, FormState, REQUIRED, SubmitOutcome};
    use crate::{FieldConfig, FieldValue, FormData, FormError};

    type Calls = Rc<RefCell<Vec<(FormData, Done)>>>;

    fn form(fields: Vec<(&str, FieldConfig)>, initial: FormData) -> (FormState, Calls) {
        let calls: Calls = Rc::default();
        let sink = calls.clone();
        let fields = fields
            .into_iter()
            .map(|(name, field)| (String::from(name), field))
            .collect::<HashMap<_, _>>();
        let form = FormState::try_new(Some(fields), initial, move |data, done| {
            sink.borrow_mut().push((data.clone(), done));
        })
        .unwrap();
        (form, calls)
    }

    #[test]
    fn submit_is_gated_on_required_fields() {
        let (mut form, calls) = form(
            Vec::from([("name", FieldConfig::new("Name").required())]),
            FormData::new(),
        );
        assert!(form.visible_errors().is_empty());

        assert_eq!(form.submit(), SubmitOutcome::Invalid);
        assert!(!form.is_pristine());
        assert!(!form.is_validated());
        assert!(calls.borrow().is_empty());
        assert_eq!(form.error("name").as_deref(), Some(REQUIRED));

        form.set_value("name", "Ada");
        assert_eq!(form.submit(), SubmitOutcome::Submitted);
        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0["name"], FieldValue::from("Ada"));
    }

    #[test]
    fn loading_lasts_until_the_latest_completion() {
        let (mut form, calls) = form(Vec::new(), FormData::new());
        assert_eq!(form.submit(), SubmitOutcome::Submitted);
        assert!(form.is_loading());
        assert_eq!(form.submit(), SubmitOutcome::Busy);
        assert_eq!(calls.borrow().len(), 1);

        let done = calls.borrow()[0].1;
        assert!(form.complete(done));
        assert!(!form.is_loading());
        assert!(!form.complete(done));

        assert_eq!(form.submit(), SubmitOutcome::Submitted);
        assert!(!form.complete(done));
        assert!(form.is_loading());
        let latest = calls.borrow()[1].1;
        assert!(form.complete(latest));
    }

    #[test]
    fn reset_trigger_restores_the_initial_snapshot() {
        let initial = FormData::from([("title".into(), FieldValue::from("Draft"))]);
        let (mut form, _) = form(
            Vec::from([
                ("title", FieldConfig::new("Title").initial_value("Untitled")),
                ("pages", FieldConfig::new("Pages").initial_value(1)),
            ]),
            initial,
        );
        assert_eq!(form.value("title"), &FieldValue::from("Draft"));
        assert_eq!(form.value("pages"), &FieldValue::Number(1.0));

        assert!(form.sync_reset_trigger(1));
        form.set_value("title", "Final");
        form.set_value("pages", 12);
        let _ = form.submit();
        assert!(!form.sync_reset_trigger(1));
        assert_eq!(form.value("title"), &FieldValue::from("Final"));

        assert!(form.sync_reset_trigger(2));
        assert_eq!(form.value("title"), &FieldValue::from("Draft"));
        assert_eq!(form.value("pages"), &FieldValue::Number(1.0));
        assert!(form.is_pristine());
    }

    #[test]
    fn derived_updates_cascade() {
        let (mut form, _) = form(
            Vec::from([(
                "country",
                FieldConfig::new("Country").on_change(|value, data| {
                    let mut update = FormData::from([("country".into(), value.clone())]);
                    if data.get("country") != Some(value) {
                        update.insert("city".into(), FieldValue::Null);
                    }
                    update
                }),
            )]),
            FormData::from([
                ("country".into(), FieldValue::from("FR")),
                ("city".into(), FieldValue::from("Lyon")),
            ]),
        );
        form.set_value("country", "FR");
        assert_eq!(form.value("city"), &FieldValue::from("Lyon"));
        form.set_value("country", "DE");
        assert_eq!(form.value("country"), &FieldValue::from("DE"));
        assert_eq!(form.value("city"), &FieldValue::Null);

        // Fields without a derived update are set directly.
        form.set_value("note", true);
        assert_eq!(form.value("note"), &FieldValue::Bool(true));
        assert_eq!(form.value("missing"), &FieldValue::Null);
    }

    #[test]
    fn derived_update_is_the_only_merge() {
        let (mut form, _) = form(
            Vec::from([
                ("price", FieldConfig::new("Price").on_change(|_, _| FormData::new())),
                (
                    "code",
                    FieldConfig::new("Code").on_change(|value, _| {
                        let code = match value {
                            FieldValue::Text(text) => FieldValue::from(text.to_uppercase()),
                            other => other.clone(),
                        };
                        FormData::from([("code".into(), code)])
                    }),
                ),
            ]),
            FormData::from([("price".into(), FieldValue::Number(4.0))]),
        );

        // An empty update rejects the input.
        form.set_value("price", "rejected");
        assert_eq!(form.value("price"), &FieldValue::Number(4.0));

        // The update replaces the input with its own value.
        form.set_value("code", "eu-west");
        assert_eq!(form.value("code"), &FieldValue::from("EU-WEST"));
    }

    #[test]
    fn validator_output_is_merged_with_required_errors() {
        let (form, _) = form(
            Vec::from([
                ("email", FieldConfig::new("Email").required()),
                ("age", FieldConfig::new("Age").required().initial_value(12)),
            ]),
            FormData::new(),
        );
        let mut form = form.with_validator(|data| {
            BTreeMap::from([
                ("email".into(), None),
                ("name".into(), Some(String::new())),
                (
                    "age".into(),
                    data.get("age")
                        .and_then(FieldValue::as_number)
                        .filter(|age| *age < 18.0)
                        .map(|_| "too young".into()),
                ),
            ])
        });
        let errors = form.validation_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["email"], REQUIRED);
        assert_eq!(errors["age"], "too young");

        form.set_value("email", "a@b.c");
        form.set_value("age", 30);
        assert!(form.is_validated());
        assert!(form.visible_errors().is_empty());
    }

    #[test]
    fn reset_hides_errors_again() {
        let (mut form, _) = form(
            Vec::from([("name", FieldConfig::new("Name").required())]),
            FormData::new(),
        );
        let _ = form.submit();
        assert!(!form.visible_errors().is_empty());
        form.reset_form();
        assert!(form.is_pristine());
        assert!(form.visible_errors().is_empty());
        assert!(!form.is_validated());
    }

    #[test]
    fn missing_field_configuration() {
        assert_eq!(
            FormState::try_new(None, FormData::new(), |_, _| {}).unwrap_err(),
            FormError::MissingFields
        );
        assert!(FormState::new(None, FormData::new(), |_, _| {}).is_none());

        let (form, _) = form(Vec::new(), FormData::new());
        assert_eq!(
            form.field("ghost").unwrap_err(),
            FormError::UnknownField("ghost".into())
        );
    }

    #[test]
    fn set_form_data_replaces_everything() {
        let (mut form, _) = form(
            Vec::from([("a", FieldConfig::new("A").initial_value("x"))]),
            FormData::new(),
        );
        form.set_form_data(FormData::from([("b".into(), FieldValue::from(2))]));
        assert_eq!(form.value("a"), &FieldValue::Null);
        assert_eq!(form.initial_data()["a"], FieldValue::from("x"));
    }
}
