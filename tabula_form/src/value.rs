// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field values and the form data map.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Current values of a form, keyed by field name.
pub type FormData = BTreeMap<String, FieldValue>;

/// The value of one form field.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum FieldValue {
    /// No value yet.
    #[default]
    Null,
    /// A checkbox or toggle.
    Bool(bool),
    /// A numeric input.
    Number(f64),
    /// A text input or a single select.
    Text(String),
    /// A multi-select.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns `true` for values that fail a `required` check.
    ///
    /// Null, empty text, and empty lists are empty; `false` and `0` are not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Text contents, if this is [`FieldValue::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Boolean contents, if this is [`FieldValue::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric contents, if this is [`FieldValue::Number`].
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// List contents, if this is [`FieldValue::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl<V: Into<FieldValue>> From<Vec<V>> for FieldValue {
    fn from(items: Vec<V>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::FieldValue;

    #[test]
    fn emptiness() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::from(Vec::<&str>::new()).is_empty());
        assert!(!FieldValue::from(false).is_empty());
        assert!(!FieldValue::from(0).is_empty());
        assert!(!FieldValue::from(" ").is_empty());
        assert!(!FieldValue::from(vec!["a"]).is_empty());
    }

    #[test]
    fn options_become_null() {
        assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(2.5)), FieldValue::Number(2.5));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn untagged_json() {
        let value: FieldValue = serde_json::from_str(r#"["a", 1, true, null]"#).unwrap();
        assert_eq!(
            value,
            FieldValue::List(vec![
                FieldValue::from("a"),
                FieldValue::Number(1.0),
                FieldValue::Bool(true),
                FieldValue::Null,
            ])
        );
    }
}
