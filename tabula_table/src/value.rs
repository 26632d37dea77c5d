// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell values and the [`Record`] field lookup trait.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A value read out of a row through an [`Accessor`](crate::Accessor).
///
/// The table never inspects rows directly; everything it filters, sorts, sums,
/// or uses as a move identity is a `CellValue`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum CellValue {
    /// No value. Never matches a filter and sorts as incomparable.
    #[default]
    Empty,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// Text.
    Text(String),
}

impl CellValue {
    /// Returns `true` for [`CellValue::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Numeric view used by footer sums.
    ///
    /// Text is parsed after trimming; anything else non-numeric is `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(
                clippy::cast_precision_loss,
                reason = "Sums are reported as f64 anyway"
            )]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Empty | Self::Bool(_) => None,
        }
    }

    /// Text used for filtering, or `None` if the value cannot be matched.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Empty => None,
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Compares two values for sorting.
    ///
    /// Returns `None` if either side is incomparable ([`CellValue::Empty`] or NaN).
    /// Values of different kinds order as booleans, then numbers, then text.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Option<Ordering> {
        let (a, b) = (self.sort_key()?, other.sort_key()?);
        Some(match (a, b) {
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(&b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(&b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        })
    }

    /// Returns `false` for values that sort as incomparable.
    pub(crate) fn is_comparable(&self) -> bool {
        self.sort_key().is_some()
    }

    fn sort_key(&self) -> Option<SortKey<'_>> {
        match self {
            Self::Empty => None,
            Self::Bool(b) => Some(SortKey::Bool(*b)),
            #[allow(
                clippy::cast_precision_loss,
                reason = "All numbers compare in one f64 space so the order stays total"
            )]
            Self::Int(i) => Some(SortKey::Number(*i as f64)),
            Self::Float(f) if f.is_nan() => None,
            Self::Float(f) => Some(SortKey::Number(*f)),
            Self::Text(s) => Some(SortKey::Text(s)),
        }
    }
}

#[derive(Clone, Copy)]
enum SortKey<'a> {
    Bool(bool),
    Number(f64),
    Text(&'a str),
}

impl SortKey<'_> {
    const fn rank(self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Rows that expose named fields.
///
/// Implementing this lets columns be declared by field name via
/// [`Accessor::field`](crate::Accessor::field).
pub trait Record {
    /// Value of the named field, or [`CellValue::Empty`] if absent.
    fn field(&self, name: &str) -> CellValue;
}

impl Record for BTreeMap<String, CellValue> {
    fn field(&self, name: &str) -> CellValue {
        self.get(name).cloned().unwrap_or_default()
    }
}

#[cfg(feature = "json")]
impl Record for serde_json::Value {
    fn field(&self, name: &str) -> CellValue {
        use serde_json::Value;
        match self.get(name) {
            None | Some(Value::Null) => CellValue::Empty,
            Some(Value::Bool(b)) => CellValue::Bool(*b),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(CellValue::Int)
                .or_else(|| n.as_f64().map(CellValue::Float))
                .unwrap_or_default(),
            Some(Value::String(s)) => CellValue::Text(s.clone()),
            Some(other) => CellValue::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::collections::BTreeMap;

    use super::{CellValue, Record};

    #[test]
    fn incomparable_values() {
        let one = CellValue::Int(1);
        assert_eq!(CellValue::Empty.sort_cmp(&one), None);
        assert_eq!(one.sort_cmp(&CellValue::Float(f64::NAN)), None);
    }

    #[test]
    fn numbers_compare_across_kinds() {
        assert_eq!(
            CellValue::Int(2).sort_cmp(&CellValue::Float(1.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            CellValue::from("Bob").sort_cmp(&CellValue::from("John")),
            Some(Ordering::Less)
        );
        assert_eq!(
            CellValue::Int(100).sort_cmp(&CellValue::from("1")),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn numeric_and_text_views() {
        assert_eq!(CellValue::from(" 2.5 ").as_f64(), Some(2.5));
        assert_eq!(CellValue::Bool(true).as_f64(), None);
        assert_eq!(CellValue::Int(30).as_text().as_deref(), Some("30"));
        assert_eq!(CellValue::Empty.as_text(), None);
        assert_eq!(CellValue::from(None::<i64>), CellValue::Empty);
    }

    #[test]
    fn map_records() {
        let mut row = BTreeMap::new();
        row.insert("name".to_owned(), CellValue::from("Jane"));
        assert_eq!(row.field("name"), CellValue::from("Jane"));
        assert_eq!(row.field("age"), CellValue::Empty);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_records() {
        let row = serde_json::json!({ "name": "Bob", "age": 35, "score": 1.5, "tags": ["a"] });
        assert_eq!(row.field("name"), CellValue::from("Bob"));
        assert_eq!(row.field("age"), CellValue::Int(35));
        assert_eq!(row.field("score"), CellValue::Float(1.5));
        assert_eq!(row.field("tags"), CellValue::from(r#"["a"]"#));
        assert_eq!(row.field("missing"), CellValue::Empty);
    }
}
