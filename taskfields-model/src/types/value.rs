//! Typed task values, stored sparsely per column.
//!
//! The value's variant is dictated by the owning column's declared type.
//! Absence of a map key means "no value set", which is distinct from an
//! empty string or zero.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ids::{ColumnId, PersonId};

/// A single task value, discriminated to match the owning column's type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum CustomValue {
    /// Value of a `Text` column.
    Text(String),
    /// Value of a `Number` column.
    Number(f64),
    /// Value of a `Date` column, as an ISO-8601 date string.
    Date(String),
    /// Value of a `Percentage` column, 0–100. Out-of-range values read back
    /// from storage are tolerated and flow through numeric filtering as-is;
    /// use [`CustomValue::percentage`] to clamp at construction.
    Percentage(u8),
    /// Value of a `List` column; expected (but not validated) to be a member
    /// of the column's options.
    Choice(String),
    /// Value of a `UserRef` column.
    User(PersonId),
}

impl CustomValue {
    /// A `Percentage` value clamped to 100.
    pub fn percentage(value: u8) -> Self {
        Self::Percentage(value.min(100))
    }

    /// The value as display text, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a number. `Percentage` values coerce to `f64` so both
    /// numeric column types share range semantics.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Percentage(p) => Some(f64::from(*p)),
            _ => None,
        }
    }

    /// The value as an ISO-8601 date string.
    pub fn as_date(&self) -> Option<&str> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// The membership key used by selection filters: the chosen option for
    /// `List` columns, the person id for `UserRef` columns.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Choice(s) => Some(s),
            Self::User(p) => Some(p.as_str()),
            _ => None,
        }
    }
}

/// Sparse `column id → value` map carried by each task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TaskValues(HashMap<ColumnId, CustomValue>);

impl TaskValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value for a column, if one is set.
    pub fn get(&self, column: &ColumnId) -> Option<&CustomValue> {
        self.0.get(column)
    }

    /// Set or overwrite the value for a column.
    pub fn set(&mut self, column: ColumnId, value: CustomValue) {
        self.0.insert(column, value);
    }

    /// Remove the value for a column. Removing the key is the only way to
    /// clear a value; there is no "empty" sentinel.
    pub fn clear(&mut self, column: &ColumnId) -> Option<CustomValue> {
        self.0.remove(column)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over set values.
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnId, &CustomValue)> {
        self.0.iter()
    }
}

impl FromIterator<(ColumnId, CustomValue)> for TaskValues {
    fn from_iter<I: IntoIterator<Item = (ColumnId, CustomValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
