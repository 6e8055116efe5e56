//! Type-directed filter evaluation.
//!
//! A `FiltersState` maps columns to filter values; `evaluate` tests a task's
//! sparse values against it, choosing comparison semantics from each
//! column's declared type. Pure functions of their inputs — no state lives
//! here.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::{Column, ColumnId, ColumnType, TaskValues};

/// One column's filter setting.
///
/// Which variant applies follows from the column type: `Text` for text
/// columns, `Selection` for list and user-reference columns, `NumberRange`
/// for number and percentage columns, `DateRange` for date columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FilterValue {
    Text {
        text: String,
    },
    Selection {
        selected: BTreeSet<String>,
    },
    NumberRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Bounds are ISO-8601 date strings; lexical order coincides with
    /// chronological order for that format.
    DateRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<String>,
    },
}

impl FilterValue {
    /// Whether this entry is meaningfully set. A cleared-back-to-default
    /// entry (empty text, empty selection, no bounds) never constrains
    /// anything and is not counted as active.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Text { text } => !text.is_empty(),
            Self::Selection { selected } => !selected.is_empty(),
            Self::NumberRange { min, max } => min.is_some() || max.is_some(),
            Self::DateRange { min, max } => min.is_some() || max.is_some(),
        }
    }
}

/// The active filter set: one optional entry per column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FiltersState(HashMap<ColumnId, FilterValue>);

impl FiltersState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &ColumnId) -> Option<&FilterValue> {
        self.0.get(column)
    }

    pub fn set(&mut self, column: ColumnId, filter: FilterValue) {
        self.0.insert(column, filter);
    }

    pub fn clear(&mut self, column: &ColumnId) {
        self.0.remove(column);
    }

    /// Number of meaningfully set entries — display counters only.
    pub fn count_active(&self) -> usize {
        self.0.values().filter(|f| f.is_active()).count()
    }
}

/// Evaluate a task's values against the filter set: logical AND over every
/// meaningfully set entry. A task with no active filters always passes.
pub fn evaluate(values: &TaskValues, filters: &FiltersState, columns: &[Column]) -> bool {
    columns.iter().all(|column| {
        match filters.get(&column.id) {
            Some(filter) if filter.is_active() => matches_column(values, column, filter),
            _ => true,
        }
    })
}

/// Test one column's filter against the task's value, using the column's
/// declared type to choose semantics. A filter variant that does not match
/// the column type is stale state and is ignored.
fn matches_column(values: &TaskValues, column: &Column, filter: &FilterValue) -> bool {
    let value = values.get(&column.id);

    match (&column.type_, filter) {
        // Case-insensitive substring; an absent value reads as "".
        (ColumnType::Text, FilterValue::Text { text }) => {
            let haystack = value.and_then(|v| v.as_text()).unwrap_or("");
            haystack.to_lowercase().contains(&text.to_lowercase())
        }

        // Membership; an absent value matches nothing.
        (ColumnType::List { .. } | ColumnType::UserRef, FilterValue::Selection { selected }) => {
            match value.and_then(|v| v.as_key()) {
                Some(key) => selected.contains(key),
                None => false,
            }
        }

        // Inclusive range; an absent value is excluded once any bound is set.
        (ColumnType::Number | ColumnType::Percentage, FilterValue::NumberRange { min, max }) => {
            match value.and_then(|v| v.as_number()) {
                Some(n) => min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi),
                None => false,
            }
        }

        // Same policy as numeric; ISO-8601 strings compare lexically.
        (ColumnType::Date, FilterValue::DateRange { min, max }) => {
            match value.and_then(|v| v.as_date()) {
                Some(d) => {
                    min.as_deref().map_or(true, |lo| d >= lo)
                        && max.as_deref().map_or(true, |hi| d <= hi)
                }
                None => false,
            }
        }

        _ => true,
    }
}
