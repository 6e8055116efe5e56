//! Column definitions — the per-project schema for task fields.
//!
//! A `Column` describes one typed, ordered field attached to every task of a
//! project. Columns bound to a `StandardField` slot are protected: they ship
//! with every project, cannot be soft-deleted, and can only be hidden.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ColumnId, ProjectId};

/// The type of a column — determines what shape its task values take.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ColumnType {
    Text,
    Number,
    Date,
    /// Integer 0–100.
    Percentage,
    /// Single-select from an ordered option list. Options are authoritative
    /// for filtering and display only; stored values are not validated
    /// against them.
    List { options: Vec<String> },
    /// Stores a person identifier.
    UserRef,
}

impl ColumnType {
    /// Option list for `List` columns, `None` for every other type.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::List { options } => Some(options),
            _ => None,
        }
    }
}

/// The eight protected built-in semantic slots.
///
/// At most one active column per project may carry a given slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum StandardField {
    Name,
    Description,
    Responsible,
    Status,
    Priority,
    StartDate,
    EndDate,
    Progress,
}

impl StandardField {
    /// All slots in canonical provisioning order.
    pub fn all() -> [StandardField; 8] {
        [
            Self::Name,
            Self::Description,
            Self::Responsible,
            Self::Status,
            Self::Priority,
            Self::StartDate,
            Self::EndDate,
            Self::Progress,
        ]
    }

    /// Default display name for a freshly provisioned column.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Responsible => "Responsible",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::StartDate => "Start date",
            Self::EndDate => "End date",
            Self::Progress => "Progress",
        }
    }

    /// Canonical column type for this slot, including the seeded option
    /// lists for the select-style slots.
    pub fn default_type(&self) -> ColumnType {
        match self {
            Self::Name | Self::Description => ColumnType::Text,
            Self::Responsible => ColumnType::UserRef,
            Self::Status => ColumnType::List {
                options: vec![
                    "Open".into(),
                    "In Progress".into(),
                    "Blocked".into(),
                    "Done".into(),
                ],
            },
            Self::Priority => ColumnType::List {
                options: vec![
                    "Low".into(),
                    "Medium".into(),
                    "High".into(),
                    "Urgent".into(),
                ],
            },
            Self::StartDate | Self::EndDate => ColumnType::Date,
            Self::Progress => ColumnType::Percentage,
        }
    }
}

/// A persisted column definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub id: ColumnId,
    pub project: ProjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: ColumnType,
    /// Display rank. Not required to be contiguous; listings break ties by id.
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_field: Option<StandardField>,
    /// Marks the column as schedule-significant. Orthogonal to type.
    #[serde(default)]
    pub is_milestone: bool,
    /// `false` means soft-deleted: excluded from listings, values retained.
    pub active: bool,
    /// Meaningful only for protected columns, which cannot be deleted.
    #[serde(default)]
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    /// Whether this column is bound to a protected standard slot.
    pub fn is_protected(&self) -> bool {
        self.standard_field.is_some()
    }
}

/// The shape handed to the store for creation — everything but the id,
/// which the store assigns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDraft {
    pub project: ProjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: ColumnType,
    /// Explicit rank; when `None` the registry appends after the current max.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_field: Option<StandardField>,
    #[serde(default)]
    pub is_milestone: bool,
}

impl ColumnDraft {
    /// Create a draft for a user-defined custom column.
    pub fn new(project: ProjectId, name: impl Into<String>, type_: ColumnType) -> Self {
        Self {
            project,
            name: name.into(),
            type_,
            order: None,
            standard_field: None,
            is_milestone: false,
        }
    }

    /// Create a draft for a protected standard column with its canonical
    /// name and type.
    pub fn standard(project: ProjectId, field: StandardField) -> Self {
        Self {
            project,
            name: field.display_name().into(),
            type_: field.default_type(),
            order: None,
            standard_field: Some(field),
            is_milestone: false,
        }
    }

    /// Set an explicit rank.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Mark the column as schedule-significant.
    pub fn with_milestone(mut self, is_milestone: bool) -> Self {
        self.is_milestone = is_milestone;
        self
    }
}
