//! Persistence contract for columns and task values.
//!
//! The engine talks to storage exclusively through [`ColumnStore`]; a
//! relational store, a document store, or the in-memory double all satisfy
//! the same contract. Two implementations ship here: [`MemoryStore`] and the
//! file-backed [`FsStore`].
//!
//! Column types are deliberately absent from [`ColumnPatch`]: once a column
//! is persisted its type cannot be changed through any store operation.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use taskfields_model::{Column, ColumnDraft, ColumnId, ColumnType, CustomValue, ProjectId, TaskId};

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A partial update to a persisted column.
///
/// `options` only has an effect on `List` columns; patches never carry a
/// type.
#[derive(Debug, Clone, Default)]
pub struct ColumnPatch {
    pub name: Option<String>,
    pub options: Option<Vec<String>>,
    pub order: Option<i64>,
    pub is_milestone: Option<bool>,
    pub active: Option<bool>,
    pub hidden: Option<bool>,
}

impl ColumnPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn milestone(mut self, is_milestone: bool) -> Self {
        self.is_milestone = Some(is_milestone);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    /// Apply this patch in place, stamping `updated_at`.
    pub fn apply(&self, column: &mut Column) {
        if let Some(name) = &self.name {
            column.name = name.clone();
        }
        if let Some(options) = &self.options {
            if let ColumnType::List { options: existing } = &mut column.type_ {
                *existing = options.clone();
            }
        }
        if let Some(order) = self.order {
            column.order = order;
        }
        if let Some(is_milestone) = self.is_milestone {
            column.is_milestone = is_milestone;
        }
        if let Some(active) = self.active {
            column.active = active;
        }
        if let Some(hidden) = self.hidden {
            column.hidden = hidden;
        }
        column.updated_at = Utc::now();
    }
}

/// Persistence collaborator for column definitions and sparse task values.
#[async_trait]
pub trait ColumnStore: Send + Sync {
    /// Persist a draft, assigning its id and timestamps. New columns are
    /// active and visible.
    async fn create_column(&self, draft: ColumnDraft) -> StoreResult<Column>;

    /// Fetch a single column by id.
    async fn get_column(&self, id: &ColumnId) -> StoreResult<Option<Column>>;

    /// Apply a partial update to a column.
    async fn update_column(&self, id: &ColumnId, patch: ColumnPatch) -> StoreResult<()>;

    /// All columns of a project, including inactive ones. Callers apply the
    /// `active` filter.
    async fn list_columns_by_project(&self, project: &ProjectId) -> StoreResult<Vec<Column>>;

    /// The task's value for a column, if one is set.
    async fn get_task_value(
        &self,
        task: &TaskId,
        column: &ColumnId,
    ) -> StoreResult<Option<CustomValue>>;

    /// Set or overwrite the task's value for a column.
    async fn set_task_value(
        &self,
        task: &TaskId,
        column: &ColumnId,
        value: CustomValue,
    ) -> StoreResult<()>;

    /// Remove the task's value for a column. Removing an absent value is a
    /// no-op, not an error.
    async fn clear_task_value(&self, task: &TaskId, column: &ColumnId) -> StoreResult<()>;
}

/// Materialize a draft into a full column. Shared by store implementations.
pub(crate) fn column_from_draft(id: ColumnId, draft: ColumnDraft) -> Column {
    let now = Utc::now();
    Column {
        id,
        project: draft.project,
        name: draft.name,
        type_: draft.type_,
        order: draft.order.unwrap_or(0),
        standard_field: draft.standard_field,
        is_milestone: draft.is_milestone,
        active: true,
        hidden: false,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskfields_model::StandardField;

    #[test]
    fn patch_applies_only_set_fields() {
        let draft = ColumnDraft::standard(ProjectId::from_string("p1"), StandardField::Status)
            .with_order(4);
        let mut column = column_from_draft(ColumnId::from_string("c1"), draft);
        let created_at = column.created_at;

        ColumnPatch::new().name("Stage").hidden(true).apply(&mut column);

        assert_eq!(column.name, "Stage");
        assert!(column.hidden);
        assert_eq!(column.order, 4);
        assert!(column.active);
        assert_eq!(column.created_at, created_at);
        assert!(column.updated_at >= created_at);
    }

    #[test]
    fn patch_options_ignored_for_non_list() {
        let draft = ColumnDraft::new(
            ProjectId::from_string("p1"),
            "Effort",
            ColumnType::Number,
        );
        let mut column = column_from_draft(ColumnId::from_string("c1"), draft);

        ColumnPatch::new().options(vec!["x".into()]).apply(&mut column);
        assert_eq!(column.type_, ColumnType::Number);
    }

    #[test]
    fn patch_replaces_list_options() {
        let draft = ColumnDraft::standard(ProjectId::from_string("p1"), StandardField::Priority);
        let mut column = column_from_draft(ColumnId::from_string("c1"), draft);

        ColumnPatch::new()
            .options(vec!["Now".into(), "Later".into()])
            .apply(&mut column);
        assert_eq!(
            column.type_.options().unwrap(),
            &["Now".to_string(), "Later".to_string()]
        );
    }

    #[test]
    fn new_columns_are_active_and_visible() {
        let draft = ColumnDraft::new(ProjectId::from_string("p1"), "Notes", ColumnType::Text);
        let column = column_from_draft(ColumnId::new(), draft);
        assert!(column.active);
        assert!(!column.hidden);
        assert!(column.standard_field.is_none());
    }
}
