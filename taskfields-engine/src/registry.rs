//! SchemaRegistry - authoritative listing and lifecycle of a project's columns.

use std::sync::Arc;

use tracing::{debug, warn};

use taskfields_model::ordering;
use taskfields_model::{Column, ColumnDraft, ColumnId, ColumnType, ProjectId};

use crate::error::{Result, SchemaError};
use crate::store::{ColumnPatch, ColumnStore};

/// Column lifecycle over a [`ColumnStore`].
///
/// The registry owns the schema invariants: one active column per standard
/// field and project, protected columns hidden rather than deleted, types
/// locked after first persistence.
#[derive(Clone)]
pub struct SchemaRegistry {
    store: Arc<dyn ColumnStore>,
}

impl SchemaRegistry {
    pub fn new(store: Arc<dyn ColumnStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn ColumnStore> {
        &self.store
    }

    /// All active columns of a project in display order: rank ascending,
    /// ties broken by id.
    pub async fn list_active(&self, project: &ProjectId) -> Result<Vec<Column>> {
        let mut columns: Vec<Column> = self
            .store
            .list_columns_by_project(project)
            .await?
            .into_iter()
            .filter(|c| c.active)
            .collect();
        ordering::sort_by_rank(&mut columns);
        Ok(columns)
    }

    /// Fetch a single column, active or not.
    pub async fn get(&self, id: &ColumnId) -> Result<Column> {
        self.store
            .get_column(id)
            .await?
            .ok_or_else(|| SchemaError::column_not_found(id.as_str()))
    }

    /// Create a column. When the draft carries no rank, it is appended after
    /// the project's current maximum.
    pub async fn create(&self, mut draft: ColumnDraft) -> Result<Column> {
        let existing = self.store.list_columns_by_project(&draft.project).await?;

        if let Some(field) = draft.standard_field {
            let taken = existing
                .iter()
                .any(|c| c.active && c.standard_field == Some(field));
            if taken {
                return Err(SchemaError::duplicate_standard_field(
                    field.display_name(),
                    draft.project.as_str(),
                ));
            }
        }

        if draft.order.is_none() {
            let max = existing.iter().map(|c| c.order).max().unwrap_or(0);
            draft.order = Some(max + 1);
        }

        // Options stay unvalidated at write time, but an empty list makes a
        // select column unusable for filtering, so leave a trace.
        if matches!(&draft.type_, ColumnType::List { options } if options.is_empty()) {
            warn!(name = %draft.name, project = %draft.project, "creating list column with no options");
        }

        let column = self.store.create_column(draft).await?;
        debug!(id = %column.id, name = %column.name, order = column.order, "column created");
        Ok(column)
    }

    /// Rename a column. Names are mutable at any time.
    pub async fn rename(&self, id: &ColumnId, new_name: impl Into<String>) -> Result<()> {
        self.store
            .update_column(id, ColumnPatch::new().name(new_name))
            .await?;
        Ok(())
    }

    /// Replace the option list of a `List` column. No effect on other types.
    pub async fn update_options(&self, id: &ColumnId, options: Vec<String>) -> Result<()> {
        self.store
            .update_column(id, ColumnPatch::new().options(options))
            .await?;
        Ok(())
    }

    /// Set or clear the schedule-significant flag.
    pub async fn set_milestone(&self, id: &ColumnId, is_milestone: bool) -> Result<()> {
        self.store
            .update_column(id, ColumnPatch::new().milestone(is_milestone))
            .await?;
        Ok(())
    }

    /// Soft-delete a column: it disappears from listings, value history is
    /// retained. Protected columns refuse this; hide them instead.
    pub async fn soft_delete(&self, id: &ColumnId) -> Result<()> {
        let column = self.get(id).await?;
        if column.is_protected() {
            return Err(SchemaError::ProtectedColumn { id: id.to_string() });
        }
        self.store
            .update_column(id, ColumnPatch::new().active(false))
            .await?;
        debug!(id = %id, "column soft-deleted");
        Ok(())
    }

    /// Flip a protected column's visibility. Leaves `order` and `active`
    /// untouched. Returns the new hidden state.
    pub async fn toggle_visibility(&self, id: &ColumnId) -> Result<bool> {
        let column = self.get(id).await?;
        if !column.is_protected() {
            return Err(SchemaError::NotProtected { id: id.to_string() });
        }
        let hidden = !column.hidden;
        self.store
            .update_column(id, ColumnPatch::new().hidden(hidden))
            .await?;
        Ok(hidden)
    }

    /// Column types are locked once persisted; this always refuses for a
    /// registry column. Retype drafts before committing them instead.
    pub async fn change_type(&self, id: &ColumnId, _new_type: ColumnType) -> Result<()> {
        // Confirm the column exists so callers get the more useful error
        self.get(id).await?;
        Err(SchemaError::TypeLocked { id: id.to_string() })
    }
}
