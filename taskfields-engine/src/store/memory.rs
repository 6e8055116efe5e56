//! In-memory store - the transport-free `ColumnStore` implementation.
//!
//! Doubles as the test backend and as an embedded store for callers that
//! persist elsewhere.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use taskfields_model::{Column, ColumnDraft, ColumnId, CustomValue, ProjectId, TaskId, TaskValues};

use super::{column_from_draft, ColumnPatch, ColumnStore, StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    columns: HashMap<ColumnId, Column>,
    values: HashMap<TaskId, TaskValues>,
}

/// `ColumnStore` backed by process-local maps.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ColumnStore for MemoryStore {
    async fn create_column(&self, draft: ColumnDraft) -> StoreResult<Column> {
        let column = column_from_draft(ColumnId::new(), draft);
        self.write().columns.insert(column.id.clone(), column.clone());
        Ok(column)
    }

    async fn get_column(&self, id: &ColumnId) -> StoreResult<Option<Column>> {
        Ok(self.read().columns.get(id).cloned())
    }

    async fn update_column(&self, id: &ColumnId, patch: ColumnPatch) -> StoreResult<()> {
        let mut inner = self.write();
        let column = inner
            .columns
            .get_mut(id)
            .ok_or_else(|| StoreError::ColumnNotFound { id: id.to_string() })?;
        patch.apply(column);
        Ok(())
    }

    async fn list_columns_by_project(&self, project: &ProjectId) -> StoreResult<Vec<Column>> {
        Ok(self
            .read()
            .columns
            .values()
            .filter(|c| c.project == *project)
            .cloned()
            .collect())
    }

    async fn get_task_value(
        &self,
        task: &TaskId,
        column: &ColumnId,
    ) -> StoreResult<Option<CustomValue>> {
        Ok(self
            .read()
            .values
            .get(task)
            .and_then(|v| v.get(column))
            .cloned())
    }

    async fn set_task_value(
        &self,
        task: &TaskId,
        column: &ColumnId,
        value: CustomValue,
    ) -> StoreResult<()> {
        self.write()
            .values
            .entry(task.clone())
            .or_default()
            .set(column.clone(), value);
        Ok(())
    }

    async fn clear_task_value(&self, task: &TaskId, column: &ColumnId) -> StoreResult<()> {
        if let Some(values) = self.write().values.get_mut(task) {
            values.clear(column);
        }
        Ok(())
    }
}
