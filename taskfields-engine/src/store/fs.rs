//! File-backed store - one JSON file per column, one per task's value map.
//!
//! Storage structure:
//!
//! ```text
//! root/
//! ├── columns/
//! │   └── {column_id}.json    # Column definition
//! └── values/
//!     └── {task_id}.json      # Sparse column id → value map
//! ```
//!
//! Writes go through a temp file and rename so readers never observe a
//! half-written entity. Unreadable files are skipped with a warning rather
//! than failing the whole listing.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use ulid::Ulid;

use taskfields_model::{Column, ColumnDraft, ColumnId, CustomValue, ProjectId, TaskId, TaskValues};

use super::{column_from_draft, ColumnPatch, ColumnStore, StoreError, StoreResult};

/// `ColumnStore` backed by a directory of JSON files.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open or create a store rooted at the given directory.
    ///
    /// Idempotent - existing data is left untouched.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self { root: root.into() };
        fs::create_dir_all(store.columns_dir()).await?;
        fs::create_dir_all(store.values_dir()).await?;
        debug!(root = %store.root.display(), "column store opened");
        Ok(store)
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn columns_dir(&self) -> PathBuf {
        self.root.join("columns")
    }

    fn column_path(&self, id: &ColumnId) -> PathBuf {
        self.columns_dir().join(format!("{}.json", id))
    }

    fn values_dir(&self) -> PathBuf {
        self.root.join("values")
    }

    fn values_path(&self, task: &TaskId) -> PathBuf {
        self.values_dir().join(format!("{}.json", task))
    }

    async fn read_column(&self, id: &ColumnId) -> StoreResult<Option<Column>> {
        let path = self.column_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn write_column(&self, column: &Column) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(column)?;
        atomic_write(&self.column_path(&column.id), content.as_bytes()).await
    }

    async fn read_values(&self, task: &TaskId) -> StoreResult<TaskValues> {
        let path = self.values_path(task);
        if !path.exists() {
            return Ok(TaskValues::new());
        }
        let content = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_values(&self, task: &TaskId, values: &TaskValues) -> StoreResult<()> {
        let path = self.values_path(task);
        if values.is_empty() {
            // Don't leave empty maps behind
            if path.exists() {
                fs::remove_file(&path).await?;
            }
            return Ok(());
        }
        let content = serde_json::to_string_pretty(values)?;
        atomic_write(&path, content.as_bytes()).await
    }
}

#[async_trait]
impl ColumnStore for FsStore {
    async fn create_column(&self, draft: ColumnDraft) -> StoreResult<Column> {
        let column = column_from_draft(ColumnId::new(), draft);
        self.write_column(&column).await?;
        Ok(column)
    }

    async fn get_column(&self, id: &ColumnId) -> StoreResult<Option<Column>> {
        self.read_column(id).await
    }

    async fn update_column(&self, id: &ColumnId, patch: ColumnPatch) -> StoreResult<()> {
        let mut column = self
            .read_column(id)
            .await?
            .ok_or_else(|| StoreError::ColumnNotFound { id: id.to_string() })?;
        patch.apply(&mut column);
        self.write_column(&column).await
    }

    async fn list_columns_by_project(&self, project: &ProjectId) -> StoreResult<Vec<Column>> {
        let dir = self.columns_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut columns = Vec::new();
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(?path, %e, "skipping unreadable column file");
                    continue;
                }
            };
            match serde_json::from_str::<Column>(&content) {
                Ok(column) if column.project == *project => columns.push(column),
                Ok(_) => {}
                Err(e) => {
                    warn!(?path, %e, "skipping unreadable column file");
                }
            }
        }
        Ok(columns)
    }

    async fn get_task_value(
        &self,
        task: &TaskId,
        column: &ColumnId,
    ) -> StoreResult<Option<CustomValue>> {
        Ok(self.read_values(task).await?.get(column).cloned())
    }

    async fn set_task_value(
        &self,
        task: &TaskId,
        column: &ColumnId,
        value: CustomValue,
    ) -> StoreResult<()> {
        let mut values = self.read_values(task).await?;
        values.set(column.clone(), value);
        self.write_values(task, &values).await
    }

    async fn clear_task_value(&self, task: &TaskId, column: &ColumnId) -> StoreResult<()> {
        let mut values = self.read_values(task).await?;
        if values.clear(column).is_some() {
            self.write_values(task, &values).await?;
        }
        Ok(())
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> StoreResult<()> {
    let dir = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent directory")
    })?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, content).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}
