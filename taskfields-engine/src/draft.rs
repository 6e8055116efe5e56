//! Draft-then-commit schema editing.
//!
//! Columns added before their owning project is durably created live in a
//! [`DraftSet`]: client-held, ranked, and freely retypeable. Committing
//! flushes them through the registry in their draft-time relative order,
//! appended after the project's existing columns. Draft vs committed is an
//! explicit type distinction - a draft has a [`DraftId`], a committed column
//! a `ColumnId` - never an id-prefix convention.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use taskfields_model::ordering::{self, Orderable};
use taskfields_model::{Column, ColumnDraft, ColumnType, ProjectId};

use crate::error::Result;
use crate::registry::SchemaRegistry;

/// Temporary identity of a not-yet-committed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(String);

impl DraftId {
    fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A column that exists only client-side. Unlike a persisted column, its
/// type may still change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftColumn {
    pub id: DraftId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: ColumnType,
    #[serde(default)]
    pub is_milestone: bool,
    pub order: i64,
}

impl DraftColumn {
    /// Change the type. Free while drafting; impossible after commit.
    pub fn set_type(&mut self, type_: ColumnType) {
        self.type_ = type_;
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_milestone(&mut self, is_milestone: bool) {
        self.is_milestone = is_milestone;
    }
}

impl Orderable for DraftColumn {
    type Id = DraftId;

    fn order_id(&self) -> DraftId {
        self.id.clone()
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

/// An ordered collection of draft columns awaiting their project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DraftSet {
    items: Vec<DraftColumn>,
}

impl DraftSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a draft at the end, returning its temporary id.
    pub fn add(&mut self, name: impl Into<String>, type_: ColumnType) -> DraftId {
        let id = DraftId::new();
        self.items.push(DraftColumn {
            id: id.clone(),
            name: name.into(),
            type_,
            is_milestone: false,
            order: self.items.len() as i64 + 1,
        });
        id
    }

    pub fn get(&self, id: &DraftId) -> Option<&DraftColumn> {
        self.items.iter().find(|d| d.id == *id)
    }

    pub fn get_mut(&mut self, id: &DraftId) -> Option<&mut DraftColumn> {
        self.items.iter_mut().find(|d| d.id == *id)
    }

    /// Drafts in their current relative order.
    pub fn iter_ordered(&self) -> Vec<&DraftColumn> {
        let mut refs: Vec<&DraftColumn> = self.items.iter().collect();
        refs.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        refs
    }

    /// Move a draft immediately before another, client-side.
    pub fn reorder(&mut self, moved: &DraftId, target: &DraftId) -> Result<()> {
        ordering::reorder(&mut self.items, moved, target)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flush every draft into the registry in draft-time relative order,
    /// appended after the project's current maximum rank. Consumes the set:
    /// committed columns carry real ids and locked types.
    pub async fn commit(
        mut self,
        registry: &SchemaRegistry,
        project: &ProjectId,
    ) -> Result<Vec<Column>> {
        ordering::sort_by_rank(&mut self.items);

        let mut committed = Vec::with_capacity(self.items.len());
        for draft in self.items {
            let column = registry
                .create(
                    ColumnDraft::new(project.clone(), draft.name, draft.type_)
                        .with_milestone(draft.is_milestone),
                )
                .await?;
            committed.push(column);
        }
        Ok(committed)
    }
}
