//! Dynamic per-project column schema engine
//!
//! Projects define their own typed task fields ("columns") instead of a
//! fixed relational schema. This crate owns the column lifecycle on top of a
//! pluggable persistence collaborator:
//!
//! - **[`SchemaRegistry`]** - listing, creation, rename, option edits, soft
//!   delete, and visibility for a project's columns, enforcing the
//!   protected-field rules
//! - **[`OrderingService`]** - rank reordering persisted row by row, with
//!   self-healing on partial failure
//! - **[`DefaultSchemaProvisioner`]** - installs the eight canonical
//!   standard columns and backfills missing ones
//! - **[`DraftSet`]** - columns composed client-side before their project
//!   exists, committed in draft order
//! - **[`store::ColumnStore`]** - the persistence contract, with in-memory
//!   and file-backed implementations
//!
//! Filter evaluation and the column/value types live in `taskfields-model`
//! and are re-exported here.
//!
//! ## Basic usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskfields_engine::{
//!     DefaultSchemaProvisioner, DraftSet, SchemaRegistry,
//!     store::MemoryStore,
//! };
//! use taskfields_engine::model::ProjectId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new(Arc::new(MemoryStore::new()));
//! let provisioner = DefaultSchemaProvisioner::new(registry.clone());
//!
//! let project = ProjectId::new();
//! provisioner.on_project_created(&project, DraftSet::new()).await?;
//!
//! for column in registry.list_active(&project).await? {
//!     println!("{} {}", column.order, column.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod defaults;
pub mod draft;
mod error;
pub mod ordering;
mod registry;
pub mod store;

pub use defaults::{standard_columns, DefaultSchemaProvisioner, RestoreReport};
pub use draft::{DraftColumn, DraftId, DraftSet};
pub use error::{Result, SchemaError};
pub use ordering::{OrderingService, ReorderOutcome};
pub use registry::SchemaRegistry;

/// Re-export of the model crate.
pub use taskfields_model as model;

// Re-export commonly used model types
pub use taskfields_model::{
    Column, ColumnDraft, ColumnId, ColumnType, CustomValue, Direction, FilterValue, FiltersState,
    PersonId, ProjectId, StandardField, TaskId, TaskValues,
};
