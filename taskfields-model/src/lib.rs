//! Column schema model and pure evaluation
//!
//! `taskfields-model` is the schema-only half of taskfields: column
//! definitions with declared types, the protected standard-field slots,
//! sparse typed task values, generic rank ordering, and the type-directed
//! filter evaluator. It knows nothing about storage or projects beyond their
//! ids — the `taskfields-engine` crate layers persistence and lifecycle on
//! top.
//!
//! # Architecture
//!
//! - **Schema-only**: owns column and value *shapes*, never their storage
//! - **Tagged values**: a task value's variant is dictated by its column's
//!   declared type, so every read site is exhaustive-checked
//! - **One ordering**: a single `Orderable` implementation serves columns,
//!   drafts, and any analogous ranked list
//! - **Pure filtering**: `filter::evaluate` is a function of the task's
//!   values, the filter set, and the active columns — nothing else

pub mod filter;
pub mod ordering;
pub mod types;

pub use filter::{evaluate, FilterValue, FiltersState};
pub use ordering::{Direction, Orderable, OrderingError};
pub use types::{
    Column, ColumnDraft, ColumnId, ColumnType, CustomValue, PersonId, ProjectId, StandardField,
    TaskId, TaskValues,
};
