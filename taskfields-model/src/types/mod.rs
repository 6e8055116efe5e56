//! Core types for the column schema engine

mod column;
mod ids;
mod value;

// Re-export all types
pub use column::{Column, ColumnDraft, ColumnType, StandardField};
pub use ids::{ColumnId, PersonId, ProjectId, TaskId};
pub use value::{CustomValue, TaskValues};
