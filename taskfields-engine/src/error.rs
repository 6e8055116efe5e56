//! Error types for the schema engine

use taskfields_model::ordering::OrderingError;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors that can occur in schema registry operations
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An active column already carries this standard field (invariant C1)
    #[error("project {project} already has an active '{field}' column")]
    DuplicateStandardField { field: String, project: String },

    /// Protected columns cannot be soft-deleted, only hidden
    #[error("column '{id}' is protected and cannot be deleted - toggle its visibility instead")]
    ProtectedColumn { id: String },

    /// Visibility toggles only apply to protected columns
    #[error("column '{id}' has no standard field - visibility toggles apply to protected columns only")]
    NotProtected { id: String },

    /// Column types are immutable once persisted; only drafts may retype
    #[error("column '{id}' has been persisted - its type is locked")]
    TypeLocked { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Persistence failure, propagated unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SchemaError {
    /// Create a duplicate standard field error
    pub fn duplicate_standard_field(field: impl Into<String>, project: impl Into<String>) -> Self {
        Self::DuplicateStandardField {
            field: field.into(),
            project: project.into(),
        }
    }

    /// Create a column not found error
    pub fn column_not_found(id: impl Into<String>) -> Self {
        Self::ColumnNotFound { id: id.into() }
    }
}

impl From<OrderingError> for SchemaError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::ItemNotFound { id } => Self::ColumnNotFound { id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::ColumnNotFound { id: "abc123".into() };
        assert_eq!(err.to_string(), "column not found: abc123");
    }

    #[test]
    fn test_duplicate_standard_field() {
        let err = SchemaError::duplicate_standard_field("status", "p1");
        assert!(err.to_string().contains("status"));
        assert!(err.to_string().contains("p1"));
    }

    #[test]
    fn test_ordering_error_maps_to_not_found() {
        let err: SchemaError = OrderingError::ItemNotFound { id: "c1".into() }.into();
        assert!(matches!(err, SchemaError::ColumnNotFound { .. }));
    }
}
