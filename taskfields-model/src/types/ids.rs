//! Identifier newtypes.
//!
//! All ids are strings on the wire. Freshly minted ids are ULIDs; ids loaded
//! from storage keep whatever string the store assigned.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh ULID-backed id.
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an existing id string.
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// The id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_string(s)
            }
        }
    };
}

string_id!(
    /// Identifies a column definition.
    ColumnId
);
string_id!(
    /// Identifies the project that owns a set of columns.
    ProjectId
);
string_id!(
    /// Identifies a task holding sparse column values.
    TaskId
);
string_id!(
    /// Identifies a person referenced by `UserRef` columns.
    PersonId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_ulids() {
        let id = ColumnId::new();
        // ULIDs are 26 Crockford Base32 characters
        assert_eq!(id.as_str().len(), 26);
    }

    #[test]
    fn from_string_round_trips() {
        let id = ProjectId::from_string("proj-1");
        assert_eq!(id.as_str(), "proj-1");
        assert_eq!(id.to_string(), "proj-1");
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = TaskId::from_string("t1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"t1\"");
    }
}
