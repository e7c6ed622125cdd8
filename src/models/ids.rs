//! Newtype wrappers for entity identifiers.
//!
//! These prevent accidentally mixing up IDs of different entity types
//! at compile time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a newtype ID wrapping a `String` inner type.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from the given string.
            #[inline]
            #[must_use]
            pub const fn new(value: String) -> Self {
                Self(value)
            }

            /// Generates a fresh random (UUID v4) identifier.
            #[inline]
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns a reference to the inner string.
            #[inline]
            #[must_use]
            pub fn as_inner(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner string.
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_string_id! {
    /// Unique identifier for an income/expense entry (UUID string).
    EntryId
}

define_string_id! {
    /// Unique identifier for a savings goal (UUID string).
    GoalId
}

define_string_id! {
    /// Unique identifier for a goal contribution (UUID string).
    ContributionId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_id_serde_is_transparent() {
        let id = GoalId::new("550e8400-e29b-41d4-a716-446655440000".to_owned());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""550e8400-e29b-41d4-a716-446655440000""#);
        let deserialized: GoalId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn generated_ids_are_unique_uuids() {
        let first = EntryId::generate();
        let second = EntryId::generate();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_inner()).is_ok());
    }

    #[test]
    fn string_id_display() {
        let id = ContributionId::new("c-123".to_owned());
        assert_eq!(id.to_string(), "c-123");
    }

    #[test]
    fn id_from_and_into_inner() {
        let id: GoalId = "g-1".to_owned().into();
        assert_eq!(id.as_inner(), "g-1");
        assert_eq!(id.into_inner(), "g-1");
    }
}
