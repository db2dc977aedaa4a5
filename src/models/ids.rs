//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Whether a user-supplied reference points at this ID
            ///
            /// Accepts the short display form (`prefix` + first 8 hex chars),
            /// the full UUID, or any unambiguous UUID prefix.
            pub fn matches(&self, reference: &str) -> bool {
                let candidate = reference.strip_prefix($display_prefix).unwrap_or(reference);
                !candidate.is_empty() && self.0.to_string().starts_with(candidate)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Try to parse the full UUID
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                // Try stripping common prefixes
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(CategoryId, "cat-");
define_id!(ExpenseId, "exp-");
define_id!(FixedPaymentId, "fix-");
define_id!(LoanId, "loan-");
define_id!(IncomeId, "inc-");
define_id!(GoalId, "goal-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_id_creation() {
        let id = ExpenseId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_id_display() {
        let id = ExpenseId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12); // "exp-" + 8 chars
    }

    #[test]
    fn test_id_equality() {
        let id1 = CategoryId::new();
        let id2 = id1;
        assert_eq!(id1, id2);

        let id3 = CategoryId::new();
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_id_serialization() {
        let id = LoanId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: LoanId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = ExpenseId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_from_str_with_prefix() {
        let id = ExpenseId::new();
        let full = id.as_uuid().to_string();
        let parsed: ExpenseId = full.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_matches_short_and_full_forms() {
        let id = ExpenseId::new();

        assert!(id.matches(&id.to_string()));
        assert!(id.matches(&id.as_uuid().to_string()));
        assert!(id.matches(&id.as_uuid().to_string()[..8]));
        assert!(!id.matches("zzzzzzzz"));
        assert!(!id.matches(""));
    }
}
