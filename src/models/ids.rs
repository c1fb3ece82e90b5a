//! Strongly-typed ID wrappers for entity types
//!
//! The income/expense service keys its records by integer primary keys, so the
//! wrappers hold a `u64`. Newtypes keep an income ID from being passed where an
//! expense ID is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an ID from a raw key
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the underlying key
            pub const fn get(&self) -> u64 {
                self.0
            }

            /// The ID following this one (used when allocating keys locally)
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(IncomeId, "inc-");
define_id!(ExpenseId, "exp-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_key() {
        assert_eq!(IncomeId::new(42).to_string(), "42");
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        assert_eq!("7".parse::<ExpenseId>().unwrap(), ExpenseId::new(7));
        assert_eq!("exp-7".parse::<ExpenseId>().unwrap(), ExpenseId::new(7));
        assert!("seven".parse::<ExpenseId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = IncomeId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
        let deserialized: IncomeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_next() {
        assert_eq!(ExpenseId::new(9).next(), ExpenseId::new(10));
    }
}
