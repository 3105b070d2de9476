//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `EmployeeId` where a
//! `DepartmentId` is expected when building the per-request lookup maps.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers around a natural key.
macro_rules! typed_id {
    ($name:ident, $inner:ty, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Wraps an existing key.
            #[must_use]
            pub fn new(value: impl Into<$inner>) -> Self {
                Self(value.into())
            }

            /// Returns the inner key.
            #[must_use]
            pub fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = <$inner as std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(EmployeeId, i64, "Employee number.");
typed_id!(DepartmentId, String, "Department code (e.g. `d001`).");

impl Copy for EmployeeId {}

impl EmployeeId {
    /// Returns the employee number.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl DepartmentId {
    /// Returns the department code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
