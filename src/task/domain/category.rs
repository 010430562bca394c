//! Task categories and the fields each one requires.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields a vendor can be asked to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Vendor task identifier.
    Id,
    /// Short task title.
    Name,
    /// Longer free-text description.
    Description,
    /// Offered price, in whole currency units.
    Price,
    /// Contact email address.
    Email,
    /// Vendor location identifier.
    Location,
}

impl TaskField {
    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Email => "email",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task shape. Selects required fields and the reconciliation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Two-sided task with a price, mirrored onto the doer side.
    Priced,
    /// One-sided sign-up task completed in place.
    Registration,
}

impl TaskCategory {
    /// Returns the canonical category label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Priced => "priced",
            Self::Registration => "registration",
        }
    }

    /// Parses a vendor category label.
    ///
    /// Unrecognized labels fall back to [`TaskCategory::Priced`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "registration" => Self::Registration,
            "priced" => Self::Priced,
            other => {
                tracing::warn!(label = other, "unrecognized task category; treating as priced");
                Self::Priced
            }
        }
    }

    /// Fields that must be present before a task of this category is
    /// reconciled.
    #[must_use]
    pub const fn required_fields(self) -> &'static [TaskField] {
        match self {
            Self::Priced => &[TaskField::Id, TaskField::Name, TaskField::Price],
            Self::Registration => &[TaskField::Id, TaskField::Name, TaskField::Email],
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
