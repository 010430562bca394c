//! Canonical task status state machine.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical task lifecycle status shared by every vendor.
///
/// The forward line is `Created → Posted → Assigned → Completed → Approved`.
/// `Expired` and `Canceled` are terminal exits reachable from any
/// non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task exists on the vendor but has not been handed off yet.
    Created,
    /// Task has been posted to (or picked up from) the other side.
    Posted,
    /// Somebody has been assigned to do the work.
    Assigned,
    /// The work is done and awaiting review.
    Completed,
    /// The requester approved the work; the task is closed out.
    Approved,
    /// The doer side let the task lapse.
    Expired,
    /// The requester withdrew the task.
    Canceled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Posted => "posted",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
            Self::Approved => "approved",
            Self::Expired => "expired",
            Self::Canceled => "canceled",
        }
    }

    /// Position of the status in the lifecycle. Exits rank after every
    /// forward status, so a legal change never lowers the rank.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Created => 0,
            Self::Posted => 1,
            Self::Assigned => 2,
            Self::Completed => 3,
            Self::Approved => 4,
            Self::Expired | Self::Canceled => 5,
        }
    }

    /// Returns whether the status is one of the terminal exits.
    #[must_use]
    pub const fn is_exit(self) -> bool {
        matches!(self, Self::Expired | Self::Canceled)
    }

    /// Returns whether no further change is allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Expired | Self::Canceled)
    }

    /// Returns whether a task may move from `self` to `next`.
    ///
    /// Forward moves may skip statuses; vendors sometimes report several hops
    /// at once.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next.is_exit() {
            return true;
        }
        next.rank() > self.rank()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "posted" => Ok(Self::Posted),
            "assigned" => Ok(Self::Assigned),
            "completed" => Ok(Self::Completed),
            "approved" => Ok(Self::Approved),
            "expired" => Ok(Self::Expired),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
