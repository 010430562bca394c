//! Status reconciliation rules for paired tasks.
//!
//! The rules form one ordered chain; the first match decides the single hop
//! taken this pass.

use crate::task::{domain::TaskStatus, ports::VendorSide};

/// One status change applied to one side of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    /// Side whose task moves.
    pub side: VendorSide,
    /// Status it moves to.
    pub status: TaskStatus,
}

impl Hop {
    const fn employer(status: TaskStatus) -> Self {
        Self {
            side: VendorSide::Employer,
            status,
        }
    }

    const fn employee(status: TaskStatus) -> Self {
        Self {
            side: VendorSide::Employee,
            status,
        }
    }
}

/// Outcome of evaluating a status pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Both sides agree.
    InSync,
    /// Exactly one side must move.
    Advance(Hop),
    /// No rule covers the pair.
    Unexpected,
}

/// Picks the corrective action for an employer/employee status pair.
#[must_use]
pub fn next_hop(employer: TaskStatus, employee: TaskStatus) -> Decision {
    use TaskStatus::{Approved, Assigned, Canceled, Completed, Created, Expired, Posted};

    match (employer, employee) {
        _ if employer == employee => Decision::InSync,
        (Created, Posted) => Decision::Advance(Hop::employer(Posted)),
        (Posted, Assigned) => Decision::Advance(Hop::employer(Assigned)),
        (Posted | Assigned, Completed) => Decision::Advance(Hop::employer(Completed)),
        (Approved, Completed) => Decision::Advance(Hop::employee(Approved)),
        (_, Expired) => Decision::Advance(Hop::employer(Expired)),
        (Canceled, _) => Decision::Advance(Hop::employee(Canceled)),
        _ => Decision::Unexpected,
    }
}
