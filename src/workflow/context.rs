//! Shared dependencies handed to every workflow.

use crate::phrase::Phrasebook;
use crate::task::{
    domain::VendorName,
    ports::{RecordStore, VendorAdapter, VendorSide},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while wiring the adapter registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// An adapter was registered on the wrong side.
    #[error("vendor {vendor} serves the {actual} side but was registered as {expected}")]
    WrongSide {
        /// Offending vendor.
        vendor: VendorName,
        /// Side it was registered for.
        expected: VendorSide,
        /// Side it reports.
        actual: VendorSide,
    },

    /// Both sides are served by the same vendor name.
    #[error("vendor {0} cannot serve both sides")]
    SameVendor(VendorName),

    /// A configured vendor name does not match the registered adapter.
    #[error("{side} adapter is {actual} but {expected} was configured")]
    UnexpectedVendor {
        /// Side being checked.
        side: VendorSide,
        /// Configured vendor name.
        expected: VendorName,
        /// Registered adapter's name.
        actual: VendorName,
    },
}

/// The two vendor adapters of a pairing, addressable by side or name.
#[derive(Clone)]
pub struct AdapterRegistry {
    employer: Arc<dyn VendorAdapter>,
    employee: Arc<dyn VendorAdapter>,
}

impl AdapterRegistry {
    /// Registers one adapter per side.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when an adapter reports the wrong side or
    /// both adapters share a name.
    pub fn new(
        employer: Arc<dyn VendorAdapter>,
        employee: Arc<dyn VendorAdapter>,
    ) -> Result<Self, RegistryError> {
        for (adapter, expected) in [
            (&employer, VendorSide::Employer),
            (&employee, VendorSide::Employee),
        ] {
            if adapter.side() != expected {
                return Err(RegistryError::WrongSide {
                    vendor: adapter.name().clone(),
                    expected,
                    actual: adapter.side(),
                });
            }
        }
        if employer.name() == employee.name() {
            return Err(RegistryError::SameVendor(employer.name().clone()));
        }
        Ok(Self { employer, employee })
    }

    /// Checks the registered adapters against configured vendor names.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnexpectedVendor`] on the first mismatch.
    pub fn expect_names(
        &self,
        employer: &VendorName,
        employee: &VendorName,
    ) -> Result<(), RegistryError> {
        for (side, expected) in [
            (VendorSide::Employer, employer),
            (VendorSide::Employee, employee),
        ] {
            let actual = self.for_side(side).name();
            if actual != expected {
                return Err(RegistryError::UnexpectedVendor {
                    side,
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
        }
        Ok(())
    }

    /// Returns the adapter serving `side`.
    #[must_use]
    pub fn for_side(&self, side: VendorSide) -> &Arc<dyn VendorAdapter> {
        match side {
            VendorSide::Employer => &self.employer,
            VendorSide::Employee => &self.employee,
        }
    }

    /// Returns the requester-side adapter.
    #[must_use]
    pub fn employer(&self) -> &Arc<dyn VendorAdapter> {
        &self.employer
    }

    /// Looks an adapter up by vendor name.
    #[must_use]
    pub fn get(&self, name: &VendorName) -> Option<&Arc<dyn VendorAdapter>> {
        [&self.employer, &self.employee]
            .into_iter()
            .find(|adapter| adapter.name() == name)
    }
}

/// Everything a workflow needs besides its primary task.
pub struct SyncContext<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    registry: AdapterRegistry,
    store: Arc<S>,
    clock: Arc<C>,
    phrases: Phrasebook,
}

impl<S, C> SyncContext<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Creates a context with the default phrasebook.
    #[must_use]
    pub fn new(registry: AdapterRegistry, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            registry,
            store,
            clock,
            phrases: Phrasebook::default(),
        }
    }

    /// Replaces the phrasebook.
    #[must_use]
    pub fn with_phrasebook(mut self, phrases: Phrasebook) -> Self {
        self.phrases = phrases;
        self
    }

    /// Returns the adapter registry.
    #[must_use]
    pub const fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Returns the record store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the phrasebook.
    #[must_use]
    pub const fn phrases(&self) -> &Phrasebook {
        &self.phrases
    }
}
