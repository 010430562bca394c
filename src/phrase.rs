//! Canned messages posted on vendor tasks.
//!
//! Templates are rendered with `minijinja`; a broken template is logged and
//! replaced with a plain rendering rather than failing the pass.

use crate::task::domain::TaskField;
use minijinja::{Environment, context};
use serde::Deserialize;

const DEFAULT_REGISTRATION_CONFIRMATION: &str = "You're registered!";
const DEFAULT_MISSING_FIELDS: &str =
    "Please include the following fields: {{ fields | join(\"; \") }}";

/// Messages the engine and adapters post on vendor tasks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Phrasebook {
    registration_confirmation: String,
    missing_fields: String,
}

impl Phrasebook {
    /// Creates a phrasebook from explicit messages.
    ///
    /// `missing_fields` is a template receiving a `fields` list.
    #[must_use]
    pub fn new(
        registration_confirmation: impl Into<String>,
        missing_fields: impl Into<String>,
    ) -> Self {
        Self {
            registration_confirmation: registration_confirmation.into(),
            missing_fields: missing_fields.into(),
        }
    }

    /// Comment posted when a registration task is completed.
    #[must_use]
    pub fn registration_confirmation(&self) -> &str {
        &self.registration_confirmation
    }

    /// Renders the request for missing required fields.
    #[must_use]
    pub fn missing_fields(&self, fields: &[TaskField]) -> String {
        let names: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
        let env = Environment::new();
        env.render_str(&self.missing_fields, context! { fields => names })
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "missing-fields template failed to render");
                format!("Please include the following fields: {}", names.join("; "))
            })
    }
}

impl Default for Phrasebook {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRATION_CONFIRMATION, DEFAULT_MISSING_FIELDS)
    }
}
