//! Per-vendor status words mapped onto canonical statuses.

use super::{ParseTaskStatusError, TaskStatus};
use serde::{Deserialize, Serialize};

/// One vendor status word and the canonical status it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusWord {
    /// Word as the vendor spells it.
    pub word: String,
    /// Canonical status the word maps to.
    pub status: TaskStatus,
}

/// Ordered mapping between a vendor's status vocabulary and
/// [`TaskStatus`].
///
/// Several words may map to one status; the first listed word is used when
/// writing back to the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusVocabulary {
    entries: Vec<StatusWord>,
}

impl StatusVocabulary {
    /// Creates a vocabulary from `(word, status)` pairs.
    #[must_use]
    pub fn new<W: Into<String>>(entries: impl IntoIterator<Item = (W, TaskStatus)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(word, status)| StatusWord {
                    word: word.into(),
                    status,
                })
                .collect(),
        }
    }

    /// Vocabulary that uses the canonical status names verbatim.
    #[must_use]
    pub fn canonical() -> Self {
        Self::new(
            [
                TaskStatus::Created,
                TaskStatus::Posted,
                TaskStatus::Assigned,
                TaskStatus::Completed,
                TaskStatus::Approved,
                TaskStatus::Expired,
                TaskStatus::Canceled,
            ]
            .map(|status| (status.as_str(), status)),
        )
    }

    /// Returns the configured entries.
    #[must_use]
    pub fn entries(&self) -> &[StatusWord] {
        &self.entries
    }

    /// Looks up a vendor word, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskStatusError`] when the word is not in the
    /// vocabulary.
    pub fn lookup(&self, word: &str) -> Result<TaskStatus, ParseTaskStatusError> {
        let needle = word.trim();
        self.entries
            .iter()
            .find(|entry| entry.word.eq_ignore_ascii_case(needle))
            .map(|entry| entry.status)
            .ok_or_else(|| ParseTaskStatusError(word.to_owned()))
    }

    /// Maps a vendor word onto a canonical status.
    ///
    /// Unknown words are a data-quality problem on the vendor side: they are
    /// logged and read as [`TaskStatus::Created`], the lowest plausible
    /// status.
    #[must_use]
    pub fn to_canonical(&self, word: &str) -> TaskStatus {
        self.lookup(word).unwrap_or_else(|error| {
            tracing::error!(%error, "unmapped vendor status; falling back to created");
            TaskStatus::Created
        })
    }

    /// Returns the vendor word for a canonical status, if the vendor has one.
    #[must_use]
    pub fn to_vendor(&self, status: TaskStatus) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.word.as_str())
    }
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self::canonical()
    }
}
