//! Source allowlist enforcement
//!
//! An empty allowlist is an open policy: every source is readable. A
//! non-empty allowlist admits only exact (case-sensitive) matches.

use serde::{Deserialize, Serialize};

use crate::types::PolicyError;

/// Outcome of an allowlist check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied,
}

/// Ordered list of sources permitted for upstream reads
///
/// Insertion order and duplicates are preserved exactly as configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allowlist {
    sources: Vec<String>,
}

impl Allowlist {
    pub fn new(sources: Vec<String>) -> Self {
        Self { sources }
    }

    /// Parse a comma-separated list, trimming entries and dropping empty ones
    pub fn parse_csv(value: &str) -> Self {
        let sources = value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        Self { sources }
    }

    /// True when no sources are configured and every source is permitted
    pub fn is_open(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Decide whether `source` may be read
    pub fn authorize(&self, source: &str) -> Authorization {
        if self.is_open() || self.sources.iter().any(|allowed| allowed == source) {
            Authorization::Allowed
        } else {
            Authorization::Denied
        }
    }

    /// Like [`Allowlist::authorize`], as a `Result` for `?` chains
    pub fn check(&self, source: &str) -> Result<(), PolicyError> {
        match self.authorize(source) {
            Authorization::Allowed => Ok(()),
            Authorization::Denied => Err(PolicyError::NotAllowlisted),
        }
    }
}
