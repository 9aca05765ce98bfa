//! Counter configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::SectionIdError;
use crate::radix::{MAX_RADIX, validate_radix};

/// Settings fixed for the lifetime of a [`crate::SectionCounter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Prepended verbatim to every generated id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default = "default_radix")]
    pub radix: u32,
    /// Whether `exit_scope` consumes one id from the scope that becomes active.
    #[serde(default = "default_consume_on_exit")]
    pub consume_on_exit: bool,
}

fn default_radix() -> u32 {
    MAX_RADIX
}

fn default_consume_on_exit() -> bool {
    true
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            radix: default_radix(),
            consume_on_exit: default_consume_on_exit(),
        }
    }
}

impl CounterConfig {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::default()
        }
    }

    /// Strict check for callers that want to reject a radix the counter
    /// would otherwise silently replace with 10.
    pub fn validate(&self) -> Result<(), SectionIdError> {
        validate_radix(self.radix)?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SectionIdError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SectionIdError> {
        let json = fs::read_to_string(path)
            .map_err(|e| SectionIdError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SectionIdError> {
        Ok(serde_json::to_string(self)?)
    }
}
