//! Error type for parsing, decoding and configuration.

use thiserror::Error;

/// Errors raised by the fallible surfaces (parsing, decoding, config).
///
/// Generating ids never fails; these only show up when reading ids or
/// configuration back in.
#[derive(Error, Debug)]
pub enum SectionIdError {
    #[error("Invalid radix {0}: must be within 2..=36")]
    InvalidRadix(u32),
    #[error("Invalid section id format: {0}")]
    InvalidFormat(String),
    #[error("Section id {id:?} does not start with prefix {expected:?}")]
    PrefixMismatch { expected: String, id: String },
    #[error("Invalid digit in segment {segment:?} for radix {radix}")]
    InvalidDigit { segment: String, radix: u32 },
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for SectionIdError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
