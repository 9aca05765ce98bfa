//! Reading generated ids back.
//!
//! Format: `[prefix][<scope> "_"]<counter>` where `<scope>` is the composite
//! prefix of the scope the id was generated in.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SectionIdError;
use crate::radix::decode;

/// Parsed section id components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSectionId {
    pub raw: String,
    /// Composite prefix of the generating scope, `None` for root ids.
    pub scope: Option<String>,
    pub counter: i64,
}

impl ParsedSectionId {
    /// Scope segments, root first. Segments coming from a scope base are
    /// returned as-is.
    pub fn scope_segments(&self) -> Vec<&str> {
        match &self.scope {
            Some(scope) => scope.split('_').collect(),
            None => Vec::new(),
        }
    }

    /// Number of scope segments. A segment added as a scope base counts too,
    /// so this is only the nesting depth for scopes entered without a base.
    pub fn segment_count(&self) -> usize {
        self.scope_segments().len()
    }
}

static ID_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(.+)_)?(-?[0-9a-z]+)$").unwrap());

static ID_ALPHABET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9a-z]+(?:_-?[0-9a-z]+)*$").unwrap());

/// Parse a generated id. The global `prefix` must match verbatim.
pub fn parse_section_id(
    id: &str,
    prefix: Option<&str>,
    radix: u32,
) -> Result<ParsedSectionId, SectionIdError> {
    let body = match prefix {
        Some(p) => id
            .strip_prefix(p)
            .ok_or_else(|| SectionIdError::PrefixMismatch {
                expected: p.to_string(),
                id: id.to_string(),
            })?,
        None => id,
    };

    let caps = ID_SHAPE
        .captures(body)
        .ok_or_else(|| SectionIdError::InvalidFormat(id.to_string()))?;

    let scope = caps.get(1).map(|m| m.as_str().to_string());
    if scope
        .as_deref()
        .is_some_and(|s| s.split('_').any(str::is_empty))
    {
        return Err(SectionIdError::InvalidFormat(id.to_string()));
    }

    let counter = decode(&caps[2], radix)?;

    Ok(ParsedSectionId {
        raw: id.to_string(),
        scope,
        counter,
    })
}

/// Check that an id parses and stays within `[0-9a-z_-]` after the prefix.
pub fn validate_section_id(id: &str, prefix: Option<&str>, radix: u32) -> bool {
    let Ok(parsed) = parse_section_id(id, prefix, radix) else {
        return false;
    };
    let body = &parsed.raw[prefix.map_or(0, str::len)..];
    ID_ALPHABET.is_match(body)
}
