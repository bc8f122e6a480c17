//! Pre-release identifiers for semantic versioning
//!
//! A pre-release part is a dot-separated list of identifiers, each numeric or
//! alphanumeric, ordered as described at https://semver.org/#spec-item-11.

use crate::error::{Result, SemtagError};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// One dot-separated part of a pre-release string
#[derive(Debug, Clone)]
pub enum Identifier {
    /// Digits only
    Numeric(String),
    /// Anything else (ASCII letters, digits, hyphen in valid input)
    Alphanumeric(String),
}

impl Identifier {
    pub fn parse(part: &str) -> Self {
        if is_numeric(part) {
            Identifier::Numeric(part.to_string())
        } else {
            Identifier::Alphanumeric(part.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Numeric(s) | Identifier::Alphanumeric(s) => s,
        }
    }
}

fn is_numeric(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two digit strings as integers of any size
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => compare_numeric(a, b),
            (Identifier::Alphanumeric(a), Identifier::Alphanumeric(b)) => a.cmp(b),
            // alphanumeric identifiers always outrank numeric ones
            (Identifier::Numeric(_), Identifier::Alphanumeric(_)) => Ordering::Less,
            (Identifier::Alphanumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Identifier {}

/// Parsed pre-release part, e.g. `beta.3`
///
/// Keeps the original text so a bump strategy sees exactly what the tag held.
#[derive(Debug, Clone)]
pub struct PreRelease {
    raw: String,
    identifiers: Vec<Identifier>,
}

impl PreRelease {
    pub fn parse(s: &str) -> Self {
        PreRelease {
            raw: s.to_string(),
            identifiers: s.split('.').map(Identifier::parse).collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

// Slice ordering is lexicographic and ranks a strict prefix below the longer
// list, which is exactly the SemVer rule for differing lengths.
impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifiers.cmp(&other.identifiers)
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PreRelease {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PreRelease {}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Check a pre-release string against the SemVer identifier grammar
///
/// Every part must be non-empty ASCII alphanumerics or hyphen, and numeric
/// parts must not have a leading zero unless they are exactly `0`.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    let invalid = identifier.split('.').any(|part| {
        part.is_empty()
            || !part.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
            || (is_numeric(part) && part.len() > 1 && part.starts_with('0'))
    });

    if invalid {
        Err(SemtagError::InvalidBumpResult {
            identifier: identifier.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Maps a current pre-release identifier to its successor
///
/// Implementations are pure; the engine validates whatever they return.
/// Plain closures `Fn(&str) -> String` are strategies too.
pub trait PreReleaseBumpStrategy: Send + Sync {
    fn bump(&self, current: &str) -> String;
}

impl<F> PreReleaseBumpStrategy for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn bump(&self, current: &str) -> String {
        self(current)
    }
}

/// Increment the trailing numeric identifier, or append `.1` when there is none
///
/// `beta.3` -> `beta.4`, `alpha` -> `alpha.1`, `rc.9` -> `rc.10`
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementTrailingNumeric;

impl PreReleaseBumpStrategy for IncrementTrailingNumeric {
    fn bump(&self, current: &str) -> String {
        let (head, last) = match current.rsplit_once('.') {
            Some((head, last)) => (Some(head), last),
            None => (None, current),
        };

        if !is_numeric(last) {
            return format!("{}.1", current);
        }

        let next = increment_decimal(last);
        match head {
            Some(head) => format!("{}.{}", head, next),
            None => next,
        }
    }
}

fn increment_decimal(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let mut bytes: Vec<u8> = if trimmed.is_empty() {
        vec![b'0']
    } else {
        trimmed.bytes().collect()
    };

    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            carry = false;
            break;
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }

    bytes.into_iter().map(char::from).collect()
}

/// Explicit identifier -> identifier table
///
/// Identifiers missing from the table fall back to [`IncrementTrailingNumeric`].
#[derive(Debug, Clone, Default)]
pub struct MappingStrategy {
    mapping: BTreeMap<String, String>,
}

impl MappingStrategy {
    pub fn new(mapping: BTreeMap<String, String>) -> Self {
        MappingStrategy { mapping }
    }
}

impl PreReleaseBumpStrategy for MappingStrategy {
    fn bump(&self, current: &str) -> String {
        match self.mapping.get(current) {
            Some(next) => next.clone(),
            None => IncrementTrailingNumeric.bump(current),
        }
    }
}

/// Run a strategy and validate its result
pub fn bump_pre_release(strategy: &dyn PreReleaseBumpStrategy, current: &str) -> Result<String> {
    let next = strategy.bump(current);
    validate_identifier(&next)?;
    Ok(next)
}
