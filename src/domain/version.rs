use crate::error::{Result, SemtagError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric `major.minor.patch` triple
///
/// Immutable; bumping yields a new value. The canonical string form never has
/// leading zeroes because the components are stored as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict `X.Y.Z` string (no prefix, no pre-release, no leading zeroes)
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Bump version according to the component
    ///
    /// `None` and `PreRelease` leave the numeric triple untouched. Fails when
    /// the bumped component would not fit in a `u64`.
    pub fn bump(&self, component: VersionComponent) -> Result<Self> {
        let next = |value: u64, name: &str| {
            value.checked_add(1).ok_or_else(|| {
                SemtagError::version(format!(
                    "Cannot bump the {} version of {}: component out of range",
                    name, self
                ))
            })
        };

        Ok(match component {
            VersionComponent::Major => SemanticVersion {
                major: next(self.major, "major")?,
                minor: 0,
                patch: 0,
            },
            VersionComponent::Minor => SemanticVersion {
                major: self.major,
                minor: next(self.minor, "minor")?,
                patch: 0,
            },
            VersionComponent::Patch => SemanticVersion {
                major: self.major,
                minor: self.minor,
                patch: next(self.patch, "patch")?,
            },
            VersionComponent::None | VersionComponent::PreRelease => *self,
        })
    }
}

impl FromStr for SemanticVersion {
    type Err = SemtagError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(SemtagError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                s
            )));
        }

        let parse_part = |name: &str, part: &str| -> Result<u64> {
            let numeric = !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
            if !numeric || (part.len() > 1 && part.starts_with('0')) {
                return Err(SemtagError::version(format!(
                    "Invalid {} version: '{}'",
                    name, part
                )));
            }
            part.parse::<u64>().map_err(|_| {
                SemtagError::version(format!("{} version out of range: '{}'", name, part))
            })
        };

        Ok(SemanticVersion {
            major: parse_part("major", parts[0])?,
            minor: parse_part("minor", parts[1])?,
            patch: parse_part("patch", parts[2])?,
        })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Component of a version to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionComponent {
    /// Keep the numeric triple and drop any pre-release part (promotion)
    None,
    Major,
    Minor,
    Patch,
    PreRelease,
}

impl FromStr for VersionComponent {
    type Err = SemtagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(VersionComponent::None),
            "major" => Ok(VersionComponent::Major),
            "minor" => Ok(VersionComponent::Minor),
            "patch" => Ok(VersionComponent::Patch),
            "pre-release" | "prerelease" | "pre" => Ok(VersionComponent::PreRelease),
            other => Err(SemtagError::configuration(format!(
                "Unknown version component '{}' (expected major, minor, patch, pre-release or none)",
                other
            ))),
        }
    }
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionComponent::None => "none",
            VersionComponent::Major => "major",
            VersionComponent::Minor => "minor",
            VersionComponent::Patch => "patch",
            VersionComponent::PreRelease => "pre-release",
        };
        f.write_str(name)
    }
}
