use crate::boundary::BoundaryWarning;
use crate::domain::prerelease::PreRelease;
use crate::domain::version::SemanticVersion;
use crate::error::{Result, SemtagError};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn version_regex() -> &'static Regex {
    static VERSION: OnceLock<Regex> = OnceLock::new();
    VERSION.get_or_init(|| {
        Regex::new(r"(\d+)\.(\d+)\.(\d+)(?:-([A-Za-z0-9.-]+))?").expect("version regex is valid")
    })
}

/// Find the first `major.minor.patch[-prerelease]` substring in a tag name
///
/// `release-v1.2.3-rc.1` -> `1.2.3-rc.1`
pub fn extract_version(tag: &str) -> Option<&str> {
    version_regex().find(tag).map(|m| m.as_str())
}

/// A version extracted from a tag, parsed once into its structured form
///
/// Ordering is SemVer 2.0 precedence; the extracted text is kept verbatim.
#[derive(Debug, Clone)]
pub struct ExtractedVersion {
    raw: String,
    version: SemanticVersion,
    pre_release: Option<PreRelease>,
}

impl ExtractedVersion {
    /// Extract and parse the first version found anywhere in `text`
    pub fn extract(text: &str) -> Result<Self> {
        let captures = version_regex().captures(text).ok_or_else(|| {
            SemtagError::version(format!("No major.minor.patch version found in '{}'", text))
        })?;

        let component = |i: usize| -> Result<u64> {
            let digits = &captures[i];
            digits.parse::<u64>().map_err(|_| {
                SemtagError::version(format!("Version component out of range: '{}'", digits))
            })
        };

        Ok(ExtractedVersion {
            raw: captures[0].to_string(),
            version: SemanticVersion::new(component(1)?, component(2)?, component(3)?),
            pre_release: captures.get(4).map(|m| PreRelease::parse(m.as_str())),
        })
    }

    pub fn version(&self) -> SemanticVersion {
        self.version
    }

    pub fn pre_release(&self) -> Option<&PreRelease> {
        self.pre_release.as_ref()
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for ExtractedVersion {
    type Err = SemtagError;

    /// Parse a string that must be exactly one version
    fn from_str(s: &str) -> Result<Self> {
        let extracted = ExtractedVersion::extract(s)?;
        if extracted.raw != s {
            return Err(SemtagError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z[-pre.release]",
                s
            )));
        }
        Ok(extracted)
    }
}

impl Ord for ExtractedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                // a release outranks any of its pre-releases
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for ExtractedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ExtractedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ExtractedVersion {}

impl fmt::Display for ExtractedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Compare two version strings by SemVer precedence
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering> {
    let a: ExtractedVersion = a.parse()?;
    let b: ExtractedVersion = b.parse()?;
    Ok(a.cmp(&b))
}

/// A tag that yielded a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCandidate {
    pub tag_name: String,
    pub version: ExtractedVersion,
}

impl VersionCandidate {
    pub fn from_tag(tag_name: impl Into<String>) -> Result<Self> {
        let tag_name = tag_name.into();
        let version = ExtractedVersion::extract(&tag_name)?;
        Ok(VersionCandidate { tag_name, version })
    }
}

/// Restricts candidates to fixed numeric components; `None` is a wildcard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsMatching {
    #[serde(default)]
    pub major: Option<u64>,
    #[serde(default)]
    pub minor: Option<u64>,
    #[serde(default)]
    pub patch: Option<u64>,
}

impl VersionsMatching {
    pub fn matches(&self, version: &SemanticVersion) -> bool {
        self.major.map_or(true, |m| m == version.major)
            && self.minor.map_or(true, |m| m == version.minor)
            && self.patch.map_or(true, |p| p == version.patch)
    }

    /// Render one filter component for diagnostics
    pub fn describe(component: Option<u64>) -> String {
        component.map_or_else(|| "<any>".to_string(), |c| c.to_string())
    }
}

/// How candidates carrying a pre-release part are treated
#[derive(Debug, Clone, Copy)]
pub enum PreReleaseInclusion<'a> {
    /// No pre-release configuration: every pre-release is dropped
    Exclude,
    /// Keep all pre-releases
    IncludeAll,
    /// Keep pre-releases whose pre-release part matches the pattern
    IncludeMatching(&'a Regex),
}

/// Result of filtering raw tag names
#[derive(Debug, Clone, Default)]
pub struct FilteredTags {
    pub candidates: Vec<VersionCandidate>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Selects version candidates out of raw tag names
#[derive(Debug, Clone)]
pub struct TagFilter<'a> {
    tag_pattern: &'a Regex,
    versions_matching: VersionsMatching,
    pre_release: PreReleaseInclusion<'a>,
}

impl<'a> TagFilter<'a> {
    pub fn new(
        tag_pattern: &'a Regex,
        versions_matching: VersionsMatching,
        pre_release: PreReleaseInclusion<'a>,
    ) -> Self {
        TagFilter {
            tag_pattern,
            versions_matching,
            pre_release,
        }
    }

    /// Keep tags that contain a pattern match, yield a version, pass the
    /// component filter and the pre-release rule
    pub fn apply<I, S>(&self, tags: I) -> FilteredTags
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filtered = FilteredTags::default();

        for tag in tags {
            let tag = tag.as_ref();
            if !self.tag_pattern.is_match(tag) {
                continue;
            }

            let candidate = match VersionCandidate::from_tag(tag) {
                Ok(candidate) => candidate,
                Err(e) => {
                    debug!("dropping tag '{}': {}", tag, e);
                    filtered.warnings.push(BoundaryWarning::UnparsableTag {
                        tag: tag.to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !self.versions_matching.matches(&candidate.version.version()) {
                debug!("dropping tag '{}': outside the versions-matching filter", tag);
                continue;
            }

            if let Some(pre_release) = candidate.version.pre_release() {
                let keep = match self.pre_release {
                    PreReleaseInclusion::Exclude => false,
                    PreReleaseInclusion::IncludeAll => true,
                    PreReleaseInclusion::IncludeMatching(pattern) => {
                        pattern.is_match(pre_release.as_str())
                    }
                };
                if !keep {
                    debug!("dropping tag '{}': pre-release part not accepted", tag);
                    continue;
                }
            }

            filtered.candidates.push(candidate);
        }

        filtered
    }
}

/// Tag naming format (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone)]
pub struct TagFormat {
    pub format: String,
}

impl TagFormat {
    /// Create a tag format; it must contain the `{version}` placeholder
    pub fn new(format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        if !format.contains("{version}") {
            return Err(SemtagError::configuration(format!(
                "Tag format '{}' must contain {{version}} placeholder",
                format
            )));
        }
        Ok(TagFormat { format })
    }

    /// Example: format="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &str) -> String {
        self.format.replace("{version}", version)
    }
}
