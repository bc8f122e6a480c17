//! The caller-supplied rules for one version determination

use crate::domain::prerelease::{
    bump_pre_release, validate_identifier, IncrementTrailingNumeric, PreReleaseBumpStrategy,
};
use crate::domain::tag::{PreReleaseInclusion, TagFilter, VersionsMatching};
use crate::domain::version::{SemanticVersion, VersionComponent};
use crate::error::{Result, SemtagError};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Default tag pattern: anything containing `X.Y.Z`
pub const DEFAULT_TAG_PATTERN: &str = r"\d+\.\d+\.\d+";

pub const DEFAULT_SNAPSHOT_SUFFIX: &str = "SNAPSHOT";

/// Pre-release settings; their presence enables pre-release handling
#[derive(Clone)]
pub struct PreReleaseConfig {
    pub starting_identifier: String,
    /// Pre-release parts a PRERELEASE bump may start from
    pub pattern: Regex,
    pub strategy: Arc<dyn PreReleaseBumpStrategy>,
}

impl PreReleaseConfig {
    /// Uses [`IncrementTrailingNumeric`] and a match-everything pattern
    pub fn new(starting_identifier: impl Into<String>) -> Result<Self> {
        let starting_identifier = starting_identifier.into();
        validate_identifier(&starting_identifier).map_err(|_| {
            SemtagError::configuration(format!(
                "Invalid pre-release starting identifier '{}'",
                starting_identifier
            ))
        })?;

        Ok(PreReleaseConfig {
            starting_identifier,
            pattern: Regex::new(".*")?,
            strategy: Arc::new(IncrementTrailingNumeric),
        })
    }

    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_strategy(mut self, strategy: impl PreReleaseBumpStrategy + 'static) -> Self {
        self.strategy = Arc::new(strategy);
        self
    }

    /// Apply the strategy and validate what it produced
    pub fn bump(&self, current: &str) -> Result<String> {
        bump_pre_release(self.strategy.as_ref(), current)
    }
}

impl fmt::Debug for PreReleaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreReleaseConfig")
            .field("starting_identifier", &self.starting_identifier)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Fully resolved, immutable input to the bump engine
///
/// `bump` left as `None` is inferred by the engine and reported back in the
/// determination; the policy itself is never modified.
#[derive(Debug, Clone)]
pub struct BumpPolicy {
    pub bump: Option<VersionComponent>,
    pub new_pre_release: bool,
    pub promote_to_release: bool,
    pub snapshot: bool,
    pub snapshot_suffix: String,
    pub starting_version: SemanticVersion,
    pub pre_release: Option<PreReleaseConfig>,
    pub tag_pattern: Regex,
    pub versions_matching: VersionsMatching,
}

impl BumpPolicy {
    /// Policy with the default tag pattern and no pre-release configuration
    pub fn new(starting_version: SemanticVersion) -> Self {
        BumpPolicy {
            bump: None,
            new_pre_release: false,
            promote_to_release: false,
            snapshot: false,
            snapshot_suffix: DEFAULT_SNAPSHOT_SUFFIX.to_string(),
            starting_version,
            pre_release: None,
            tag_pattern: Regex::new(DEFAULT_TAG_PATTERN).expect("default tag pattern is valid"),
            versions_matching: VersionsMatching::default(),
        }
    }

    pub fn with_bump(mut self, bump: VersionComponent) -> Self {
        self.bump = Some(bump);
        self
    }

    pub fn with_new_pre_release(mut self, new_pre_release: bool) -> Self {
        self.new_pre_release = new_pre_release;
        self
    }

    pub fn with_promote_to_release(mut self, promote: bool) -> Self {
        self.promote_to_release = promote;
        self
    }

    pub fn with_snapshot(mut self, suffix: impl Into<String>) -> Self {
        self.snapshot = true;
        self.snapshot_suffix = suffix.into();
        self
    }

    pub fn with_pre_release(mut self, config: PreReleaseConfig) -> Self {
        self.pre_release = Some(config);
        self
    }

    pub fn with_tag_pattern(mut self, pattern: Regex) -> Self {
        self.tag_pattern = pattern;
        self
    }

    pub fn with_versions_matching(mut self, matching: VersionsMatching) -> Self {
        self.versions_matching = matching;
        self
    }

    /// Reject configurations that cannot produce a version
    pub fn validate(&self) -> Result<()> {
        if self.pre_release.is_none() {
            if self.new_pre_release {
                return Err(SemtagError::configuration(
                    "Cannot create a new pre-release version if a pre-release configuration is not specified",
                ));
            }
            if self.bump == Some(VersionComponent::PreRelease) {
                return Err(SemtagError::configuration(
                    "Cannot bump pre-release identifier if a pre-release configuration is not specified",
                ));
            }
        }

        if self.promote_to_release {
            if let Some(bump) = self.bump.filter(|b| *b != VersionComponent::None) {
                return Err(SemtagError::configuration(format!(
                    "Cannot promote to a release while also bumping the {} version",
                    bump
                )));
            }
            if self.new_pre_release {
                return Err(SemtagError::configuration(
                    "Cannot promote to a release and start a new pre-release at the same time",
                ));
            }
        }

        if self.new_pre_release && self.bump == Some(VersionComponent::PreRelease) {
            return Err(SemtagError::configuration(
                "Cannot start a new pre-release while also bumping the pre-release identifier",
            ));
        }

        if self.snapshot && self.snapshot_suffix.is_empty() {
            return Err(SemtagError::configuration("Snapshot suffix must not be empty"));
        }

        Ok(())
    }

    /// The tag filter this policy implies
    pub fn tag_filter(&self) -> TagFilter<'_> {
        let inclusion = match &self.pre_release {
            None => PreReleaseInclusion::Exclude,
            Some(config) if self.bump == Some(VersionComponent::PreRelease) => {
                PreReleaseInclusion::IncludeMatching(&config.pattern)
            }
            Some(_) => PreReleaseInclusion::IncludeAll,
        };
        TagFilter::new(&self.tag_pattern, self.versions_matching, inclusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> BumpPolicy {
        BumpPolicy::new(SemanticVersion::new(0, 1, 0))
    }

    fn pre_release() -> PreReleaseConfig {
        PreReleaseConfig::new("alpha.0").unwrap()
    }

    #[test]
    fn test_default_policy_is_valid() {
        assert!(policy().validate().is_ok());
        assert_eq!(policy().snapshot_suffix, "SNAPSHOT");
        assert!(policy().bump.is_none());
    }

    #[test]
    fn test_pre_release_bump_requires_configuration() {
        let err = policy()
            .with_bump(VersionComponent::PreRelease)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SemtagError::Configuration(_)));
        assert!(policy()
            .with_bump(VersionComponent::PreRelease)
            .with_pre_release(pre_release())
            .validate()
            .is_ok());
    }

    #[test]
    fn test_new_pre_release_requires_configuration() {
        let err = policy().with_new_pre_release(true).validate().unwrap_err();
        assert!(matches!(err, SemtagError::Configuration(_)));
    }

    #[test]
    fn test_promotion_excludes_explicit_bump() {
        let err = policy()
            .with_promote_to_release(true)
            .with_bump(VersionComponent::Minor)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("minor"));
        assert!(policy()
            .with_promote_to_release(true)
            .with_bump(VersionComponent::None)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_new_pre_release_excludes_pre_release_bump_and_promotion() {
        assert!(policy()
            .with_pre_release(pre_release())
            .with_new_pre_release(true)
            .with_bump(VersionComponent::PreRelease)
            .validate()
            .is_err());
        assert!(policy()
            .with_pre_release(pre_release())
            .with_new_pre_release(true)
            .with_promote_to_release(true)
            .validate()
            .is_err());
    }

    #[test]
    fn test_empty_snapshot_suffix_rejected() {
        assert!(policy().with_snapshot("").validate().is_err());
    }

    #[test]
    fn test_invalid_starting_identifier_rejected() {
        assert!(PreReleaseConfig::new("beta.01").is_err());
        assert!(PreReleaseConfig::new("").is_err());
    }

    #[test]
    fn test_pre_release_config_bump_validates() {
        let config = pre_release().with_strategy(|_: &str| "bad_id".to_string());
        assert!(matches!(
            config.bump("alpha.0"),
            Err(SemtagError::InvalidBumpResult { .. })
        ));
        assert_eq!(pre_release().bump("alpha.0").unwrap(), "alpha.1");
    }

    #[test]
    fn test_tag_filter_pre_release_inclusion() {
        let tags = ["1.0.0", "1.1.0-alpha.1", "1.1.0-beta.1"];

        let without = policy();
        assert_eq!(without.tag_filter().apply(tags).candidates.len(), 1);

        let with = policy().with_pre_release(pre_release());
        assert_eq!(with.tag_filter().apply(tags).candidates.len(), 3);

        let bumping = policy()
            .with_pre_release(pre_release().with_pattern(Regex::new("^beta").unwrap()))
            .with_bump(VersionComponent::PreRelease);
        let filtered = bumping.tag_filter().apply(tags);
        let names: Vec<&str> = filtered
            .candidates
            .iter()
            .map(|c| c.tag_name.as_str())
            .collect();
        assert_eq!(names, vec!["1.0.0", "1.1.0-beta.1"]);
    }
}
