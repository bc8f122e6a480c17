use crate::domain::prerelease::MappingStrategy;
use crate::domain::tag::{TagFormat, VersionsMatching};
use crate::domain::version::{SemanticVersion, VersionComponent};
use crate::error::{Result, SemtagError};
use crate::policy::{BumpPolicy, PreReleaseConfig, DEFAULT_SNAPSHOT_SUFFIX, DEFAULT_TAG_PATTERN};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Represents the complete configuration for semtag.
///
/// An absent `[pre_release]` section disables pre-release handling entirely.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub pre_release: Option<PreReleaseSection>,
}

fn default_starting_version() -> String {
    "0.1.0".to_string()
}

fn default_tag_pattern() -> String {
    DEFAULT_TAG_PATTERN.to_string()
}

fn default_snapshot_suffix() -> String {
    DEFAULT_SNAPSHOT_SUFFIX.to_string()
}

fn default_tag_format() -> String {
    "v{version}".to_string()
}

fn default_pre_release_pattern() -> String {
    ".*".to_string()
}

/// Version discovery and formatting settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VersionConfig {
    #[serde(default = "default_starting_version")]
    pub starting_version: String,

    /// Regex a tag name must contain a match for
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default = "default_snapshot_suffix")]
    pub snapshot_suffix: String,

    /// Name of tags created with `--tag`
    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    #[serde(default)]
    pub matching: VersionsMatching,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            starting_version: default_starting_version(),
            tag_pattern: default_tag_pattern(),
            snapshot_suffix: default_snapshot_suffix(),
            tag_format: default_tag_format(),
            matching: VersionsMatching::default(),
        }
    }
}

/// How the next pre-release identifier is computed
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Increment the trailing numeric identifier
    #[default]
    Increment,
    /// Look the current identifier up in `[pre_release.mapping]`
    Mapping,
}

/// Pre-release settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PreReleaseSection {
    pub starting_identifier: String,

    /// Regex over the pre-release part of tags a pre-release bump may start from
    #[serde(default = "default_pre_release_pattern")]
    pub pattern: String,

    #[serde(default)]
    pub strategy: StrategyKind,

    #[serde(default)]
    pub mapping: BTreeMap<String, String>,
}

/// Per-invocation requests layered over the file configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub bump: Option<VersionComponent>,
    pub new_pre_release: bool,
    pub promote_to_release: bool,
    pub snapshot: bool,
}

impl Config {
    /// Resolve the configuration plus overrides into a validated policy
    ///
    /// # Returns
    /// * `Ok(BumpPolicy)` - Patterns compiled, starting version parsed
    /// * `Err` - Invalid regex, starting version or contradictory request
    pub fn to_policy(&self, overrides: &Overrides) -> Result<BumpPolicy> {
        let version = &self.version;
        let starting_version = SemanticVersion::parse(&version.starting_version)?;

        let mut policy = BumpPolicy::new(starting_version)
            .with_tag_pattern(Regex::new(&version.tag_pattern)?)
            .with_versions_matching(version.matching)
            .with_new_pre_release(overrides.new_pre_release)
            .with_promote_to_release(overrides.promote_to_release);

        if let Some(section) = &self.pre_release {
            policy = policy.with_pre_release(section.to_config()?);
        }
        if let Some(bump) = overrides.bump {
            policy = policy.with_bump(bump);
        }
        if overrides.snapshot {
            policy = policy.with_snapshot(version.snapshot_suffix.clone());
        } else {
            policy.snapshot_suffix = version.snapshot_suffix.clone();
        }

        policy.validate()?;
        Ok(policy)
    }

    pub fn tag_format(&self) -> Result<TagFormat> {
        TagFormat::new(self.version.tag_format.clone())
    }
}

impl PreReleaseSection {
    fn to_config(&self) -> Result<PreReleaseConfig> {
        let config = PreReleaseConfig::new(self.starting_identifier.clone())?
            .with_pattern(Regex::new(&self.pattern)?);

        match self.strategy {
            StrategyKind::Increment => Ok(config),
            StrategyKind::Mapping if self.mapping.is_empty() => Err(SemtagError::configuration(
                "Pre-release strategy 'mapping' requires a [pre_release.mapping] table",
            )),
            StrategyKind::Mapping => {
                Ok(config.with_strategy(MappingStrategy::new(self.mapping.clone())))
            }
        }
    }
}

/// Parse configuration text
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| SemtagError::config_file(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semtag.toml` in current directory
/// 3. `.semtag.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        debug!("loading configuration from {}", path);
        fs::read_to_string(path)?
    } else if Path::new("./semtag.toml").exists() {
        debug!("loading configuration from ./semtag.toml");
        fs::read_to_string("./semtag.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".semtag.toml");
        if config_path.exists() {
            debug!("loading configuration from {}", config_path.display());
            fs::read_to_string(config_path)?
        } else {
            debug!("no configuration file found; using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version.starting_version, "0.1.0");
        assert_eq!(config.version.tag_pattern, DEFAULT_TAG_PATTERN);
        assert_eq!(config.version.snapshot_suffix, "SNAPSHOT");
        assert!(config.pre_release.is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.version.tag_format, "v{version}");
        assert_eq!(config.version.matching, VersionsMatching::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [version]
            starting_version = "1.0.0"
            tag_pattern = "^release-"
            snapshot_suffix = "dev"

            [version.matching]
            major = 2

            [pre_release]
            starting_identifier = "alpha.0"
            pattern = "^(alpha|beta)"
            "#,
        )
        .unwrap();

        assert_eq!(config.version.matching.major, Some(2));
        assert_eq!(config.version.matching.minor, None);
        let pre = config.pre_release.as_ref().unwrap();
        assert_eq!(pre.strategy, StrategyKind::Increment);

        let policy = config.to_policy(&Overrides::default()).unwrap();
        assert_eq!(policy.starting_version, SemanticVersion::new(1, 0, 0));
        assert_eq!(policy.tag_pattern.as_str(), "^release-");
        assert_eq!(policy.snapshot_suffix, "dev");
        assert!(!policy.snapshot);
        assert_eq!(policy.pre_release.unwrap().pattern.as_str(), "^(alpha|beta)");
    }

    #[test]
    fn test_overrides_applied() {
        let overrides = Overrides {
            bump: Some(VersionComponent::Minor),
            snapshot: true,
            ..Overrides::default()
        };
        let policy = Config::default().to_policy(&overrides).unwrap();
        assert_eq!(policy.bump, Some(VersionComponent::Minor));
        assert!(policy.snapshot);
        assert_eq!(policy.snapshot_suffix, "SNAPSHOT");
    }

    #[test]
    fn test_mapping_strategy() {
        let config = parse_config(
            r#"
            [pre_release]
            starting_identifier = "alpha"
            strategy = "mapping"

            [pre_release.mapping]
            alpha = "beta"
            beta = "rc"
            "#,
        )
        .unwrap();
        let policy = config.to_policy(&Overrides::default()).unwrap();
        let pre = policy.pre_release.unwrap();
        assert_eq!(pre.bump("alpha").unwrap(), "beta");
        assert_eq!(pre.bump("rc").unwrap(), "rc.1");
    }

    #[test]
    fn test_mapping_strategy_requires_table() {
        let config = parse_config(
            r#"
            [pre_release]
            starting_identifier = "alpha"
            strategy = "mapping"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.to_policy(&Overrides::default()),
            Err(SemtagError::Configuration(_))
        ));
    }

    #[test]
    fn test_pre_release_section_requires_starting_identifier() {
        let err = parse_config("[pre_release]\npattern = \".*\"\n").unwrap_err();
        assert!(matches!(err, SemtagError::ConfigFile(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.version.tag_pattern = "(".to_string();
        assert!(matches!(
            config.to_policy(&Overrides::default()),
            Err(SemtagError::Pattern(_))
        ));

        let mut config = Config::default();
        config.version.starting_version = "1.0".to_string();
        assert!(matches!(
            config.to_policy(&Overrides::default()),
            Err(SemtagError::Version(_))
        ));
    }

    #[test]
    fn test_contradictory_overrides_rejected() {
        let overrides = Overrides {
            new_pre_release: true,
            ..Overrides::default()
        };
        assert!(Config::default().to_policy(&overrides).is_err());
    }

    #[test]
    fn test_tag_format() {
        let mut config = Config::default();
        assert_eq!(config.tag_format().unwrap().format("1.2.3"), "v1.2.3");
        config.version.tag_format = "release".to_string();
        assert!(config.tag_format().is_err());
    }
}
