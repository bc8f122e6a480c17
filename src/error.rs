use thiserror::Error;

/// Unified error type for semtag operations
///
/// Every variant is terminal: a determination either yields one valid version
/// string or fails with exactly one of these.
#[derive(Error, Debug)]
pub enum SemtagError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cannot create a release version when there are uncommitted changes")]
    DirtyState,

    #[error(
        "Could not find a version satisfying tag-pattern /{tag_pattern}/, matching major-version {major}, \
         matching minor-version {minor}, matching patch-version {patch}, and pre-release pattern /{pre_release_pattern}/"
    )]
    NoMatchingVersion {
        tag_pattern: String,
        major: String,
        minor: String,
        patch: String,
        pre_release_pattern: String,
    },

    #[error("HEAD is already tagged '{tag}'; cannot also {requested}")]
    ContradictoryRequest { tag: String, requested: String },

    #[error(
        "Bumped pre-release identifier '{identifier}' is not valid: identifiers must comprise only ASCII \
         alphanumerics and hyphen, and numeric identifiers must not include leading zeroes"
    )]
    InvalidBumpResult { identifier: String },

    #[error(
        "Cannot bump pre-release identifier because the latest version {latest} has none; \
         request a new pre-release instead"
    )]
    UnresolvableBump { latest: String },

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semtag
pub type Result<T> = std::result::Result<T, SemtagError>;

impl SemtagError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        SemtagError::Configuration(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        SemtagError::Version(msg.into())
    }

    /// Create a configuration file error with context
    pub fn config_file(msg: impl Into<String>) -> Self {
        SemtagError::ConfigFile(msg.into())
    }

    pub fn contradictory(tag: impl Into<String>, requested: impl Into<String>) -> Self {
        SemtagError::ContradictoryRequest {
            tag: tag.into(),
            requested: requested.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SemtagError::configuration("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SemtagError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_regex() {
        let re_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: SemtagError = re_err.into();
        assert!(err.to_string().starts_with("Invalid pattern"));
    }

    #[test]
    fn test_no_matching_version_names_patterns() {
        let err = SemtagError::NoMatchingVersion {
            tag_pattern: r"^v\d".to_string(),
            major: "1".to_string(),
            minor: "<any>".to_string(),
            patch: "<any>".to_string(),
            pre_release_pattern: "^beta".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains(r"/^v\d/"));
        assert!(msg.contains("matching major-version 1"));
        assert!(msg.contains("matching minor-version <any>"));
        assert!(msg.contains("/^beta/"));
    }

    #[test]
    fn test_invalid_bump_result_names_identifier() {
        let err = SemtagError::InvalidBumpResult {
            identifier: "beta.01".to_string(),
        };
        assert!(err.to_string().contains("'beta.01'"));
    }

    #[test]
    fn test_contradictory_request_display() {
        let err = SemtagError::contradictory("v1.2.3", "bump the patch version");
        assert_eq!(
            err.to_string(),
            "HEAD is already tagged 'v1.2.3'; cannot also bump the patch version"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (SemtagError::configuration("x"), "Configuration error"),
            (SemtagError::version("x"), "Version parsing error"),
            (SemtagError::config_file("x"), "Configuration file error"),
            (SemtagError::DirtyState, "Cannot create a release version"),
            (
                SemtagError::UnresolvableBump {
                    latest: "1.0.0".to_string(),
                },
                "Cannot bump pre-release identifier",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
