use serde::Serialize;
use std::fmt;

/// Non-fatal conditions met while turning tags into a version.
/// They never change the result; callers decide whether to show them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryWarning {
    /// Tag matched the tag pattern but holds no usable semantic version
    UnparsableTag { tag: String, reason: String },
    /// Several tags share the latest version; `chosen` won the tie-break
    DuplicateVersion {
        version: String,
        chosen: String,
        tags: Vec<String>,
    },
    /// No tag survived filtering, so the starting version was used
    NoTagsFound { tag_pattern: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::DuplicateVersion {
                version,
                chosen,
                tags,
            } => {
                write!(
                    f,
                    "Tags {} all resolve to version {}; using '{}'",
                    tags.join(", "),
                    version,
                    chosen
                )
            }
            BoundaryWarning::NoTagsFound { tag_pattern } => {
                write!(
                    f,
                    "No tags match pattern /{}/; using the starting version",
                    tag_pattern
                )
            }
        }
    }
}
