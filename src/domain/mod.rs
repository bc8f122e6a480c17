//! Domain logic - pure version rules independent of git operations

pub mod prerelease;
pub mod tag;
pub mod version;
pub mod version_set;

pub use prerelease::{
    IncrementTrailingNumeric, MappingStrategy, PreRelease, PreReleaseBumpStrategy,
};
pub use tag::{
    compare_versions, extract_version, ExtractedVersion, PreReleaseInclusion, TagFilter,
    TagFormat, VersionCandidate, VersionsMatching,
};
pub use version::{SemanticVersion, VersionComponent};
pub use version_set::{TieBreak, VersionComparator, VersionSet};
