//! Pure formatting functions for UI output.
//!
//! Everything here writes to stderr so stdout carries only the version (or
//! its JSON form) and stays usable in scripts.

use crate::boundary::BoundaryWarning;
use crate::engine::Determination;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One-line summary of how a version was reached
///
/// - HEAD tagged: `1.2.3 (HEAD is tagged 'v1.2.3')`
/// - Bumped: `1.2.4 (patch bump from 'v1.2.3')`
/// - No tags: `0.1.0 (no matching tags)`
pub fn describe_determination(determination: &Determination) -> String {
    let version = &determination.version;
    if let Some(tag) = determination
        .head_tag
        .as_deref()
        .filter(|_| determination.bump.is_none())
    {
        return format!("{} (HEAD is tagged '{}')", version, tag);
    }

    match (&determination.latest_tag, determination.bump) {
        (Some(tag), Some(bump)) => format!("{} ({} bump from '{}')", version, bump, tag),
        (Some(tag), None) => format!("{} (from '{}')", version, tag),
        (None, Some(bump)) => format!("{} ({} bump, no matching tags)", version, bump),
        (None, None) => format!("{} (no matching tags)", version),
    }
}

/// Print the warnings and summary of a determination
pub fn display_determination(determination: &Determination) {
    for warning in &determination.warnings {
        display_boundary_warning(warning);
    }
    display_status(&describe_determination(determination));
}
