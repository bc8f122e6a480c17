//! User interface module - terminal output of the binary.
//!
//! - `formatter` - Pure formatting functions

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    describe_determination, display_boundary_warning, display_determination, display_error,
    display_status, display_success,
};
