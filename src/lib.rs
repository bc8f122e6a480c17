pub mod boundary;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod git;
pub mod logging;
pub mod policy;
pub mod ui;

pub use engine::{BumpEngine, Determination, Versioner};
pub use error::{Result, SemtagError};
pub use policy::{BumpPolicy, PreReleaseConfig};
