//! Version determination: the pure [BumpEngine] and the repository-backed [Versioner]

pub mod bump_engine;
pub mod versioner;

pub use bump_engine::{BumpEngine, Determination, RepositoryState};
pub use versioner::Versioner;
