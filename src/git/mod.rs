//! Repository facade consumed by version determination
//!
//! The engine only needs three facts from version control: the tag names,
//! whether the working tree is dirty, and which tags point at HEAD. The
//! [Repository] trait captures exactly that (plus tag creation for the CLI):
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for tests
//!
//! ```rust
//! # use semtag::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> semtag::Result<()> {
//! let tags = repo.list_tag_names()?;
//! let at_head = repo.tags_pointing_at_head()?;
//! println!("{} tags, {} at HEAD", tags.len(), at_head.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::collections::BTreeSet;

/// Version-control operations needed to determine a version
///
/// Implementations map backend errors to [crate::error::SemtagError]; the
/// engine treats every error from here as fatal.
pub trait Repository {
    /// All tag names in the repository
    fn list_tag_names(&self) -> Result<BTreeSet<String>>;

    /// Whether tracked files have staged or unstaged modifications
    ///
    /// Untracked and ignored files do not make a tree dirty.
    fn is_working_tree_dirty(&self) -> Result<bool>;

    /// Names of the tags whose target commit is HEAD (empty if none)
    fn tags_pointing_at_head(&self) -> Result<BTreeSet<String>>;

    /// Create a lightweight tag at HEAD
    ///
    /// # Returns
    /// * `Ok(())` - Tag created
    /// * `Err` - If the tag already exists, HEAD is unborn, or Git error occurs
    fn create_tag(&self, name: &str) -> Result<()>;
}
