use crate::error::{Result, SemtagError};
use crate::git::Repository;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

/// Mock repository for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    tags: RefCell<BTreeSet<String>>,
    head_tags: RefCell<BTreeSet<String>>,
    dirty: Cell<bool>,
    tag_listings: Cell<usize>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag somewhere in history
    pub fn add_tag(&self, name: impl Into<String>) {
        self.tags.borrow_mut().insert(name.into());
    }

    /// Add a tag pointing at HEAD
    pub fn add_head_tag(&self, name: impl Into<String>) {
        let name = name.into();
        self.tags.borrow_mut().insert(name.clone());
        self.head_tags.borrow_mut().insert(name);
    }

    pub fn set_dirty(&self, dirty: bool) {
        self.dirty.set(dirty);
    }

    /// How many times the tag list has been read
    pub fn tag_listings(&self) -> usize {
        self.tag_listings.get()
    }
}

impl Repository for MockRepository {
    fn list_tag_names(&self) -> Result<BTreeSet<String>> {
        self.tag_listings.set(self.tag_listings.get() + 1);
        Ok(self.tags.borrow().clone())
    }

    fn is_working_tree_dirty(&self) -> Result<bool> {
        Ok(self.dirty.get())
    }

    fn tags_pointing_at_head(&self) -> Result<BTreeSet<String>> {
        Ok(self.head_tags.borrow().clone())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self.tags.borrow().contains(name) {
            return Err(SemtagError::Git(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }
        self.add_head_tag(name);
        Ok(())
    }
}
