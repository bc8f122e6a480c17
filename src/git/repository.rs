use crate::error::Result;
use git2::{ErrorCode, Repository as Git2Repo, Status, StatusOptions};
use std::collections::BTreeSet;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit_id(&self) -> Result<Option<git2::Oid>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Some(head.peel_to_commit()?.id()))
    }
}

impl super::Repository for Git2Repository {
    fn list_tag_names(&self) -> Result<BTreeSet<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn is_working_tree_dirty(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .any(|entry| entry.status() != Status::CURRENT))
    }

    fn tags_pointing_at_head(&self) -> Result<BTreeSet<String>> {
        let Some(head_id) = self.head_commit_id()? else {
            return Ok(BTreeSet::new());
        };

        let mut at_head = BTreeSet::new();
        let tags = self.repo.tag_names(None)?;

        for tag_name in tags.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                Ok(reference) => reference,
                Err(e) if e.code() == ErrorCode::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            // Annotated tags peel through the tag object; tags of non-commits are skipped
            if let Ok(commit) = reference.peel_to_commit() {
                if commit.id() == head_id {
                    at_head.insert(tag_name.to_string());
                }
            }
        }

        Ok(at_head)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.tag_lightweight(name, head.as_object(), false)?;

        Ok(())
    }
}
