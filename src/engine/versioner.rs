use crate::boundary::BoundaryWarning;
use crate::domain::tag::VersionCandidate;
use crate::domain::version_set::{VersionComparator, VersionSet};
use crate::engine::bump_engine::{BumpEngine, Determination, RepositoryState};
use crate::error::Result;
use crate::git::Repository;
use crate::policy::BumpPolicy;
use log::debug;
use std::collections::BTreeSet;

/// Binds a repository to the engine and caches its tag listing
pub struct Versioner<R: Repository> {
    repo: R,
    comparator: VersionComparator,
    tags: Option<BTreeSet<String>>,
}

impl<R: Repository> Versioner<R> {
    pub fn new(repo: R) -> Self {
        Versioner {
            repo,
            comparator: VersionComparator::default(),
            tags: None,
        }
    }

    pub fn with_comparator(mut self, comparator: VersionComparator) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Drop the cached tag listing; the next call re-reads the repository
    pub fn refresh(&mut self) {
        self.tags = None;
    }

    fn tags(&mut self) -> Result<&BTreeSet<String>> {
        if self.tags.is_none() {
            let tags = self.repo.list_tag_names()?;
            debug!("loaded {} tags from repository", tags.len());
            self.tags = Some(tags);
        }
        Ok(&*self.tags.get_or_insert_with(BTreeSet::new))
    }

    /// Filter the cached tags through the policy and order them
    pub fn version_set(&mut self, policy: &BumpPolicy) -> Result<(VersionSet, Vec<BoundaryWarning>)> {
        let comparator = self.comparator;
        let filtered = policy.tag_filter().apply(self.tags()?);
        debug!("{} tags matched the policy", filtered.candidates.len());

        Ok((
            VersionSet::new(filtered.candidates, comparator),
            filtered.warnings,
        ))
    }

    /// The newest candidate accepted by the policy, if any
    pub fn latest_version(&mut self, policy: &BumpPolicy) -> Result<Option<VersionCandidate>> {
        let (versions, _) = self.version_set(policy)?;
        Ok(versions.latest().cloned())
    }

    /// Determine the next version from the repository's current state
    pub fn determine(&mut self, policy: &BumpPolicy) -> Result<Determination> {
        let (versions, mut warnings) = self.version_set(policy)?;
        let has_tags = !self.tags()?.is_empty();

        let state = RepositoryState {
            dirty: self.repo.is_working_tree_dirty()?,
            head_tags: self.repo.tags_pointing_at_head()?,
            has_tags,
        };
        debug!(
            "working tree dirty: {}, tags at HEAD: {:?}",
            state.dirty, state.head_tags
        );

        let mut determination = BumpEngine::new(policy).determine(&versions, &state)?;
        warnings.append(&mut determination.warnings);
        determination.warnings = warnings;
        Ok(determination)
    }
}
