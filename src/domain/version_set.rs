use crate::domain::tag::VersionCandidate;
use std::cmp::Ordering;

/// How candidates of equal precedence are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// The lexically smallest tag name ranks highest
    #[default]
    TagName,
    /// Leave ties in input order (stable sort)
    Stable,
}

/// SemVer precedence over candidates, plus a tie-break for equal versions
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionComparator {
    pub tie_break: TieBreak,
}

impl VersionComparator {
    pub fn new(tie_break: TieBreak) -> Self {
        VersionComparator { tie_break }
    }

    /// Ascending order: `Greater` means `a` is the newer version
    pub fn compare(&self, a: &VersionCandidate, b: &VersionCandidate) -> Ordering {
        a.version.cmp(&b.version).then_with(|| match self.tie_break {
            TieBreak::TagName => b.tag_name.cmp(&a.tag_name),
            TieBreak::Stable => Ordering::Equal,
        })
    }
}

/// Filtered candidates ordered newest first
///
/// Built wholesale from one tag listing and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct VersionSet {
    candidates: Vec<VersionCandidate>,
}

impl VersionSet {
    pub fn new(mut candidates: Vec<VersionCandidate>, comparator: VersionComparator) -> Self {
        candidates.sort_by(|a, b| comparator.compare(b, a));
        VersionSet { candidates }
    }

    pub fn latest(&self) -> Option<&VersionCandidate> {
        self.candidates.first()
    }

    /// Every candidate sharing the latest version's precedence, winner first
    pub fn latest_ties(&self) -> &[VersionCandidate] {
        let Some(latest) = self.latest() else {
            return &[];
        };
        let count = self
            .candidates
            .iter()
            .take_while(|c| c.version == latest.version)
            .count();
        &self.candidates[..count]
    }

    /// Candidates newest first
    pub fn iter(&self) -> impl Iterator<Item = &VersionCandidate> {
        self.candidates.iter()
    }
}
