use crate::boundary::BoundaryWarning;
use crate::domain::tag::{VersionCandidate, VersionsMatching};
use crate::domain::version::VersionComponent;
use crate::domain::version_set::VersionSet;
use crate::error::{Result, SemtagError};
use crate::policy::BumpPolicy;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeSet;

/// Repository facts read once per determination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryState {
    pub dirty: bool,
    pub head_tags: BTreeSet<String>,
    /// Whether the repository holds any tag at all, matching or not
    pub has_tags: bool,
}

/// Outcome of one version determination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Determination {
    pub version: String,
    /// The bump actually applied: explicit, inferred, or `None` when HEAD was
    /// already tagged or the starting version was used unbumped
    pub bump: Option<VersionComponent>,
    pub snapshot: bool,
    /// Version of the latest matching tag that the result was derived from
    pub latest_version: Option<String>,
    pub latest_tag: Option<String>,
    pub head_tag: Option<String>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Computes the next version from a policy, the filtered versions and the
/// repository state. Pure: no I/O, same inputs give the same result.
pub struct BumpEngine<'a> {
    policy: &'a BumpPolicy,
}

impl<'a> BumpEngine<'a> {
    pub fn new(policy: &'a BumpPolicy) -> Self {
        BumpEngine { policy }
    }

    pub fn determine(&self, versions: &VersionSet, state: &RepositoryState) -> Result<Determination> {
        let policy = self.policy;
        policy.validate()?;

        if !policy.snapshot && state.dirty {
            return Err(SemtagError::DirtyState);
        }

        let Some(latest) = versions.latest() else {
            return self.from_starting_version(state.has_tags);
        };

        let mut warnings = Vec::new();
        let ties = versions.latest_ties();
        if ties.len() > 1 {
            let warning = BoundaryWarning::DuplicateVersion {
                version: latest.version.to_string(),
                chosen: latest.tag_name.clone(),
                tags: ties.iter().map(|c| c.tag_name.clone()).collect(),
            };
            warn!("{}", warning);
            warnings.push(warning);
        }

        // Newest first, so a HEAD carrying several matching tags resolves to the highest
        let head = versions
            .iter()
            .find(|c| state.head_tags.contains(&c.tag_name));

        if let (Some(head), false) = (head, state.dirty) {
            if let Some(requested) = self.requested_change() {
                return Err(SemtagError::contradictory(&head.tag_name, requested));
            }

            info!(
                "HEAD is tagged '{}'; using version {}",
                head.tag_name, head.version
            );
            return Ok(Determination {
                version: head.version.to_string(),
                bump: None,
                snapshot: false,
                latest_version: Some(latest.version.to_string()),
                latest_tag: Some(latest.tag_name.clone()),
                head_tag: Some(head.tag_name.clone()),
                warnings,
            });
        }

        let bump = self.resolve_bump(latest)?;
        let mut version = self.next_version(latest, bump)?;
        if policy.new_pre_release {
            version = self.append_starting_identifier(version)?;
        }
        if policy.snapshot {
            version = format!("{}-{}", version, policy.snapshot_suffix);
        }

        info!(
            "determined version {} ({} bump from {})",
            version, bump, latest.version
        );
        Ok(Determination {
            version,
            bump: Some(bump),
            snapshot: policy.snapshot,
            latest_version: Some(latest.version.to_string()),
            latest_tag: Some(latest.tag_name.clone()),
            head_tag: head.map(|c| c.tag_name.clone()),
            warnings,
        })
    }

    /// No candidate survived filtering
    ///
    /// Only a repository without any tag may bump the starting version; when
    /// tags exist but none passed the filters, an explicit bump has nothing to
    /// start from.
    fn from_starting_version(&self, has_tags: bool) -> Result<Determination> {
        let policy = self.policy;
        let start = policy.starting_version;

        let warning = BoundaryWarning::NoTagsFound {
            tag_pattern: policy.tag_pattern.as_str().to_string(),
        };
        warn!("{}", warning);

        let (mut version, bump) = if policy.new_pre_release {
            // The starting version already is the next patch release
            let bump = policy.bump.filter(|b| *b != VersionComponent::Patch);
            let base = bump.map_or(Ok(start), |b| start.bump(b))?;
            (self.append_starting_identifier(base.to_string())?, bump)
        } else {
            match policy.bump {
                Some(VersionComponent::PreRelease) => return Err(self.no_matching_version()),
                Some(VersionComponent::Major | VersionComponent::Minor | VersionComponent::Patch)
                    if has_tags =>
                {
                    return Err(self.no_matching_version())
                }
                Some(bump @ (VersionComponent::Major | VersionComponent::Minor | VersionComponent::Patch)) => {
                    (start.bump(bump)?.to_string(), Some(bump))
                }
                Some(VersionComponent::None) | None => (start.to_string(), None),
            }
        };

        if policy.snapshot {
            version = format!("{}-{}", version, policy.snapshot_suffix);
        }

        info!("no matching tags; determined version {}", version);
        Ok(Determination {
            version,
            bump,
            snapshot: policy.snapshot,
            latest_version: None,
            latest_tag: None,
            head_tag: None,
            warnings: vec![warning],
        })
    }

    fn resolve_bump(&self, latest: &VersionCandidate) -> Result<VersionComponent> {
        let policy = self.policy;
        if let Some(bump) = policy.bump {
            return Ok(bump);
        }

        let inferred = if policy.promote_to_release {
            VersionComponent::None
        } else if policy.new_pre_release || !latest.version.is_pre_release() {
            VersionComponent::Patch
        } else if policy.pre_release.is_none() {
            return Err(SemtagError::configuration(format!(
                "Cannot bump version because the latest version is {}, which contains pre-release \
                 identifiers, but no pre-release configuration has been specified",
                latest.version
            )));
        } else {
            VersionComponent::PreRelease
        };

        debug!(
            "inferred {} bump from latest version {}",
            inferred, latest.version
        );
        Ok(inferred)
    }

    fn next_version(&self, latest: &VersionCandidate, bump: VersionComponent) -> Result<String> {
        let numeric = latest.version.version();

        match bump {
            VersionComponent::Major | VersionComponent::Minor | VersionComponent::Patch => {
                Ok(numeric.bump(bump)?.to_string())
            }
            VersionComponent::PreRelease => {
                let current = latest.version.pre_release().ok_or_else(|| {
                    SemtagError::UnresolvableBump {
                        latest: latest.version.to_string(),
                    }
                })?;
                let config = self.policy.pre_release.as_ref().ok_or_else(|| {
                    SemtagError::configuration(
                        "Cannot bump pre-release identifier if a pre-release configuration is not specified",
                    )
                })?;

                let next = config.bump(current.as_str())?;
                debug!("bumped pre-release {} -> {}", current, next);
                Ok(format!("{}-{}", numeric, next))
            }
            VersionComponent::None => Ok(numeric.to_string()),
        }
    }

    fn append_starting_identifier(&self, version: String) -> Result<String> {
        let config = self.policy.pre_release.as_ref().ok_or_else(|| {
            SemtagError::configuration(
                "Cannot create a new pre-release version if a pre-release configuration is not specified",
            )
        })?;
        Ok(format!("{}-{}", version, config.starting_identifier))
    }

    /// What the policy asks for beyond "the current version", if anything
    fn requested_change(&self) -> Option<String> {
        let policy = self.policy;
        if policy.promote_to_release || policy.bump == Some(VersionComponent::None) {
            Some("promote to a release".to_string())
        } else if policy.new_pre_release {
            Some("start a new pre-release".to_string())
        } else {
            policy
                .bump
                .map(|bump| format!("bump the {} version", bump))
        }
    }

    fn no_matching_version(&self) -> SemtagError {
        let policy = self.policy;
        let matching = policy.versions_matching;
        SemtagError::NoMatchingVersion {
            tag_pattern: policy.tag_pattern.as_str().to_string(),
            major: VersionsMatching::describe(matching.major),
            minor: VersionsMatching::describe(matching.minor),
            patch: VersionsMatching::describe(matching.patch),
            pre_release_pattern: policy
                .pre_release
                .as_ref()
                .map_or_else(|| "<none>".to_string(), |c| c.pattern.as_str().to_string()),
        }
    }
}
