use crate::dates::short_date;
use crate::github::{CommitEntry, Contributor, GithubClient, GithubError, Release, RepoRef};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Shown when the release list can't be read or has no published release.
pub const FALLBACK_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stargazers {
    pub stars: u64,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestVersion {
    pub version: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestCommit {
    pub path: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStatsSummary {
    pub stargazers: Stargazers,
    pub latest_version: LatestVersion,
    pub latest_commit: Option<LatestCommit>,
    pub contributors: Vec<Contributor>,
}

#[derive(Debug, Error)]
pub enum EmptyReason {
    #[error("no GitHub token configured")]
    MissingCredential,
    #[error("repository info unavailable: {0}")]
    RepoInfo(#[source] GithubError),
}

/// Outcome of a stats fetch. `Empty` keeps the reason so callers can tell a
/// repository with no stars apart from a failed lookup; serialized it is `{}`.
#[derive(Debug)]
pub enum RepoStats {
    Ready(RepoStatsSummary),
    Empty(EmptyReason),
}

impl RepoStats {
    pub fn summary(&self) -> Option<&RepoStatsSummary> {
        match self {
            RepoStats::Ready(summary) => Some(summary),
            RepoStats::Empty(_) => None,
        }
    }
}

impl Serialize for RepoStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RepoStats::Ready(summary) => summary.serialize(serializer),
            RepoStats::Empty(_) => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Collects stars, latest release, latest commit and contributors for `repo`.
///
/// Never fails. Repo info is required: if it can't be read the result is
/// `Empty` and nothing else is requested. Every other sub-fetch is logged and
/// replaced by its default when it fails.
pub async fn fetch_repo_stats(client: Option<&GithubClient>, repo: &RepoRef) -> RepoStats {
    let Some(client) = client else {
        debug!(%repo, "no GitHub client configured, skipping stats");
        return RepoStats::Empty(EmptyReason::MissingCredential);
    };

    let info = match client.repository(repo).await {
        Ok(info) => info,
        Err(e) => {
            error!(%repo, "failed to fetch repository info: {e:#}");
            return RepoStats::Empty(EmptyReason::RepoInfo(e));
        }
    };

    let commits = client.commits(repo).await.unwrap_or_else(|e| {
        warn!(%repo, "failed to fetch commits: {e:#}");
        Vec::new()
    });
    let contributors = client.contributors(repo).await.unwrap_or_else(|e| {
        warn!(%repo, "failed to fetch contributors: {e:#}");
        Vec::new()
    });
    let releases = client.releases(repo).await.unwrap_or_else(|e| {
        warn!(%repo, "failed to fetch releases: {e:#}");
        Vec::new()
    });

    let repo_url = repo.html_url();
    RepoStats::Ready(RepoStatsSummary {
        stargazers: Stargazers {
            stars: info.stargazers_count,
            path: format!("{repo_url}/stargazers"),
        },
        latest_version: LatestVersion {
            version: latest_version(&releases),
            path: format!("{repo_url}/releases"),
        },
        latest_commit: latest_commit(&repo_url, &commits),
        contributors,
    })
}

fn latest_version(releases: &[Release]) -> String {
    releases
        .iter()
        .find(|r| !r.draft)
        .map(|r| r.tag_name.trim_start_matches('v').to_string())
        .unwrap_or_else(|| FALLBACK_VERSION.to_string())
}

fn latest_commit(repo_url: &str, commits: &[CommitEntry]) -> Option<LatestCommit> {
    let newest = commits.first()?;
    // A commit without author metadata still gets a link, just no date.
    let date = newest
        .commit
        .author
        .as_ref()
        .map(|a| short_date(a.date))
        .unwrap_or_default();

    Some(LatestCommit {
        path: format!("{repo_url}/commit/{}", newest.sha),
        date,
    })
}
