use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const GITHUB_WEB_URL: &str = "https://github.com";

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("network error requesting {path}: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GitHub API returned HTTP {} for {path}", .status.as_u16())]
    Status { path: String, status: StatusCode },
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses `owner/name`. Both halves must be non-empty.
    pub fn parse(s: &str) -> Option<Self> {
        let (owner, name) = s.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }

    pub fn api_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.name)
    }

    /// Public link to the repository on github.com.
    pub fn html_url(&self) -> String {
        format!("{GITHUB_WEB_URL}/{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    pub stargazers_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct CommitEntry {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
pub struct CommitAuthor {
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub contributions: u64,
}

#[derive(Debug, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub draft: bool,
}

/// Read-only client for the GitHub REST API, authenticated with a static
/// bearer token. Cheap to clone.
#[derive(Clone)]
pub struct GithubClient {
    token: Arc<String>,
    base_url: Arc<String>,
    http: Arc<Client>,
}

impl GithubClient {
    /// `base_url` is the API root, normally [`DEFAULT_API_URL`].
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            token: Arc::new(token.into()),
            base_url: Arc::new(base_url),
            http: Arc::new(Client::new()),
        }
    }

    /// Low-level GET against `{base_url}{path}`, decoding the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GithubError> {
        let url = format!("{}{path}", self.base_url);

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&*self.token)
            .header(USER_AGENT, "njord-site")
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|source| GithubError::Http {
                path: path.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GithubError::Status {
                path: path.to_string(),
                status,
            });
        }

        let body = resp.bytes().await.map_err(|source| GithubError::Http {
            path: path.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| GithubError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// Top-level repository metadata.
    pub async fn repository(&self, repo: &RepoRef) -> Result<Repository, GithubError> {
        self.get(&repo.api_path()).await
    }

    /// First page of commits on the default branch, newest first.
    pub async fn commits(&self, repo: &RepoRef) -> Result<Vec<CommitEntry>, GithubError> {
        self.get(&format!("{}/commits", repo.api_path())).await
    }

    pub async fn contributors(&self, repo: &RepoRef) -> Result<Vec<Contributor>, GithubError> {
        self.get(&format!("{}/contributors", repo.api_path())).await
    }

    /// First page of releases, newest first.
    pub async fn releases(&self, repo: &RepoRef) -> Result<Vec<Release>, GithubError> {
        self.get(&format!("{}/releases", repo.api_path())).await
    }
}
