use crate::github::{GithubClient, RepoRef};
use crate::stats::{RepoStats, fetch_repo_stats};
use tokio::task::JoinHandle;
use tracing::error;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub client: Option<GithubClient>,
    pub repo: RepoRef,
}

/// What the loader passes to the renderer: stats still being fetched.
pub struct PageData {
    pub repo: JoinHandle<RepoStats>,
}

/// Starts the stats fetch for one page render. Nothing is cached; every
/// call goes upstream again.
pub fn load(state: &AppState) -> PageData {
    let client = state.client.clone();
    let repo = state.repo.clone();
    PageData {
        repo: tokio::spawn(async move { fetch_repo_stats(client.as_ref(), &repo).await }),
    }
}

impl PageData {
    /// Waits for the pending stats. A fetch task that died resolves to no
    /// stats at all.
    pub async fn resolve(self) -> Option<RepoStats> {
        match self.repo.await {
            Ok(stats) => Some(stats),
            Err(e) => {
                error!("stats task did not complete: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::EmptyReason;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn resolves_empty_without_client() {
        let state = AppState {
            client: None,
            repo: RepoRef::new("mjovanc", "njord"),
        };

        let stats = load(&state).resolve().await.unwrap();
        assert!(matches!(
            stats,
            RepoStats::Empty(EmptyReason::MissingCredential)
        ));
    }

    #[tokio::test]
    async fn each_load_fetches_again() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/mjovanc/njord"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stargazers_count": 9 })))
            .expect(2)
            .mount(&server)
            .await;
        // Everything else 404s and degrades to defaults.
        let state = AppState {
            client: Some(GithubClient::with_base_url("token", server.uri())),
            repo: RepoRef::new("mjovanc", "njord"),
        };

        for _ in 0..2 {
            let stats = load(&state).resolve().await.unwrap();
            assert_eq!(stats.summary().unwrap().stargazers.stars, 9);
        }
    }
}
