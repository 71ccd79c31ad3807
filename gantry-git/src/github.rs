//! GitHub-backed implementation of [`GitProvider`].
//!
//! Reads go through the contents API; writes go through the git data API
//! (tree → commit → ref) so that a multi-file change lands as exactly one
//! commit object before any ref moves. Pull requests are created or reused
//! per the delivery mode.

use async_trait::async_trait;
use base64::Engine;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{
    AuthContext, Branch, GitError, GitProvider, PullRequestHandle, PullRequestIntent,
    PullRequestMode, RemoteFile, RemoteRepository, RepoRef,
};

const GITHUB_API: &str = "https://api.github.com";
const USER_AGENT: &str = "gantry";

/// GitHub REST adapter.
pub struct GithubProvider {
    client: reqwest::Client,
    base_url: String,
}

impl Default for GithubProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GithubProvider {
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API)
    }

    /// Point the adapter at a different API root (tests, GitHub Enterprise).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn request(&self, method: Method, path: &str, auth: &AuthContext) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", auth.token()))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }

    async fn expect_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, GitError> {
        let response = builder.send().await.map_err(|source| GitError::Transport {
            context: context.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(status_error(status, context, message));
        }

        response.json().await.map_err(|source| GitError::Transport {
            context: context.to_string(),
            source,
        })
    }

    async fn find_open_pull(
        &self,
        repo: &RepoRef,
        head_branch: &str,
        auth: &AuthContext,
    ) -> Result<Option<PullRequestHandle>, GitError> {
        let path = format!(
            "/repos/{}/{}/pulls?state=open&head={}:{}",
            repo.owner, repo.name, repo.owner, head_branch
        );
        let pulls: Vec<PullResponse> = self
            .expect_json(self.request(Method::GET, &path, auth), "list pull requests")
            .await?;
        Ok(pulls.into_iter().next().map(PullResponse::into_handle))
    }
}

#[async_trait]
impl GitProvider for GithubProvider {
    async fn get_file(
        &self,
        repo: &RepoRef,
        path: &str,
        branch: &str,
        auth: &AuthContext,
    ) -> Result<Option<RemoteFile>, GitError> {
        let context = format!("get file '{path}' from {repo}");
        let url = format!(
            "/repos/{}/{}/contents/{}?ref={}",
            repo.owner, repo.name, path, branch
        );

        let result: Result<ContentsResponse, GitError> = self
            .expect_json(self.request(Method::GET, &url, auth), &context)
            .await;
        match result {
            Ok(contents) => {
                let content = decode_content(&contents.content.unwrap_or_default())
                    .map_err(|e| GitError::Api {
                        status: 200,
                        context: context.clone(),
                        message: format!("unexpected content encoding: {e}"),
                    })?;
                Ok(Some(RemoteFile {
                    path: path.to_string(),
                    content,
                    sha: contents.sha,
                }))
            }
            Err(GitError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_repository(
        &self,
        repo: &RepoRef,
        auth: &AuthContext,
    ) -> Result<RemoteRepository, GitError> {
        let context = format!("get repository {repo}");
        let path = format!("/repos/{}/{}", repo.owner, repo.name);
        let response: RepositoryResponse = self
            .expect_json(self.request(Method::GET, &path, auth), &context)
            .await?;
        Ok(response.into())
    }

    async fn repo_exists(&self, repo: &RepoRef, auth: &AuthContext) -> Result<bool, GitError> {
        match self.get_repository(repo, auth).await {
            Ok(_) => Ok(true),
            Err(GitError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_repository(
        &self,
        repo: &RepoRef,
        private: bool,
        auth: &AuthContext,
    ) -> Result<RemoteRepository, GitError> {
        let context = format!("create repository {repo}");
        let response: RepositoryResponse = self
            .expect_json(
                self.request(Method::POST, "/user/repos", auth)
                    .json(&json!({ "name": repo.name, "private": private })),
                &context,
            )
            .await?;
        Ok(response.into())
    }

    async fn get_branch(
        &self,
        repo: &RepoRef,
        branch: &str,
        auth: &AuthContext,
    ) -> Result<Option<Branch>, GitError> {
        let context = format!("get branch '{branch}' in {repo}");
        let path = format!("/repos/{}/{}/git/ref/heads/{}", repo.owner, repo.name, branch);

        let result: Result<RefResponse, GitError> = self
            .expect_json(self.request(Method::GET, &path, auth), &context)
            .await;
        match result {
            Ok(reference) => Ok(Some(Branch {
                name: branch.to_string(),
                sha: reference.object.sha,
            })),
            Err(GitError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_branch(
        &self,
        repo: &RepoRef,
        branch: &str,
        from_sha: &str,
        auth: &AuthContext,
    ) -> Result<Branch, GitError> {
        let context = format!("create branch '{branch}' in {repo}");
        let path = format!("/repos/{}/{}/git/refs", repo.owner, repo.name);
        let reference: RefResponse = self
            .expect_json(
                self.request(Method::POST, &path, auth)
                    .json(&json!({ "ref": format!("refs/heads/{branch}"), "sha": from_sha })),
                &context,
            )
            .await?;
        Ok(Branch {
            name: branch.to_string(),
            sha: reference.object.sha,
        })
    }

    async fn open_pull_request(
        &self,
        repo: &RepoRef,
        intent: &PullRequestIntent,
        mode: PullRequestMode,
        auth: &AuthContext,
    ) -> Result<PullRequestHandle, GitError> {
        let base = self
            .get_branch(repo, &intent.base_branch, auth)
            .await?
            .ok_or_else(|| GitError::NotFound {
                context: format!("branch '{}' in {repo}", intent.base_branch),
            })?;

        let head = match self.get_branch(repo, &intent.head_branch, auth).await? {
            Some(branch) => branch,
            None => {
                self.create_branch(repo, &intent.head_branch, &base.sha, auth)
                    .await?
            }
        };

        // In basic mode the head branch is fingerprint-derived and the
        // change list is complete, so the commit builds on the base head.
        // Accumulative deliveries stack on the standing branch.
        let parent_sha = match mode {
            PullRequestMode::Basic => base.sha.clone(),
            PullRequestMode::Accumulative => head.sha.clone(),
        };

        let parent: CommitResponse = self
            .expect_json(
                self.request(
                    Method::GET,
                    &format!(
                        "/repos/{}/{}/git/commits/{}",
                        repo.owner, repo.name, parent_sha
                    ),
                    auth,
                ),
                "get parent commit",
            )
            .await?;

        // Stage the entire change list as one tree, so the delivery is a
        // single commit object: no per-file writes, no partial application.
        let entries: Vec<serde_json::Value> = intent
            .changes
            .iter()
            .map(|change| match &change.content {
                Some(content) => json!({
                    "path": change.path,
                    "mode": "100644",
                    "type": "blob",
                    "content": content,
                }),
                None => json!({
                    "path": change.path,
                    "mode": "100644",
                    "type": "blob",
                    "sha": null,
                }),
            })
            .collect();

        let tree: TreeResponse = self
            .expect_json(
                self.request(
                    Method::POST,
                    &format!("/repos/{}/{}/git/trees", repo.owner, repo.name),
                    auth,
                )
                .json(&json!({ "base_tree": parent.tree.sha, "tree": entries })),
                "create tree",
            )
            .await?;

        let message = if intent.body.is_empty() {
            intent.title.clone()
        } else {
            format!("{}\n\n{}", intent.title, intent.body)
        };
        let commit: CommitResponse = self
            .expect_json(
                self.request(
                    Method::POST,
                    &format!("/repos/{}/{}/git/commits", repo.owner, repo.name),
                    auth,
                )
                .json(&json!({
                    "message": message,
                    "tree": tree.sha,
                    "parents": [parent_sha],
                })),
                "create commit",
            )
            .await?;

        let _moved: RefResponse = self
            .expect_json(
                self.request(
                    Method::PATCH,
                    &format!(
                        "/repos/{}/{}/git/refs/heads/{}",
                        repo.owner, repo.name, intent.head_branch
                    ),
                    auth,
                )
                .json(&json!({ "sha": commit.sha, "force": true })),
                "update branch head",
            )
            .await?;

        debug!(
            "staged {} changes on '{}' in {repo}",
            intent.changes.len(),
            intent.head_branch
        );

        if let Some(existing) = self.find_open_pull(repo, &intent.head_branch, auth).await? {
            if mode == PullRequestMode::Accumulative {
                let _updated: PullResponse = self
                    .expect_json(
                        self.request(
                            Method::PATCH,
                            &format!(
                                "/repos/{}/{}/pulls/{}",
                                repo.owner, repo.name, existing.number
                            ),
                            auth,
                        )
                        .json(&json!({ "title": intent.title, "body": intent.body })),
                        "update pull request",
                    )
                    .await?;
            }
            return Ok(existing);
        }

        let pull: PullResponse = self
            .expect_json(
                self.request(
                    Method::POST,
                    &format!("/repos/{}/{}/pulls", repo.owner, repo.name),
                    auth,
                )
                .json(&json!({
                    "title": intent.title,
                    "body": intent.body,
                    "head": intent.head_branch,
                    "base": intent.base_branch,
                })),
                "create pull request",
            )
            .await?;
        Ok(pull.into_handle())
    }
}

fn status_error(status: StatusCode, context: &str, message: String) -> GitError {
    let context = context.to_string();
    match status.as_u16() {
        401 => GitError::Auth,
        403 => GitError::PermissionDenied { context },
        404 => GitError::NotFound { context },
        429 => GitError::RateLimited { context },
        s if s >= 500 => GitError::Transient { context, message },
        s => GitError::Api {
            status: s,
            context,
            message,
        },
    }
}

/// GitHub serves blob content as base64 with embedded newlines.
fn decode_content(encoded: &str) -> Result<String, String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

#[derive(Deserialize)]
struct ContentsResponse {
    sha: String,
    content: Option<String>,
}

#[derive(Deserialize)]
struct RepositoryResponse {
    full_name: String,
    default_branch: String,
    private: bool,
}

impl From<RepositoryResponse> for RemoteRepository {
    fn from(r: RepositoryResponse) -> Self {
        Self {
            full_name: r.full_name,
            default_branch: r.default_branch,
            private: r.private,
        }
    }
}

#[derive(Deserialize)]
struct RefResponse {
    object: RefObject,
}

#[derive(Deserialize)]
struct RefObject {
    sha: String,
}

#[derive(Deserialize)]
struct CommitResponse {
    sha: String,
    tree: TreeRef,
}

#[derive(Deserialize)]
struct TreeRef {
    sha: String,
}

#[derive(Deserialize)]
struct TreeResponse {
    sha: String,
}

#[derive(Deserialize)]
struct PullResponse {
    number: u64,
    html_url: String,
}

impl PullResponse {
    fn into_handle(self) -> PullRequestHandle {
        PullRequestHandle {
            number: self.number,
            url: self.html_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_with_embedded_newlines() {
        // "hello world" split across lines, as the contents API returns it.
        let encoded = "aGVsbG8g\nd29ybGQ=\n";
        assert_eq!(decode_content(encoded).unwrap(), "hello world");
    }

    #[test]
    fn maps_provider_statuses_onto_the_taxonomy() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "x", String::new()),
            GitError::Auth
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "x", String::new()),
            GitError::NotFound { .. }
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "x", String::new()),
            GitError::Transient { .. }
        ));
        assert!(matches!(
            status_error(StatusCode::UNPROCESSABLE_ENTITY, "x", String::new()),
            GitError::Api { status: 422, .. }
        ));
    }
}
