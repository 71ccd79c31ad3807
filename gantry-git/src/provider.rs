//! The git provider capability interface.

use async_trait::async_trait;

use crate::{
    AuthContext, Branch, GitError, PullRequestHandle, PullRequestIntent, PullRequestMode,
    RemoteFile, RemoteRepository, RepoRef,
};

/// Capability boundary over a source-control provider.
///
/// The delivery pipeline consumes exactly this surface; concrete adapters
/// (e.g. [`GithubProvider`](crate::GithubProvider)) are selected at process
/// wiring time. Every operation may be slow and may fail; implementations
/// classify failures via [`GitError::is_transient`].
#[async_trait]
pub trait GitProvider: Send + Sync {
    /// Fetch a file's content at a branch. `Ok(None)` means the file does
    /// not exist there, which is an answer, not an error.
    async fn get_file(
        &self,
        repo: &RepoRef,
        path: &str,
        branch: &str,
        auth: &AuthContext,
    ) -> Result<Option<RemoteFile>, GitError>;

    async fn get_repository(
        &self,
        repo: &RepoRef,
        auth: &AuthContext,
    ) -> Result<RemoteRepository, GitError>;

    async fn repo_exists(&self, repo: &RepoRef, auth: &AuthContext) -> Result<bool, GitError>;

    async fn create_repository(
        &self,
        repo: &RepoRef,
        private: bool,
        auth: &AuthContext,
    ) -> Result<RemoteRepository, GitError>;

    /// Resolve a branch head, or `Ok(None)` when the branch does not exist.
    async fn get_branch(
        &self,
        repo: &RepoRef,
        branch: &str,
        auth: &AuthContext,
    ) -> Result<Option<Branch>, GitError>;

    async fn create_branch(
        &self,
        repo: &RepoRef,
        branch: &str,
        from_sha: &str,
        auth: &AuthContext,
    ) -> Result<Branch, GitError>;

    /// Publish the intent's entire change list as one pull request.
    ///
    /// The batch is atomic from the caller's perspective: implementations
    /// that cannot commit multiple files atomically must stage the whole
    /// change list into a single commit object before moving any ref.
    async fn open_pull_request(
        &self,
        repo: &RepoRef,
        intent: &PullRequestIntent,
        mode: PullRequestMode,
        auth: &AuthContext,
    ) -> Result<PullRequestHandle, GitError>;
}
