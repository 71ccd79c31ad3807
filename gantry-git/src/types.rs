//! Value types crossing the provider boundary.

use std::fmt;

/// Repository coordinates under a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
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

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Installation/auth context for provider calls.
#[derive(Clone)]
pub struct AuthContext {
    token: String,
}

impl AuthContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

// The token never appears in logs or error output.
impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext").field("token", &"***").finish()
    }
}

/// A file fetched from the remote repository. Read-only: used for the
/// override-presence decision and drift detection, never mutated locally.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFile {
    pub path: String,
    pub content: String,
    /// Provider revision marker (blob sha for GitHub).
    pub sha: String,
}

/// Repository metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRepository {
    pub full_name: String,
    pub default_branch: String,
    pub private: bool,
}

/// A branch head.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub name: String,
    pub sha: String,
}

/// One file change in a pull request intent. `content: None` removes the
/// file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileChange {
    pub path: String,
    pub content: Option<String>,
}

/// How deliveries map onto pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullRequestMode {
    /// Every delivery gets a fresh head branch derived from the schema
    /// fingerprint; re-delivering identical content reuses the open PR.
    #[default]
    Basic,
    /// Deliveries accumulate on one standing branch, updating its open PR.
    Accumulative,
}

/// The atomic description of one reviewable change: branch, message, and
/// the complete file-change list, submitted as a single unit. A retry
/// constructs a fresh intent rather than mutating a failed one.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestIntent {
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
    pub body: String,
    pub changes: Vec<FileChange>,
}

/// Identifier of a published pull request.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestHandle {
    pub number: u64,
    pub url: String,
}
