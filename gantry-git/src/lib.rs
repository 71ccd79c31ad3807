//! Git delivery for gantry.
//!
//! Takes the module set produced by `gantry-codegen`, reconciles it against
//! the current state of a remote repository, and publishes the result as a
//! single pull request.
//!
//! # Architecture
//!
//! ```text
//! ModuleSet → DeliveryPipeline ⇄ GitProvider (capability interface)
//!                                  └─ GithubProvider (reqwest-backed)
//! ```
//!
//! The [`GitProvider`] trait is the only boundary to a source-control
//! provider; the pipeline never sees transport details. All provider calls
//! are async, bounded by a caller-supplied timeout, and classified into
//! transient failures (retried with exponential backoff) and fatal ones
//! (surfaced immediately).

mod delivery;
mod error;
mod github;
mod provider;
mod retry;
mod types;

pub use delivery::{
    cancel_pair, CancelHandle, CancelToken, DeliveryConfig, DeliveryOutcome, DeliveryPipeline,
};
pub use error::{DeliveryError, GitError};
pub use github::GithubProvider;
pub use provider::GitProvider;
pub use retry::{with_backoff, RetryConfig};
pub use types::{
    AuthContext, Branch, FileChange, PullRequestHandle, PullRequestIntent, PullRequestMode,
    RemoteFile, RemoteRepository, RepoRef,
};
