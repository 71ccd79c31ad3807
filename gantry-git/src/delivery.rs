//! The delivery pipeline.
//!
//! Reconciles a generated module set against the current state of a remote
//! repository and publishes the result as one pull request: override-class
//! modules with a live remote counterpart are skipped to preserve hand
//! edits, base modules are always included, and the whole change list is
//! submitted as a single atomic batch.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use gantry_codegen::{to_kebab_case, Module, ModuleSet, Provenance};

use crate::{
    with_backoff, AuthContext, DeliveryError, FileChange, GitError, GitProvider,
    PullRequestHandle, PullRequestIntent, PullRequestMode, RepoRef, RetryConfig,
};

/// Tunables for delivery runs.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub retry: RetryConfig,
    /// Per-call timeout; an elapsed call counts as a transient failure.
    pub call_timeout: Duration,
    /// Opt-in: treat an override-presence check that exhausted its retry
    /// budget as "file absent" instead of aborting the delivery.
    pub assume_missing_on_fetch_error: bool,
    pub mode: PullRequestMode,
    /// Base branch override; the repository default branch when `None`.
    pub base_branch: Option<String>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            call_timeout: Duration::from_secs(30),
            assume_missing_on_fetch_error: false,
            mode: PullRequestMode::default(),
            base_branch: None,
        }
    }
}

/// Create a cancellation pair. Flip the handle to stop an in-flight
/// delivery at its next stage boundary.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// Caller-side handle that cancels a delivery.
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Pipeline-side cancellation token, checked between stages. Once the
/// intent has been submitted, cancellation has no effect: the outcome is
/// surfaced so no remote mutation goes untracked.
#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that never fires.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}

/// What a delivery produced.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered(PullRequestHandle),
    /// The computed change list was empty; zero write calls were issued.
    NoChanges,
}

/// Publishes module sets to a repository through a [`GitProvider`].
pub struct DeliveryPipeline<P> {
    provider: Arc<P>,
    config: DeliveryConfig,
    /// One logical delivery slot per repository: concurrent deliveries for
    /// the same repo must not race branch creation.
    slots: Mutex<HashMap<RepoRef, Arc<tokio::sync::Mutex<()>>>>,
}

impl<P: GitProvider> DeliveryPipeline<P> {
    pub fn new(provider: P, config: DeliveryConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Access the wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn deliver(
        &self,
        set: &ModuleSet,
        repo: &RepoRef,
        auth: &AuthContext,
    ) -> Result<DeliveryOutcome, DeliveryError> {
        self.deliver_with_cancel(set, repo, auth, CancelToken::never())
            .await
    }

    pub async fn deliver_with_cancel(
        &self,
        set: &ModuleSet,
        repo: &RepoRef,
        auth: &AuthContext,
        cancel: CancelToken,
    ) -> Result<DeliveryOutcome, DeliveryError> {
        let slot = {
            let mut slots = self.slots.lock();
            slots
                .entry(repo.clone())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        let _guard = slot.lock().await;

        if cancel.is_cancelled() {
            return Err(DeliveryError::Cancelled);
        }

        let base_branch = match &self.config.base_branch {
            Some(branch) => branch.clone(),
            None => {
                self.call("get repository", || self.provider.get_repository(repo, auth))
                    .await?
                    .default_branch
            }
        };

        let skipped = self
            .check_overrides(set, repo, &base_branch, auth)
            .await?;

        if cancel.is_cancelled() {
            return Err(DeliveryError::Cancelled);
        }

        let changes = final_changes(set, &skipped);
        if changes.is_empty() {
            info!("change list for {repo} is empty; no pull request needed");
            return Ok(DeliveryOutcome::NoChanges);
        }

        let intent = self.build_intent(set, base_branch, changes);

        // Last cancellation point; past here the outcome is always
        // surfaced, success or failure.
        if cancel.is_cancelled() {
            return Err(DeliveryError::Cancelled);
        }

        let handle = self
            .call("open pull request", || {
                self.provider
                    .open_pull_request(repo, &intent, self.config.mode, auth)
            })
            .await?;

        info!(
            "delivered {} changes to {repo} as {}",
            intent.changes.len(),
            handle.url
        );
        Ok(DeliveryOutcome::Delivered(handle))
    }

    /// Query the provider for each override module's remote counterpart.
    /// The lookups are independent reads and run concurrently.
    async fn check_overrides(
        &self,
        set: &ModuleSet,
        repo: &RepoRef,
        base_branch: &str,
        auth: &AuthContext,
    ) -> Result<HashSet<String>, DeliveryError> {
        let overrides: Vec<&Module> = set
            .iter()
            .filter(|m| m.is_override() && m.content.is_some())
            .collect();

        let lookups = overrides.iter().map(|module| async move {
            let context = format!("check override '{}'", module.path);
            let result = self
                .call(&context, || {
                    self.provider.get_file(repo, &module.path, base_branch, auth)
                })
                .await;
            (module.path.clone(), result)
        });

        let mut skipped = HashSet::new();
        for (path, result) in join_all(lookups).await {
            match result {
                Ok(Some(_)) => {
                    debug!("override '{path}' already present; preserving remote copy");
                    skipped.insert(path);
                }
                Ok(None) => {}
                Err(DeliveryError::RetriesExhausted { source, .. })
                    if self.config.assume_missing_on_fetch_error =>
                {
                    warn!(
                        "override check for '{path}' kept failing ({source}); \
                         treating as absent by configuration"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Ok(skipped)
    }

    fn build_intent(
        &self,
        set: &ModuleSet,
        base_branch: String,
        changes: Vec<FileChange>,
    ) -> PullRequestIntent {
        let app = to_kebab_case(&set.app_name);
        let head_branch = match self.config.mode {
            PullRequestMode::Basic => format!("gantry/{app}-{}", set.fingerprint.short()),
            PullRequestMode::Accumulative => format!("gantry/{app}"),
        };

        PullRequestIntent {
            head_branch,
            base_branch,
            title: format!("Regenerate {} server", set.app_name),
            body: format!(
                "Generated {} modules from schema {}.",
                changes.len(),
                set.fingerprint.short()
            ),
            changes,
        }
    }

    /// Wrap a provider call with the per-call timeout and retry policy.
    async fn call<T, F, Fut>(&self, context: &str, mut op: F) -> Result<T, DeliveryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GitError>>,
    {
        let timeout = self.config.call_timeout;
        with_backoff(&self.config.retry, context, move || {
            let fut = op();
            let context = context.to_string();
            async move {
                match tokio::time::timeout(timeout, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(GitError::Timeout { context }),
                }
            }
        })
        .await
    }
}

/// Assemble the final change list: base modules always, override modules
/// when not skipped, content-less base modules as removals. A skipped
/// override is dropped entirely, never turned into a deletion.
fn final_changes(set: &ModuleSet, skipped: &HashSet<String>) -> Vec<FileChange> {
    let mut changes = Vec::new();
    for module in set.iter() {
        match (&module.content, module.provenance) {
            (Some(content), Provenance::Base) => changes.push(FileChange {
                path: module.path.clone(),
                content: Some(content.clone()),
            }),
            (Some(content), Provenance::Override) => {
                if !skipped.contains(&module.path) {
                    changes.push(FileChange {
                        path: module.path.clone(),
                        content: Some(content.clone()),
                    });
                }
            }
            (None, Provenance::Base) => changes.push(FileChange {
                path: module.path.clone(),
                content: None,
            }),
            (None, Provenance::Override) => {}
        }
    }
    changes
}
