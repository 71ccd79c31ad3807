//! gantry.toml delivery settings.
//!
//! The schema document says *what* to generate; gantry.toml says *where*
//! and *how* to deliver it: repository coordinates, pull-request mode,
//! retry policy, and the token source.

use std::path::{Path, PathBuf};
use std::time::Duration;

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

use gantry_git::{AuthContext, DeliveryConfig, PullRequestMode, RepoRef, RetryConfig};

/// Result type for settings loading (boxed: the error carries source text).
pub type Result<T> = std::result::Result<T, Box<ConfigError>>;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a gantry.toml with a [repository] section"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse gantry.toml")]
    #[diagnostic(code(gantry::config::parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(gantry::config::invalid))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        message: String,
    },

    #[error("environment variable '{var}' is not set")]
    #[diagnostic(
        code(gantry::config::missing_token),
        help("export the provider token, e.g. `export {var}=ghp_...`")
    )]
    MissingToken { var: String },
}

/// Root of gantry.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub delivery: DeliverySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositorySettings {
    pub owner: String,
    pub name: String,
    /// Base branch; the repository default when absent.
    #[serde(default)]
    pub base_branch: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeliverySettings {
    pub mode: ModeSetting,
    /// Environment variable holding the provider token.
    pub token_env: String,
    /// Opt-in: scaffold overrides even when their presence check failed.
    pub assume_missing_on_fetch_error: bool,
    pub call_timeout_secs: u64,
    pub retry: RetrySettings,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            mode: ModeSetting::Basic,
            token_env: "GANTRY_GITHUB_TOKEN".to_string(),
            assume_missing_on_fetch_error: false,
            call_timeout_secs: 30,
            retry: RetrySettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    Basic,
    Accumulative,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 10_000,
            multiplier: 2.0,
        }
    }
}

impl Settings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            Box::new(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(content: &str, filename: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content).map_err(|source| {
            let span = source.span().map(SourceSpan::from);
            Box::new(ConfigError::Parse {
                src: NamedSource::new(filename, content.to_string()),
                span,
                source,
            })
        })?;

        if settings.repository.owner.is_empty() || settings.repository.name.is_empty() {
            return Err(Box::new(ConfigError::Validation {
                src: NamedSource::new(filename, content.to_string()),
                message: "repository.owner and repository.name must be non-empty".to_string(),
            }));
        }

        Ok(settings)
    }

    pub fn repo_ref(&self) -> RepoRef {
        RepoRef::new(&self.repository.owner, &self.repository.name)
    }

    /// Read the provider token from the configured environment variable.
    pub fn auth_from_env(&self) -> Result<AuthContext> {
        match std::env::var(&self.delivery.token_env) {
            Ok(token) if !token.is_empty() => Ok(AuthContext::new(token)),
            _ => Err(Box::new(ConfigError::MissingToken {
                var: self.delivery.token_env.clone(),
            })),
        }
    }

    pub fn delivery_config(&self) -> DeliveryConfig {
        let retry = &self.delivery.retry;
        DeliveryConfig {
            retry: RetryConfig {
                max_retries: retry.max_retries,
                initial_backoff: Duration::from_millis(retry.initial_backoff_ms),
                max_backoff: Duration::from_millis(retry.max_backoff_ms),
                multiplier: retry.multiplier,
            },
            call_timeout: Duration::from_secs(self.delivery.call_timeout_secs),
            assume_missing_on_fetch_error: self.delivery.assume_missing_on_fetch_error,
            mode: match self.delivery.mode {
                ModeSetting::Basic => PullRequestMode::Basic,
                ModeSetting::Accumulative => PullRequestMode::Accumulative,
            },
            base_branch: self.repository.base_branch.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_config() {
        let settings = Settings::parse(
            r#"
            [repository]
            owner = "acme"
            name = "crm-server"
            "#,
            "gantry.toml",
        )
        .unwrap();

        assert_eq!(settings.repo_ref().full_name(), "acme/crm-server");
        assert!(matches!(settings.delivery.mode, ModeSetting::Basic));
        assert_eq!(settings.delivery.retry.max_retries, 3);
    }

    #[test]
    fn parse_errors_carry_a_span() {
        let err = Settings::parse("[repository\nowner = 1", "gantry.toml").unwrap_err();
        match *err {
            ConfigError::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_empty_repository_coordinates() {
        let err = Settings::parse(
            r#"
            [repository]
            owner = ""
            name = "crm-server"
            "#,
            "gantry.toml",
        )
        .unwrap_err();
        assert!(matches!(*err, ConfigError::Validation { .. }));
    }

    #[test]
    fn full_config_round_trips_into_delivery_config() {
        let settings = Settings::parse(
            r#"
            [repository]
            owner = "acme"
            name = "crm-server"
            base_branch = "trunk"

            [delivery]
            mode = "accumulative"
            token_env = "MY_TOKEN"
            assume_missing_on_fetch_error = true
            call_timeout_secs = 5

            [delivery.retry]
            max_retries = 5
            initial_backoff_ms = 50
            max_backoff_ms = 2000
            multiplier = 1.5
            "#,
            "gantry.toml",
        )
        .unwrap();

        let config = settings.delivery_config();
        assert_eq!(config.mode, PullRequestMode::Accumulative);
        assert!(config.assume_missing_on_fetch_error);
        assert_eq!(config.base_branch.as_deref(), Some("trunk"));
        assert_eq!(config.retry.max_retries, 5);
        assert_eq!(config.call_timeout, Duration::from_secs(5));
    }
}
