//! Background check for a newer published release
//!
//! The check runs as a detached task with a short timeout. Its outcome only
//! matters when strict checking (`ensureLatestVersion`) is on; then dispatch
//! waits for it and an outdated binary aborts the run. Network and parse
//! failures are logged at debug level and otherwise ignored.

use async_trait::async_trait;
use semver::Version;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::notify::Notifier;
use crate::{Error, Result};

/// Default source of the latest published version.
pub const DEFAULT_REGISTRY_URL: &str = "https://crates.io/api/v1/crates/bosun";

/// How long the check may take before it is abandoned.
pub const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(1);

/// Why a version check produced no result.
#[derive(Debug, thiserror::Error)]
pub enum VersionCheckError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid version: {0}")]
    Semver(#[from] semver::Error),

    #[error("registry response has no version")]
    MissingVersion,

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Where the latest published version comes from.
#[async_trait]
pub trait LatestVersionSource: Send + Sync {
    async fn latest_version(&self) -> std::result::Result<String, VersionCheckError>;
}

#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    max_stable_version: Option<String>,
    newest_version: Option<String>,
}

/// Reads the latest version from a crates.io compatible API.
#[derive(Debug, Clone)]
pub struct RegistryVersionSource {
    url: String,
    http: reqwest::Client,
}

impl RegistryVersionSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LatestVersionSource for RegistryVersionSource {
    async fn latest_version(&self) -> std::result::Result<String, VersionCheckError> {
        tracing::debug!(url = %self.url, "Checking latest version");
        let response: CrateResponse = self
            .http
            .get(&self.url)
            .header(
                reqwest::header::USER_AGENT,
                concat!("bosun/", env!("CARGO_PKG_VERSION")),
            )
            .timeout(VERSION_CHECK_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .krate
            .max_stable_version
            .or(response.krate.newest_version)
            .ok_or(VersionCheckError::MissingVersion)
    }
}

/// Result of comparing the running version with the latest release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStatus {
    pub current: Version,
    pub latest: Version,
    pub is_outdated: bool,
}

/// Compare `current` with what `source` reports.
pub async fn check_latest_version(
    current: &str,
    source: &dyn LatestVersionSource,
) -> std::result::Result<VersionStatus, VersionCheckError> {
    let current = Version::parse(current)?;
    let latest = Version::parse(source.latest_version().await?.trim())?;
    Ok(VersionStatus {
        is_outdated: current < latest,
        current,
        latest,
    })
}

/// Handle to a running background version check.
#[derive(Debug)]
pub struct VersionCheck {
    handle: JoinHandle<Option<VersionStatus>>,
}

/// Start the version check in the background.
///
/// An outdated binary is reported through `notifier` as soon as the check
/// completes, whether or not anybody waits for it.
pub fn spawn_version_check(
    current: impl Into<String>,
    source: Arc<dyn LatestVersionSource>,
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
) -> VersionCheck {
    let current = current.into();
    let handle = tokio::spawn(async move {
        let outcome = tokio::time::timeout(timeout, check_latest_version(&current, source.as_ref()))
            .await
            .unwrap_or(Err(VersionCheckError::Timeout(timeout)));

        match outcome {
            Ok(status) => {
                if status.is_outdated {
                    notifier.error(&format!(
                        "There is a newer version (Local: {} < Remote: {}) of bosun available, you should upgrade!",
                        status.current, status.latest
                    ));
                }
                Some(status)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Version check failed");
                None
            }
        }
    });
    VersionCheck { handle }
}

impl VersionCheck {
    /// Wait for the check. Failures of any kind yield `None`.
    pub async fn join(self) -> Option<VersionStatus> {
        self.handle.await.ok().flatten()
    }

    /// Gate dispatch on the check when `strict` is set.
    ///
    /// Without `strict` this returns immediately and the check keeps running
    /// detached. With it, an outdated binary fails the run.
    pub async fn enforce(self, strict: bool, notifier: &dyn Notifier) -> Result<()> {
        if !strict {
            return Ok(());
        }
        match self.join().await {
            Some(status) if status.is_outdated => {
                notifier.error(
                    "bosun is not up to date - exiting. Please upgrade bosun or disable the 'ensureLatestVersion' option to continue.",
                );
                Err(Error::OutdatedVersion {
                    current: status.current.to_string(),
                    latest: status.latest.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;

    struct FixedSource(&'static str);

    #[async_trait]
    impl LatestVersionSource for FixedSource {
        async fn latest_version(&self) -> std::result::Result<String, VersionCheckError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl LatestVersionSource for FailingSource {
        async fn latest_version(&self) -> std::result::Result<String, VersionCheckError> {
            Err(VersionCheckError::MissingVersion)
        }
    }

    struct SlowSource;

    #[async_trait]
    impl LatestVersionSource for SlowSource {
        async fn latest_version(&self) -> std::result::Result<String, VersionCheckError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("9.9.9".to_string())
        }
    }

    #[tokio::test]
    async fn detects_outdated_version() {
        let status = check_latest_version("0.1.0", &FixedSource("0.2.0")).await.unwrap();
        assert!(status.is_outdated);

        let status = check_latest_version("0.2.0", &FixedSource("0.2.0")).await.unwrap();
        assert!(!status.is_outdated);
    }

    #[tokio::test]
    async fn strict_check_fails_outdated_run() {
        let notifier = Arc::new(MemoryNotifier::new());
        let check = spawn_version_check(
            "0.1.0",
            Arc::new(FixedSource("1.0.0")),
            notifier.clone(),
            VERSION_CHECK_TIMEOUT,
        );

        let err = check.enforce(true, notifier.as_ref()).await.unwrap_err();

        assert!(matches!(err, Error::OutdatedVersion { .. }));
        assert_eq!(notifier.errors().len(), 2);
    }

    #[tokio::test]
    async fn failures_are_swallowed_even_when_strict() {
        let notifier = Arc::new(MemoryNotifier::new());
        let check = spawn_version_check(
            "0.1.0",
            Arc::new(FailingSource),
            notifier.clone(),
            VERSION_CHECK_TIMEOUT,
        );

        check.enforce(true, notifier.as_ref()).await.unwrap();
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn slow_registry_times_out() {
        let notifier = Arc::new(MemoryNotifier::new());
        let check = spawn_version_check(
            "0.1.0",
            Arc::new(SlowSource),
            notifier.clone(),
            Duration::from_millis(20),
        );

        assert_eq!(check.join().await, None);
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn non_strict_does_not_wait() {
        let notifier = Arc::new(MemoryNotifier::new());
        let check = spawn_version_check(
            "0.1.0",
            Arc::new(SlowSource),
            notifier.clone(),
            Duration::from_secs(30),
        );

        tokio::time::timeout(Duration::from_millis(200), check.enforce(false, notifier.as_ref()))
            .await
            .unwrap()
            .unwrap();
    }
}
