//! Run configuration
//!
//! Everything here is resolved by the binary before the browser is touched.
//! The traversal engine only ever sees [`TraversalOptions`] and a
//! [`TreeLayout`](crate::layout::TreeLayout).

use crate::error::{Result, ScrapeError};
use std::path::PathBuf;
use std::time::Duration;

/// Default page-action timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 180_000;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "errors.json";

/// Output destination value that selects standard output.
pub const STDOUT_SENTINEL: &str = "-";

/// Login credentials for the target application
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where the finished report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Parse an `--output` value, treating `-` as standard output.
    pub fn parse(value: &str) -> Self {
        if value == STDOUT_SENTINEL {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(value))
        }
    }

    /// Refuse to clobber an existing file unless `force` is set.
    pub fn ensure_writable(&self, force: bool) -> Result<()> {
        match self {
            OutputTarget::File(path) if !force && path.exists() => {
                Err(ScrapeError::OutputExists(path.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl Default for OutputTarget {
    fn default() -> Self {
        OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT))
    }
}

/// Fully resolved run configuration
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub credentials: Credentials,
    pub headless: bool,
    pub ignore_ssl: bool,
    pub timeout: Duration,
    pub force: bool,
    pub output: OutputTarget,
    pub verbose: bool,
}

impl ScrapeConfig {
    /// Pacing for the traversal engine derived from this configuration.
    pub fn traversal_options(&self) -> TraversalOptions {
        TraversalOptions {
            timeout: self.timeout,
            ..TraversalOptions::default()
        }
    }
}

/// Waits and bounds applied around every page interaction
#[derive(Debug, Clone, Copy)]
pub struct TraversalOptions {
    /// Fixed delay before waiting for the network to go idle
    pub settle_delay: Duration,

    /// How long the network must stay quiet to count as idle
    pub network_idle: Duration,

    /// Upper bound for any single awaited page operation
    pub timeout: Duration,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(1000),
            network_idle: Duration::from_millis(500),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_parse() {
        assert_eq!(OutputTarget::parse("-"), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::parse("out.json"),
            OutputTarget::File(PathBuf::from("out.json"))
        );
        assert_eq!(
            OutputTarget::default(),
            OutputTarget::File(PathBuf::from("errors.json"))
        );
    }

    #[test]
    fn test_existing_output_requires_force() {
        let path = std::env::temp_dir().join(format!(
            "ges-existing-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "[]").unwrap();
        let target = OutputTarget::File(path.clone());

        assert!(matches!(
            target.ensure_writable(false),
            Err(ScrapeError::OutputExists(_))
        ));
        assert!(target.ensure_writable(true).is_ok());
        assert!(OutputTarget::Stdout.ensure_writable(false).is_ok());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            username: "operator".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("operator"));
        assert!(!rendered.contains("hunter2"));
    }
}
