use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Navigation frame not found. Possibly invalid credentials.")]
    AuthenticationFailed,

    #[error("Tree node {0} is no longer attached to the document")]
    StaleNode(u64),

    #[error("Tree node {0} cannot be clicked")]
    NodeNotInteractable(u64),

    #[error("Diagnostic accessor is not available on the page")]
    DiagnosticsUnavailable,

    #[error("Timed out after {timeout_ms} ms while {operation}")]
    Timeout {
        operation: &'static str,
        timeout_ms: u128,
    },

    #[error("Output file '{}' already exists. Use --force or -f to overwrite.", .0.display())]
    OutputExists(PathBuf),

    #[error("CDP error: {0}")]
    CdpError(#[from] chromiumoxide::error::CdpError),

    #[error("Malformed page result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl ScrapeError {
    /// Process exit status for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScrapeError::OutputExists(_) => 2,
            ScrapeError::AuthenticationFailed => 3,
            _ => 1,
        }
    }

    /// Whether a failure to select a tree node only costs that node.
    ///
    /// Timeouts are session-level and abort the run like any other await point.
    pub fn is_skippable_selection(&self) -> bool {
        !matches!(self, ScrapeError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_distinguish_failures() {
        assert_eq!(ScrapeError::OutputExists(PathBuf::from("errors.json")).exit_code(), 2);
        assert_eq!(ScrapeError::AuthenticationFailed.exit_code(), 3);
        assert_eq!(ScrapeError::Other("boom".to_string()).exit_code(), 1);
        assert_eq!(
            ScrapeError::Timeout {
                operation: "waiting for network idle",
                timeout_ms: 10,
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_selection_timeouts_are_not_skipped() {
        assert!(ScrapeError::StaleNode(4).is_skippable_selection());
        assert!(ScrapeError::NodeNotInteractable(4).is_skippable_selection());
        assert!(!ScrapeError::Timeout {
            operation: "selecting tree node",
            timeout_ms: 10,
        }
        .is_skippable_selection());
    }

    #[test]
    fn test_output_exists_message() {
        let err = ScrapeError::OutputExists(PathBuf::from("errors.json"));
        assert_eq!(
            err.to_string(),
            "Output file 'errors.json' already exists. Use --force or -f to overwrite."
        );
    }
}
