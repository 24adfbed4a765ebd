//! Report Assembler and output
//!
//! Entries keep visitation order. Nothing is sorted, merged or deduplicated:
//! two nodes with the same label chain produce two entries.

use crate::config::OutputTarget;
use crate::error::Result;
use crate::extract::NodeDiagnostics;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;

/// One tree node that showed error state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    /// Root-first, `" / "`-joined labels
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_errors: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_errors: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_messages: Option<Vec<Value>>,
}

impl ErrorReport {
    pub fn new(path: String, diagnostics: NodeDiagnostics) -> Self {
        Self {
            path,
            main_errors: diagnostics.main_errors,
            action_errors: diagnostics.action_errors,
            info_messages: diagnostics.info_messages,
        }
    }
}

/// Top-level output: entries in traversal order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    pub entries: Vec<ErrorReport>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON array with 2-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to standard output (newline-terminated) or to a file (verbatim).
    ///
    /// Does not check for an existing file; call
    /// [`OutputTarget::ensure_writable`] first.
    pub fn write_to(&self, target: &OutputTarget) -> Result<()> {
        let json = self.to_json_pretty()?;
        match target {
            OutputTarget::Stdout => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", json)?;
                stdout.flush()?;
            }
            OutputTarget::File(path) => std::fs::write(path, json)?,
        }
        Ok(())
    }
}

/// Accumulates entries while the tree is walked
#[derive(Debug, Default)]
pub struct ReportAssembler {
    entries: Vec<ErrorReport>,
}

impl ReportAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ErrorReport) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self) -> Report {
        Report {
            entries: self.entries,
        }
    }

    /// Collect an entire sequence of entries at once.
    pub fn assemble(entries: impl IntoIterator<Item = ErrorReport>) -> Report {
        let mut assembler = Self::new();
        for entry in entries {
            assembler.push(entry);
        }
        assembler.finish()
    }
}
