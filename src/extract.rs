//! Error Extractor & Sanitizer
//!
//! Selects a node, decides whether the application is showing error state
//! for it and, if so, pulls and scrubs the three record categories.

use crate::error::Result;
use crate::pacing::Pacing;
use crate::surface::{AutomationSurface, NodeHandle, RawDiagnostics};
use serde_json::Value;

/// Record field that varies between runs and is scrubbed before output.
pub const VOLATILE_FIELD: &str = "url";

/// Non-empty, sanitized record categories of one node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDiagnostics {
    pub main_errors: Option<Vec<Value>>,
    pub action_errors: Option<Vec<Value>>,
    pub info_messages: Option<Vec<Value>>,
}

impl NodeDiagnostics {
    /// Sanitize every category and drop the empty ones.
    pub fn from_raw(raw: RawDiagnostics) -> Self {
        Self {
            main_errors: non_empty(sanitize_records(raw.main_errors)),
            action_errors: non_empty(sanitize_records(raw.action_errors)),
            info_messages: non_empty(sanitize_records(raw.info_messages)),
        }
    }
}

fn non_empty(records: Vec<Value>) -> Option<Vec<Value>> {
    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}

/// Blank the volatile field of one record.
///
/// Only objects that carry the key at all are touched, whatever its value;
/// the key is dropped, which is how an undefined member serializes. Anything
/// else passes through unchanged.
pub fn sanitize_record(record: Value) -> Value {
    match record {
        Value::Object(mut fields) if fields.contains_key(VOLATILE_FIELD) => {
            fields.shift_remove(VOLATILE_FIELD);
            Value::Object(fields)
        }
        other => other,
    }
}

pub fn sanitize_records(records: Vec<Value>) -> Vec<Value> {
    records.into_iter().map(sanitize_record).collect()
}

/// Outcome of visiting one tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The node could not be selected and was skipped
    Skipped,

    /// The node was selected but shows no error state
    Clean,

    /// The node shows error state
    Reported(NodeDiagnostics),
}

pub struct ErrorExtractor<'a, S: AutomationSurface + ?Sized> {
    surface: &'a S,
    pacing: &'a Pacing,
}

impl<'a, S: AutomationSurface + ?Sized> ErrorExtractor<'a, S> {
    pub fn new(surface: &'a S, pacing: &'a Pacing) -> Self {
        Self { surface, pacing }
    }

    /// Select `node`, wait for the detail panel and collect its diagnostics.
    pub async fn extract(&self, node: NodeHandle) -> Result<Extraction> {
        let selected = self
            .pacing
            .bounded("selecting tree node", self.surface.select(node))
            .await;
        if let Err(e) = selected {
            if e.is_skippable_selection() {
                log::debug!("Skipping node {}: {}", node, e);
                return Ok(Extraction::Skipped);
            }
            return Err(e);
        }

        self.pacing.settle(self.surface).await?;

        let panel = self
            .pacing
            .bounded("inspecting detail panel", self.surface.detail_panel())
            .await?;
        if !panel.has_error_state() {
            return Ok(Extraction::Clean);
        }

        let raw = self
            .pacing
            .bounded("reading diagnostics", self.surface.diagnostics())
            .await?;
        Ok(Extraction::Reported(NodeDiagnostics::from_raw(raw)))
    }
}
