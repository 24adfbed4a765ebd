//! Automation Surface
//!
//! The capabilities the traversal engine needs from a controlled page. The
//! Chrome implementation lives in [`crate::browser::surface`]; tests supply
//! an in-memory tree.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque reference to one element of the rendered tree.
///
/// Two handles compare equal exactly when they denote the same element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeHandle(pub u64);

impl std::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Expand/collapse toggle of a rendered tree node, as seen in one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwistyState {
    /// The toggle itself; expanding clicks this
    pub handle: NodeHandle,

    /// Image source of the toggle (collapsed/expanded/leaf)
    pub twisty_src: Option<String>,

    /// Image source of the node's kind icon
    pub kind_src: Option<String>,
}

/// What the detail panel shows for the current selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPanelState {
    /// A "View graphics" action control is present
    pub view_graphics: bool,

    /// The error-indication panel is present and not hidden
    pub error_indication_visible: bool,
}

impl DetailPanelState {
    /// Error state counts only when both signals are present.
    pub fn has_error_state(&self) -> bool {
        self.view_graphics && self.error_indication_visible
    }
}

/// The three record categories exactly as the application returns them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDiagnostics {
    pub main_errors: Vec<Value>,
    pub action_errors: Vec<Value>,
    pub info_messages: Vec<Value>,
}

/// A controlled page holding the area tree and its detail panel
#[async_trait]
pub trait AutomationSurface: Send + Sync {
    /// Resolve once the page has had no requests in flight for a while.
    async fn wait_for_network_idle(&self) -> Result<()>;

    /// Every expand/collapse toggle currently rendered in the tree.
    async fn scan_twisties(&self) -> Result<Vec<TwistyState>>;

    /// Trigger the expand action of a toggle found by [`scan_twisties`](Self::scan_twisties).
    async fn expand(&self, twisty: NodeHandle) -> Result<()>;

    /// Every content node of the area tree, in document order.
    async fn content_nodes(&self) -> Result<Vec<NodeHandle>>;

    /// Select a content node. Fails if the node went stale.
    async fn select(&self, node: NodeHandle) -> Result<()>;

    /// The node's own label text, if it has one.
    async fn label(&self, node: NodeHandle) -> Result<Option<String>>;

    /// The content node of the structural ancestor, which may be the node itself
    /// at the tree root.
    async fn structural_parent(&self, node: NodeHandle) -> Result<Option<NodeHandle>>;

    /// Detection signals for the current selection.
    async fn detail_panel(&self) -> Result<DetailPanelState>;

    /// Pull the current selection's records from the application.
    async fn diagnostics(&self) -> Result<RawDiagnostics>;
}
