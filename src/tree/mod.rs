//! Area tree traversal
//!
//! Expansion to a fixpoint, enumeration of content nodes and recovery of a
//! node's hierarchical label, all expressed against [`AutomationSurface`].

pub mod expander;
pub mod path;

pub use expander::{ExpansionSummary, TreeExpander};
pub use path::{reconstruct_path, PATH_SEPARATOR};

use crate::error::Result;
use crate::pacing::Pacing;
use crate::surface::{AutomationSurface, NodeHandle};

/// Every content node of the (already expanded) tree in document order.
///
/// Branches and leaves are listed alike; by now every branch worth opening
/// has been opened.
pub async fn list_leaf_nodes<S>(surface: &S, pacing: &Pacing) -> Result<Vec<NodeHandle>>
where
    S: AutomationSurface + ?Sized,
{
    let nodes = pacing
        .bounded("listing tree nodes", surface.content_nodes())
        .await?;
    log::debug!("Found {} tree nodes", nodes.len());
    Ok(nodes)
}
