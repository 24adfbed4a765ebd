//! Path Reconstructor
//!
//! The rendered tree has no parent pointers. A node's parent is found by
//! climbing a fixed number of containers (see
//! [`TreeLayout::ancestor_depth`](crate::layout::TreeLayout::ancestor_depth)),
//! which the surface hides behind `structural_parent`.

use crate::error::Result;
use crate::pacing::Pacing;
use crate::surface::{AutomationSurface, NodeHandle};
use std::collections::HashSet;

/// Separator between labels in a reconstructed path.
pub const PATH_SEPARATOR: &str = " / ";

/// Build the root-first `" / "`-joined label chain for `node`.
///
/// The walk stops at the first node without a label, or when the structural
/// ancestor is a node already read (the root resolves to itself). A node
/// with no label at all yields an empty path.
pub async fn reconstruct_path<S>(surface: &S, pacing: &Pacing, node: NodeHandle) -> Result<String>
where
    S: AutomationSurface + ?Sized,
{
    let mut labels: Vec<String> = Vec::new();
    let mut visited = HashSet::new();
    let mut current = node;

    loop {
        let label = pacing
            .bounded("reading node label", surface.label(current))
            .await?;
        let Some(label) = label.filter(|l| !l.is_empty()) else {
            break;
        };
        labels.push(label);
        visited.insert(current);

        match pacing
            .bounded("locating parent node", surface.structural_parent(current))
            .await?
        {
            Some(parent) if !visited.contains(&parent) => current = parent,
            _ => break,
        }
    }

    labels.reverse();
    Ok(labels.join(PATH_SEPARATOR))
}
