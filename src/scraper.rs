//! Traversal engine
//!
//! Expand, enumerate, then visit every node strictly one after another. The
//! detail panel is a single region reused for each selection, so a node is
//! fully processed before the next one is clicked.

use crate::config::TraversalOptions;
use crate::error::Result;
use crate::extract::{ErrorExtractor, Extraction};
use crate::layout::TreeLayout;
use crate::pacing::Pacing;
use crate::report::{ErrorReport, Report, ReportAssembler};
use crate::surface::AutomationSurface;
use crate::tree::{list_leaf_nodes, reconstruct_path, TreeExpander};

/// Counters for one traversal, for progress logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub expansion_passes: usize,
    pub nodes: usize,
    pub skipped: usize,
    pub reported: usize,
}

pub struct Scraper<'a, S: AutomationSurface + ?Sized> {
    surface: &'a S,
    layout: TreeLayout,
    pacing: Pacing,
}

impl<'a, S: AutomationSurface + ?Sized> Scraper<'a, S> {
    pub fn new(surface: &'a S, layout: TreeLayout, options: TraversalOptions) -> Self {
        Self {
            surface,
            layout,
            pacing: Pacing::new(options),
        }
    }

    /// Walk the whole tree and return the report.
    pub async fn run(&self) -> Result<Report> {
        self.run_with_stats().await.map(|(report, _)| report)
    }

    pub async fn run_with_stats(&self) -> Result<(Report, TraversalStats)> {
        let mut stats = TraversalStats::default();

        log::info!("Expanding geographic tree nodes...");
        let expansion = TreeExpander::new(self.surface, &self.layout, &self.pacing)
            .expand_all()
            .await?;
        stats.expansion_passes = expansion.passes;
        log::debug!(
            "Tree expanded after {} passes ({} nodes opened)",
            expansion.passes,
            expansion.expanded
        );

        log::info!("Checking for errors...");
        let nodes = list_leaf_nodes(self.surface, &self.pacing).await?;
        stats.nodes = nodes.len();

        let extractor = ErrorExtractor::new(self.surface, &self.pacing);
        let mut assembler = ReportAssembler::new();
        for node in nodes {
            match extractor.extract(node).await? {
                Extraction::Skipped => stats.skipped += 1,
                Extraction::Clean => {}
                Extraction::Reported(diagnostics) => {
                    let path = reconstruct_path(self.surface, &self.pacing, node).await?;
                    log::debug!("Errors reported for '{}'", path);
                    assembler.push(ErrorReport::new(path, diagnostics));
                }
            }
        }
        stats.reported = assembler.len();

        Ok((assembler.finish(), stats))
    }
}
