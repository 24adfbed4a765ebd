//! Fixpoint Tree Expander
//!
//! Opens collapsed area nodes pass after pass until a pass changes nothing.
//! Nodes of any other kind stay closed and are read as leaves. There is no
//! pass limit: a tree that keeps growing keeps the expander busy until the
//! page timeout fires somewhere.

use crate::error::{Result, ScrapeError};
use crate::layout::TreeLayout;
use crate::pacing::Pacing;
use crate::surface::AutomationSurface;

/// Outcome of [`TreeExpander::expand_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionSummary {
    /// Scans that expanded at least one node
    pub passes: usize,

    /// Scans performed, including the final one that found nothing
    pub scans: usize,

    /// Expand actions triggered in total
    pub expanded: usize,
}

pub struct TreeExpander<'a, S: AutomationSurface + ?Sized> {
    surface: &'a S,
    layout: &'a TreeLayout,
    pacing: &'a Pacing,
}

impl<'a, S: AutomationSurface + ?Sized> TreeExpander<'a, S> {
    pub fn new(surface: &'a S, layout: &'a TreeLayout, pacing: &'a Pacing) -> Self {
        Self {
            surface,
            layout,
            pacing,
        }
    }

    /// One scan over the rendered tree, expanding every collapsed area node.
    ///
    /// Returns how many expand actions were triggered; zero means fixpoint.
    pub async fn expand_pass(&self) -> Result<usize> {
        let twisties = self
            .pacing
            .bounded("scanning tree toggles", self.surface.scan_twisties())
            .await?;

        let mut expanded = 0;
        for twisty in twisties {
            if !self.layout.is_collapsed(twisty.twisty_src.as_deref())
                || !self.layout.is_area(twisty.kind_src.as_deref())
            {
                continue;
            }

            match self
                .pacing
                .bounded("expanding tree node", self.surface.expand(twisty.handle))
                .await
            {
                Ok(()) => expanded += 1,
                // Toggle re-rendered since the scan; the next pass sees the new one.
                Err(ScrapeError::StaleNode(_)) => {
                    log::debug!("Toggle {} vanished before expanding", twisty.handle);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(expanded)
    }

    /// Repeat [`expand_pass`](Self::expand_pass) until a pass expands nothing,
    /// settling the page after every pass that did.
    pub async fn expand_all(&self) -> Result<ExpansionSummary> {
        let mut summary = ExpansionSummary::default();

        loop {
            let expanded = self.expand_pass().await?;
            summary.scans += 1;
            if expanded == 0 {
                break;
            }

            summary.passes += 1;
            summary.expanded += expanded;
            log::debug!(
                "Expansion pass {} opened {} nodes",
                summary.passes,
                expanded
            );
            self.pacing.settle(self.surface).await?;
        }

        Ok(summary)
    }
}
