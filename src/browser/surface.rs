//! Chrome-backed [`AutomationSurface`]

use super::network::NetworkIdleMonitor;
use super::scripts::{PageScripts, SELECT_HIDDEN, SELECT_OK, SELECT_STALE};
use crate::error::{Result, ScrapeError};
use crate::layout::{LoginLayout, TreeLayout};
use crate::surface::{
    AutomationSurface, DetailPanelState, NodeHandle, RawDiagnostics, TwistyState,
};
use async_trait::async_trait;
use chromiumoxide::page::Page;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// One controlled page of the target application
pub struct CdpSurface {
    page: Page,
    scripts: PageScripts,
    network: NetworkIdleMonitor,
    idle_window: Duration,
}

impl CdpSurface {
    /// Wrap `page`, starting network tracking immediately.
    pub async fn attach(page: Page, layout: TreeLayout, idle_window: Duration) -> Result<Self> {
        let network = NetworkIdleMonitor::attach(&page).await?;
        Ok(Self {
            page,
            scripts: PageScripts::new(layout),
            network,
            idle_window,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn layout(&self) -> &TreeLayout {
        self.scripts.layout()
    }

    async fn eval<T: DeserializeOwned>(&self, script: String) -> Result<T> {
        let result = self.page.evaluate(script).await?;
        // A `null` result comes back without a value at all.
        let value = result.value().cloned().unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    /// Navigate the page to `url`.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScrapeError::NavigationFailed(format!("{}: {}", url, e)))?;
        Ok(())
    }

    /// Wait for the navigation triggered by the last action to finish.
    pub async fn wait_for_navigation(&self) -> Result<()> {
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| ScrapeError::NavigationFailed(e.to_string()))?;
        Ok(())
    }

    /// Replace the value of the input matching `selector`.
    pub async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| ScrapeError::ElementNotFound(selector.to_string()))?;
        element
            .call_js_fn("function() { this.value = ''; }", false)
            .await?;
        element.click().await?.type_str(value).await?;
        Ok(())
    }

    /// Click the element matching `selector`.
    pub async fn click(&self, selector: &str) -> Result<()> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| ScrapeError::ElementNotFound(selector.to_string()))?
            .click()
            .await?;
        Ok(())
    }

    /// Whether the nested navigation frame holding the tree is reachable.
    pub async fn nav_frame_present(&self) -> Result<bool> {
        self.eval(self.scripts.nav_frame_present()).await
    }

    /// Fire the application's logout entry; `false` if it could not be found.
    pub async fn trigger_logout(&self, login: &LoginLayout) -> Result<bool> {
        self.eval(self.scripts.logout(login)).await
    }
}

#[async_trait]
impl AutomationSurface for CdpSurface {
    async fn wait_for_network_idle(&self) -> Result<()> {
        self.network.wait_for_idle(self.idle_window).await;
        Ok(())
    }

    async fn scan_twisties(&self) -> Result<Vec<TwistyState>> {
        self.eval(self.scripts.scan_twisties()).await
    }

    async fn expand(&self, twisty: NodeHandle) -> Result<()> {
        let clicked: bool = self.eval(self.scripts.expand(twisty)).await?;
        if clicked {
            Ok(())
        } else {
            Err(ScrapeError::StaleNode(twisty.0))
        }
    }

    async fn content_nodes(&self) -> Result<Vec<NodeHandle>> {
        let nodes: Option<Vec<NodeHandle>> = self.eval(self.scripts.content_nodes()).await?;
        nodes.ok_or_else(|| ScrapeError::ElementNotFound(self.layout().nav_content_frame.clone()))
    }

    async fn select(&self, node: NodeHandle) -> Result<()> {
        let outcome: String = self.eval(self.scripts.select(node)).await?;
        match outcome.as_str() {
            SELECT_OK => Ok(()),
            SELECT_STALE => Err(ScrapeError::StaleNode(node.0)),
            SELECT_HIDDEN => Err(ScrapeError::NodeNotInteractable(node.0)),
            other => Err(ScrapeError::Other(format!(
                "Unexpected selection outcome '{}'",
                other
            ))),
        }
    }

    async fn label(&self, node: NodeHandle) -> Result<Option<String>> {
        self.eval(self.scripts.label(node)).await
    }

    async fn structural_parent(&self, node: NodeHandle) -> Result<Option<NodeHandle>> {
        self.eval(self.scripts.structural_parent(node)).await
    }

    async fn detail_panel(&self) -> Result<DetailPanelState> {
        self.eval(self.scripts.detail_panel()).await
    }

    async fn diagnostics(&self) -> Result<RawDiagnostics> {
        let raw: Option<RawDiagnostics> = self.eval(self.scripts.diagnostics()).await?;
        raw.ok_or(ScrapeError::DiagnosticsUnavailable)
    }
}
