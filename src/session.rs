//! Login and logout against the target application.

use crate::browser::CdpSurface;
use crate::config::Credentials;
use crate::error::{Result, ScrapeError};
use crate::layout::LoginLayout;
use crate::pacing::Pacing;

/// Sign in at `url` and confirm the navigation tree's frame is reachable.
///
/// A missing frame after login means the credentials were refused.
pub async fn login(
    surface: &CdpSurface,
    pacing: &Pacing,
    layout: &LoginLayout,
    url: &str,
    credentials: &Credentials,
) -> Result<()> {
    log::info!("Navigating to {}", url);
    pacing.bounded("loading login page", surface.goto(url)).await?;

    log::info!("Logging in...");
    pacing
        .bounded(
            "filling username",
            surface.fill(&layout.username_input, &credentials.username),
        )
        .await?;
    pacing
        .bounded(
            "filling password",
            surface.fill(&layout.password_input, &credentials.password),
        )
        .await?;
    pacing
        .bounded("submitting login", surface.click(&layout.submit))
        .await?;
    pacing
        .bounded("waiting for login navigation", surface.wait_for_navigation())
        .await?;
    pacing.settle(surface).await?;

    let present = pacing
        .bounded("locating navigation frame", surface.nav_frame_present())
        .await?;
    if !present {
        return Err(ScrapeError::AuthenticationFailed);
    }
    Ok(())
}

/// Open the system menu and fire its logout entry.
pub async fn logout(surface: &CdpSurface, pacing: &Pacing, layout: &LoginLayout) -> Result<()> {
    log::info!("Logging out...");
    pacing
        .bounded("opening system menu", surface.click(&layout.system_menu))
        .await?;
    pacing.settle(surface).await?;

    let fired = pacing
        .bounded("triggering logout", surface.trigger_logout(layout))
        .await?;
    if !fired {
        log::warn!("Logout entry not found in the system menu");
    }
    pacing.settle(surface).await
}
