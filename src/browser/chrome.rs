// spider_chrome re-exports chromiumoxide API
use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide_fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Keeps Chrome from upgrading or blocking plain-http and self-signed targets.
const HTTPS_FIRST_FLAG: &str = "--disable-features=HttpsFirstBalancedModeAutoEnable";

/// How Chrome is launched for a run
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Explicit Chrome executable; auto-downloaded when absent
    pub chrome_path: Option<String>,
    pub headless: bool,
    pub no_sandbox: bool,
    /// Accept invalid TLS certificates
    pub ignore_ssl: bool,
    /// Bound for launch and for every CDP request
    pub timeout: Duration,
}

impl LaunchOptions {
    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self {
            chrome_path: None,
            headless: config.headless,
            no_sandbox: is_ci(),
            ignore_ssl: config.ignore_ssl,
            timeout: config.timeout,
        }
    }
}

fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("JENKINS_HOME").is_ok()
        || std::env::var("CIRCLECI").is_ok()
}

pub struct ChromeDriver {
    browser: Browser,
    temp_dir: PathBuf,
}

impl ChromeDriver {
    /// Launch Chrome with a private, throwaway profile
    pub async fn launch(options: LaunchOptions) -> Result<Self> {
        // Unique profile per instance so parallel runs never share state
        let unique_id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let temp_dir = std::env::temp_dir().join(format!(
            "graphics-error-scraper-{}-{}",
            std::process::id(),
            unique_id
        ));
        std::fs::create_dir_all(&temp_dir).map_err(|e| {
            ScrapeError::LaunchFailed(format!("Failed to create temp directory: {}", e))
        })?;

        let mut config = if options.headless {
            BrowserConfig::builder()
        } else {
            BrowserConfig::builder()
                .with_head()
                .viewport(None)
                .arg("--start-maximized")
        };

        config = config
            .user_data_dir(&temp_dir)
            .request_timeout(options.timeout)
            .launch_timeout(options.timeout);

        if options.no_sandbox {
            config = config.arg("--no-sandbox");
        }

        if options.ignore_ssl {
            config = config
                .arg("--ignore-certificate-errors")
                .arg(HTTPS_FIRST_FLAG);
        }

        if let Some(path) = options.chrome_path {
            config = config.chrome_executable(path);
        } else {
            match Self::ensure_chrome_installed().await {
                Ok(path) => {
                    config = config.chrome_executable(path);
                }
                Err(e) => {
                    // Fall back to whatever Chrome chromiumoxide can find
                    log::warn!("Chrome auto-download failed ({}), trying system Chrome", e);
                }
            }
        }

        let config = config.build().map_err(|e| {
            ScrapeError::LaunchFailed(format!("Invalid browser configuration: {}", e))
        })?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            ScrapeError::LaunchFailed(format!(
                "{}. \n\n\
                 Chrome not found. You can:\n\
                 - Install Chrome: https://www.google.com/chrome/\n\
                 - Ubuntu/Debian: sudo apt install chromium-browser\n\
                 - Fedora: sudo dnf install chromium\n\
                 - macOS: brew install --cask google-chrome",
                e
            ))
        })?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    log::debug!("CDP handler event loop ended");
                    break;
                }
            }
        });

        Ok(Self { browser, temp_dir })
    }

    /// The page a run drives: the first one Chrome opened, or a fresh one
    pub async fn page(&self) -> Result<chromiumoxide::page::Page> {
        let pages = self.browser.pages().await?;
        if let Some(page) = pages.into_iter().next() {
            return Ok(page);
        }

        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::Other(format!("Failed to create page: {}", e)))
    }

    /// Close the browser connection
    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| ScrapeError::Other(e.to_string()))?;
        Ok(())
    }

    /// Ensure Chrome is installed, downloading if necessary
    async fn ensure_chrome_installed() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| ScrapeError::Other("Cannot determine cache directory".to_string()))?
            .join("graphics-error-scraper")
            .join("chrome");

        tokio::fs::create_dir_all(&cache_dir).await?;

        let revision_info_path = cache_dir.join(".downloaded");
        if revision_info_path.exists() {
            if let Some(executable) = Self::find_chrome_in_cache(&cache_dir) {
                return Ok(executable);
            }
        }

        log::info!("Downloading Chrome for Testing (first run only)...");
        let fetcher = BrowserFetcher::new(
            BrowserFetcherOptions::builder()
                .with_path(&cache_dir)
                .build()
                .map_err(|e| ScrapeError::Other(format!("Fetcher config failed: {}", e)))?,
        );

        let info = fetcher
            .fetch()
            .await
            .map_err(|e| ScrapeError::Other(format!("Chrome download failed: {}", e)))?;

        tokio::fs::write(&revision_info_path, "downloaded").await?;
        log::info!("Chrome downloaded to {}", info.executable_path.display());

        Ok(info.executable_path)
    }

    /// Find Chrome executable in cache directory
    fn find_chrome_in_cache(cache_dir: &Path) -> Option<PathBuf> {
        [
            "chrome",
            "chrome.exe",
            "Google Chrome.app/Contents/MacOS/Google Chrome",
            "chrome-linux/chrome",
            "chrome-mac/Chromium.app/Contents/MacOS/Chromium",
            "chrome-win/chrome.exe",
        ]
        .iter()
        .map(|relative| cache_dir.join(relative))
        .find(|path| path.exists())
    }
}

impl Drop for ChromeDriver {
    fn drop(&mut self) {
        if self.temp_dir.exists() {
            let _ = std::fs::remove_dir_all(&self.temp_dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_chrome_in_empty_cache() {
        let dir = std::env::temp_dir().join(format!("ges-cache-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        assert_eq!(ChromeDriver::find_chrome_in_cache(&dir), None);

        std::fs::write(dir.join("chrome"), "").unwrap();
        assert_eq!(
            ChromeDriver::find_chrome_in_cache(&dir),
            Some(dir.join("chrome"))
        );

        std::fs::remove_dir_all(&dir).ok();
    }
}
