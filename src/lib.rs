pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod layout;
pub mod pacing;
pub mod report;
pub mod scraper;
pub mod session;
pub mod surface;
pub mod tree;

//  Re-export commonly used items
pub use browser::{CdpSurface, ChromeDriver, LaunchOptions};
pub use config::{Credentials, OutputTarget, ScrapeConfig, TraversalOptions};
pub use error::{Result, ScrapeError};
pub use extract::{sanitize_record, ErrorExtractor, Extraction, NodeDiagnostics};
pub use layout::{LoginLayout, TreeLayout};
pub use pacing::Pacing;
pub use report::{ErrorReport, Report, ReportAssembler};
pub use scraper::{Scraper, TraversalStats};
pub use surface::{AutomationSurface, DetailPanelState, NodeHandle, RawDiagnostics, TwistyState};
pub use tree::{list_leaf_nodes, reconstruct_path, ExpansionSummary, TreeExpander};
