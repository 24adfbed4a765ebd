pub mod chrome;
pub mod network;
pub mod scripts;
pub mod surface;

pub use chrome::{ChromeDriver, LaunchOptions};
pub use network::NetworkIdleMonitor;
pub use surface::CdpSurface;
