use clap::{ArgAction, Parser};
use graphics_error_scraper::browser::{CdpSurface, ChromeDriver, LaunchOptions};
use graphics_error_scraper::config::{
    Credentials, OutputTarget, ScrapeConfig, DEFAULT_OUTPUT, DEFAULT_TIMEOUT_MS,
};
use graphics_error_scraper::error::Result;
use graphics_error_scraper::layout::{LoginLayout, TreeLayout};
use graphics_error_scraper::pacing::Pacing;
use graphics_error_scraper::scraper::Scraper;
use graphics_error_scraper::session;
use std::time::{Duration, Instant};

/// Collect error reports from every area of a graphics application's tree
#[derive(Parser, Debug)]
#[command(
    name = "graphics-error-scraper",
    author,
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Target URL
    #[arg(short = 'u', long)]
    url: String,

    /// Username
    #[arg(short = 'U', long)]
    username: String,

    /// Password
    #[arg(short = 'p', long)]
    password: String,

    /// Output file (use - for stdout)
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT)]
    output: String,

    /// Overwrite output file if it exists
    #[arg(short = 'f', long)]
    force: bool,

    /// Ignore SSL certificate errors
    #[arg(short = 'i', long = "ignoressl")]
    ignore_ssl: bool,

    /// Timeout for page actions in milliseconds
    #[arg(short = 't', long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout: u64,

    /// Headless mode (true/false)
    #[arg(
        short = 'h',
        long,
        value_name = "BOOL",
        default_value = "true",
        value_parser = parse_headless,
        action = ArgAction::Set
    )]
    headless: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

/// Anything but a case-insensitive "true" runs with a visible window.
fn parse_headless(value: &str) -> std::result::Result<bool, String> {
    Ok(value.eq_ignore_ascii_case("true"))
}

impl Args {
    fn into_config(self) -> ScrapeConfig {
        ScrapeConfig {
            url: self.url,
            credentials: Credentials {
                username: self.username,
                password: self.password,
            },
            headless: self.headless,
            ignore_ssl: self.ignore_ssl,
            timeout: Duration::from_millis(self.timeout),
            force: self.force,
            output: OutputTarget::parse(&self.output),
            verbose: self.verbose,
        }
    }
}

/// `--version` anywhere, or `-v` on its own, prints the version.
fn wants_version(args: &[String]) -> bool {
    args.iter().any(|a| a == "--version") || (args.len() == 1 && args[0] == "-v")
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "warn,graphics_error_scraper=info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

#[tokio::main]
async fn main() {
    let argv: Vec<String> = std::env::args().collect();
    if wants_version(argv.get(1..).unwrap_or_default()) {
        println!("v{}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let args = match Args::try_parse_from(&argv) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                clap::error::ErrorKind::DisplayHelp => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    init_logging(args.verbose);
    let config = args.into_config();

    if let Err(e) = run(config).await {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(config: ScrapeConfig) -> Result<()> {
    let clock = Instant::now();
    log::info!("Started: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

    config.output.ensure_writable(config.force)?;

    let driver = ChromeDriver::launch(LaunchOptions::from_config(&config)).await?;
    let outcome = scrape(&driver, &config).await;
    if let Err(e) = driver.close().await {
        log::debug!("Failed to close Chrome cleanly: {}", e);
    }
    outcome?;

    log::info!("Ended: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    log::info!(
        "Completed in {:.2} minutes.",
        clock.elapsed().as_secs_f64() / 60.0
    );
    Ok(())
}

async fn scrape(driver: &ChromeDriver, config: &ScrapeConfig) -> Result<()> {
    let options = config.traversal_options();
    let pacing = Pacing::new(options);
    let login_layout = LoginLayout::default();
    let tree_layout = TreeLayout::default();

    let page = driver.page().await?;
    let surface = CdpSurface::attach(page, tree_layout.clone(), options.network_idle).await?;

    session::login(
        &surface,
        &pacing,
        &login_layout,
        &config.url,
        &config.credentials,
    )
    .await?;

    let (report, stats) = Scraper::new(&surface, tree_layout, options)
        .run_with_stats()
        .await?;
    log::info!(
        "Checked {} nodes: {} with errors, {} skipped",
        stats.nodes,
        stats.reported,
        stats.skipped
    );

    config.output.ensure_writable(config.force)?;
    report.write_to(&config.output)?;
    if let OutputTarget::File(path) = &config.output {
        log::info!("Results written to {}", path.display());
    }

    // The report is already out; a failed logout only costs a warning.
    if let Err(e) = session::logout(&surface, &pacing, &login_layout).await {
        log::warn!("Logout failed: {}", e);
    }
    Ok(())
}
