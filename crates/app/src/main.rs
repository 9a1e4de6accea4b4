use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::parse_base_url;
use services::{AppServices, TriviaConfig};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "info,services=debug,ui=debug";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, raw: String) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

/// Command-line overrides; anything left unset falls back to the environment.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    base_url: Option<String>,
    total_secs: Option<u32>,
    timeout_ms: Option<u64>,
    help: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => {
                    parsed.base_url = Some(require_value(args, "--base-url")?);
                }
                "--total-secs" => {
                    let value = require_value(args, "--total-secs")?;
                    parsed.total_secs = Some(parse_number("--total-secs", value)?);
                }
                "--timeout-ms" => {
                    let value = require_value(args, "--timeout-ms")?;
                    parsed.timeout_ms = Some(parse_number("--timeout-ms", value)?);
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn apply(self, mut config: TriviaConfig) -> Result<TriviaConfig, Box<dyn std::error::Error>> {
        if let Some(raw) = self.base_url {
            config.base_url = parse_base_url(&raw)?;
        }
        if let Some(total_secs) = self.total_secs {
            config = config.with_total_secs(total_secs)?;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_request_timeout(Some(Duration::from_millis(timeout_ms)));
        }
        Ok(config)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--base-url <url>] [--total-secs <n>] [--timeout-ms <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --base-url {}", services::DEFAULT_BASE_URL);
    eprintln!("  --total-secs 60");
    eprintln!("  --timeout-ms 0 (no timeout)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_BASE_URL, TRIVIA_TOTAL_SECS, TRIVIA_REQUEST_TIMEOUT_MS, RUST_LOG");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let config = args.apply(TriviaConfig::from_env()?)?;
    let services = AppServices::from_config(&config)?;
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Triviatron")
            .with_always_on_top(false),
    );

    tracing::info!(base_url = %config.base_url, "launching");
    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
