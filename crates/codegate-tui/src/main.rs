//! Codegate TUI entry point.

use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use clap::Parser;
use codegate_app::{SimulatedService, SimulatedServiceConfig};
use codegate_core::EntryConfig;
use codegate_tui::{App, Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Codegate verification-code screen
#[derive(Parser, Debug)]
#[command(name = "codegate-tui")]
#[command(about = "Segmented one-time-code entry screen with a simulated verification backend")]
#[command(version)]
struct Args {
    /// Destination the code was sent to, shown on screen
    #[arg(long, default_value = "+1 555 0100")]
    phone: String,

    /// Number of digits in the code
    #[arg(long, default_value_t = 6)]
    length: usize,

    /// Seconds until the code expires
    #[arg(long, default_value_t = 60)]
    expiry_secs: u32,

    /// Simulated verify latency in milliseconds
    #[arg(long, default_value_t = 1500)]
    verify_delay_ms: u64,

    /// Simulated resend latency in milliseconds
    #[arg(long, default_value_t = 1000)]
    resend_delay_ms: u64,

    /// Reject every submitted code
    #[arg(long)]
    fail_verify: bool,

    /// Fail every resend request
    #[arg(long)]
    fail_resend: bool,

    /// Write logs to this file
    ///
    /// The terminal is owned by the UI, so logging is off unless a file is
    /// given.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }

    let config = EntryConfig::new(args.length, args.expiry_secs)?;
    let service = SimulatedService::new(SimulatedServiceConfig {
        verify_delay: Duration::from_millis(args.verify_delay_ms),
        resend_delay: Duration::from_millis(args.resend_delay_ms),
        fail_verify: args.fail_verify,
        fail_resend: args.fail_resend,
    });

    tracing::info!(
        length = args.length,
        expiry_secs = args.expiry_secs,
        target = %args.phone,
        "starting verification screen"
    );

    let driver = TerminalDriver::new()?;
    let outcome = Runtime::new(driver, service, App::new(config, args.phone)).run().await?;

    tracing::info!(?outcome, "verification screen closed");
    Ok(())
}
