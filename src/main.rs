//! upwall binary entrypoint kept minimal. Commands live in `upwall::args`.

use std::fmt::{self, Write as _};
use std::path::Path;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;
use upwall::args::{self, Args, Context};
use upwall::config::{self, ConfigPaths};

struct UpwallTimer;

impl tracing_subscriber::fmt::time::FormatTime for UpwallTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        // "YYYY-MM-DD-T HH:MM:SS"
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Install the tracing subscriber writing to `<logs_dir>/upwall.log`, or stderr when that fails.
fn init_logging(logs_dir: &Path, level: &str) {
    let log_path = logs_dir.join("upwall.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(UpwallTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: log to stderr so commands still run
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(UpwallTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Args::parse();
    let paths = ConfigPaths::resolve(cli.config_dir.as_deref());
    init_logging(&paths.logs_dir(), &args::determine_log_level(&cli));

    let mut settings = config::load(&paths);
    args::apply_overrides(&mut settings, &cli);
    tracing::info!(backend = %settings.backend_url, "upwall starting");

    let ctx = match Context::new(settings, paths) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };
    let code = args::process_args(&cli, &ctx).await;
    tracing::info!("upwall exited");
    code
}
