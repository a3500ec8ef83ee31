//! Slide relay: entry point.
//!
//! This binary accepts WebSocket connections from remote-control apps and
//! turns their JSON commands (`{"command": "next_slide"}`) into key presses
//! on this machine, replying to each command with a line of plain text.
//!
//! # Usage
//!
//! ```text
//! slide-relay [OPTIONS]
//!
//! Options:
//!   --bind <IP>              Address to listen on [default: 0.0.0.0]
//!   --port <PORT>            Port to listen on [default: 5000]
//!   --shutdown-grace <SECS>  Seconds to wait for sessions on shutdown [default: 5]
//!   --config <PATH>          Optional TOML config file
//!   --dry-run                Log key presses instead of performing them
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                     | Description                        |
//! |------------------------------|------------------------------------|
//! | `SLIDE_RELAY_BIND`           | Listen address                     |
//! | `SLIDE_RELAY_PORT`           | Listen port                        |
//! | `SLIDE_RELAY_SHUTDOWN_GRACE` | Shutdown grace period (secs)       |
//! | `SLIDE_RELAY_CONFIG`         | Config file path                   |
//! | `SLIDE_RELAY_DRY_RUN`        | Use the log-only injector          |
//!
//! A flag or variable wins over the config file, which wins over the
//! built-in default.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use slide_relay_server::application::{CommandDispatcher, KeyInjector};
use slide_relay_server::domain::config::{DEFAULT_BIND_IP, DEFAULT_PORT, DEFAULT_SHUTDOWN_GRACE};
use slide_relay_server::domain::RelayConfig;
use slide_relay_server::infrastructure::{
    platform_injector, run_server, DryRunKeyInjector, FileConfig,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// WebSocket relay that turns remote-control commands into key presses.
#[derive(Debug, Parser)]
#[command(
    name = "slide-relay",
    about = "WebSocket relay that turns remote-control commands into slide-show key presses",
    version
)]
struct Cli {
    /// IP address to listen on.
    ///
    /// Use `0.0.0.0` to accept remotes from the LAN, or `127.0.0.1` to accept
    /// only local connections.  Defaults to `0.0.0.0`.
    #[arg(long, env = "SLIDE_RELAY_BIND")]
    bind: Option<String>,

    /// TCP port to listen on.  Defaults to 5000.
    #[arg(long, env = "SLIDE_RELAY_PORT")]
    port: Option<u16>,

    /// Seconds shutdown waits for open sessions before aborting them.
    /// Defaults to 5.
    #[arg(long, env = "SLIDE_RELAY_SHUTDOWN_GRACE")]
    shutdown_grace: Option<u64>,

    /// Path to a TOML config file.
    #[arg(long, env = "SLIDE_RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Log each key press instead of sending it to the desktop.
    #[arg(long, env = "SLIDE_RELAY_DRY_RUN")]
    dry_run: bool,
}

impl Cli {
    /// Merges the parsed arguments with `file` into a [`RelayConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--bind` is not a valid IP address.
    fn into_relay_config(self, file: &FileConfig) -> anyhow::Result<RelayConfig> {
        let ip: IpAddr = match self.bind {
            Some(bind) => bind
                .parse()
                .with_context(|| format!("invalid bind address: '{bind}'"))?,
            None => file.server.bind_address.unwrap_or(DEFAULT_BIND_IP),
        };
        let port = self.port.or(file.server.port).unwrap_or(DEFAULT_PORT);
        let grace = self
            .shutdown_grace
            .or(file.server.shutdown_grace_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SHUTDOWN_GRACE);

        Ok(RelayConfig::new(ip, port).with_shutdown_grace(grace))
    }

    fn load_file_config(&self) -> anyhow::Result<FileConfig> {
        match &self.config {
            Some(path) => FileConfig::load(path)
                .with_context(|| format!("cannot load config file {}", path.display())),
            None => Ok(FileConfig::default()),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. `tracing_subscriber` is initialised; `RUST_LOG` controls the level.
/// 2. CLI arguments and the optional config file are merged into a
///    [`RelayConfig`].
/// 3. The key injector is opened.  Failure here is fatal.
/// 4. A signal task cancels the shutdown token on Ctrl+C or SIGTERM.
/// 5. [`run_server`] binds the port and serves until the token is cancelled.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let file = cli.load_file_config()?;
    let dry_run = cli.dry_run;
    let config = cli.into_relay_config(&file)?;

    let injector: Arc<dyn KeyInjector> = if dry_run {
        info!("dry run: key presses will be logged, not performed");
        Arc::new(DryRunKeyInjector)
    } else {
        platform_injector()
            .context("cannot start key injection (use --dry-run to run without it)")?
    };
    let dispatcher = Arc::new(CommandDispatcher::with_builtin_table(injector));

    info!("slide relay starting on ws://{}", config.bind_addr);

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    let report = run_server(config, dispatcher, shutdown).await?;

    info!(
        "slide relay stopped after {} sessions",
        report.sessions_accepted
    );
    Ok(())
}

/// Cancels `shutdown` on Ctrl+C, or on SIGTERM where that exists.
///
/// If a signal cannot be listened for, the error is logged and the relay
/// keeps serving.
async fn cancel_on_signal(shutdown: CancellationToken) {
    #[cfg(unix)]
    let received = {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => tokio::select! {
                res = tokio::signal::ctrl_c() => ctrl_c_received(res),
                _ = sigterm.recv() => {
                    info!("received SIGTERM; shutting down");
                    true
                }
            },
            Err(e) => {
                error!("failed to listen for SIGTERM: {e}");
                ctrl_c_received(tokio::signal::ctrl_c().await)
            }
        }
    };

    #[cfg(not(unix))]
    let received = ctrl_c_received(tokio::signal::ctrl_c().await);

    if received {
        shutdown.cancel();
    }
}

fn ctrl_c_received(res: std::io::Result<()>) -> bool {
    match res {
        Ok(()) => {
            info!("received Ctrl+C; shutting down");
            true
        }
        Err(e) => {
            error!("failed to listen for Ctrl+C signal: {e}");
            false
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
