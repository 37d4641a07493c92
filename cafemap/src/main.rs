//! Command line entry point of the dashboard.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use cafemap::config::{apply_environment_defaults, DashboardConfig, IoSettings};
use cafemap::layout::Dashboard;
use clap::{Parser, Subcommand};
use log::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "cafemap", version, about = "Dashboard of a GeoJSON polygon dataset")]
struct Cli {
    /// JSON configuration file. Built-in defaults are used if omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GeoJSON file to display. Overrides the path from the configuration.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Writes the dashboard page into a file.
    Render {
        /// Output HTML file.
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,
    },
    /// Serves the dashboard page over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(short, long, default_value = "127.0.0.1:5006")]
        bind: SocketAddr,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Before any other thread exists: the runtime is only started by `serve`.
    apply_environment_defaults();
    let settings = IoSettings::from_env();
    debug!("I/O settings: {settings:?}");

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("failed to read configuration from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    config.area_crs().context("invalid area CRS in configuration")?;
    config
        .tile_provider()
        .context("invalid tile provider in configuration")?;

    let page = Dashboard::create(&config, &settings).render_page();

    match cli.command {
        Command::Render { output } => {
            std::fs::write(&output, page)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!("Dashboard written to {}", output.display());
        }
        Command::Serve { bind } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start the async runtime")?;
            runtime
                .block_on(cafemap::server::serve(bind, page))
                .with_context(|| format!("failed to serve on {bind}"))?;
        }
    }

    Ok(())
}
