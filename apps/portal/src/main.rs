use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use clap::{Parser, Subcommand};
use portal_core::{
    catalog::{default_catalog, load_catalog},
    classify_value, NdviController, UpdatesView,
};
use shared::{
    domain::{CategoryFilter, ColorBand, Region},
    protocol::ViewSnapshot,
};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

#[derive(Parser, Debug)]
#[command(name = "agri-portal", about = "Agricultural updates and NDVI analysis views")]
struct Cli {
    /// TOML settings file; defaults to ./portal.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List agricultural updates, optionally filtered by category.
    Updates {
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// JSON array of news items replacing the built-in catalog.
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Select one or more regions in order and show the final NDVI reading.
    Ndvi {
        /// `lat,lng;lat,lng;...`; later regions supersede earlier ones.
        #[arg(long = "region", required = true, allow_hyphen_values = true)]
        regions: Vec<Region>,
        /// Pause between selections, in milliseconds.
        #[arg(long, default_value_t = 0)]
        stagger_ms: u64,
        #[arg(long)]
        json: bool,
    },
    /// Classify a single NDVI value.
    Classify {
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load_settings(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        timeout_ms = settings.retrieval_timeout_ms,
        max_attempts = settings.retrieval_max_attempts,
        "settings loaded"
    );

    match cli.command {
        Command::Updates {
            category,
            catalog,
            json,
        } => {
            let items = match catalog.or_else(|| settings.catalog_path.clone()) {
                Some(path) => {
                    tracing::info!(path = %path.display(), "loading news catalog");
                    load_catalog(&path)?
                }
                None => default_catalog(),
            };
            let mut view = UpdatesView::new(items)?;
            view.select_category(category);

            if json {
                let snapshot = ViewSnapshot::Updates(view.snapshot());
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render::render_updates(&view));
            }
        }
        Command::Ndvi {
            regions,
            stagger_ms,
            json,
        } => {
            let mut controller =
                NdviController::new(Arc::new(settings.retriever()), settings.retry_policy());

            let last = regions.len().saturating_sub(1);
            for (index, region) in regions.into_iter().enumerate() {
                controller.select_region(region);
                if index < last && stagger_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(stagger_ms)).await;
                    controller.process_events();
                }
            }
            controller.settle().await;

            if json {
                let snapshot = ViewSnapshot::Ndvi(controller.view().snapshot());
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render::render_ndvi(controller.view()));
            }
        }
        Command::Classify { value } => {
            let status = classify_value(value)?;
            let band = ColorBand::from(status);
            println!(
                "{value:.2} -> {status} (band {}, {})",
                band.id(),
                band.hex()
            );
        }
    }

    Ok(())
}
