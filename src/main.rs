mod config;
mod controller;
mod error;
mod render;
mod search;
mod search_clients;
mod session;
mod view;
mod web_server;

use crate::config::AppConfig;
use crate::controller::GalleryController;
use crate::search::ImageSearcher;
use crate::search_clients::pixabay::PixabaySearcher;
use crate::view::UiPlan;
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about = "Paginated image search gallery backed by the Pixabay API")]
struct Cli {
    /// Override the configured web port
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search pass and print the resulting UI plan as JSON
    Search { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::new()?;

    // Initialize env_logger based on config.log_level
    env_logger::Builder::new()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    info!("Starting image-gallery");

    let searcher: Arc<dyn ImageSearcher> = Arc::new(PixabaySearcher::new(&config)?);
    let mut controller = GalleryController::new(searcher);

    match cli.command {
        Some(Commands::Search { query }) => {
            let mut plan = UiPlan::default();
            let outcome = controller.submit_search(&query, &mut plan).await;
            info!("Search finished: {:?}", outcome);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        None => {
            let port = cli.port.unwrap_or(config.web_port);
            if let Err(e) = web_server::start_web_server(controller, port).await {
                log::error!("Web server error: {}", e);
            }
        }
    }

    info!("Image-gallery finished");

    Ok(())
}
