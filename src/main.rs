mod animator;
mod config;
mod geo;
mod positions;
mod render;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::config::Config;
use crate::geo::Projection;
use crate::render::{render_base_map, RecordingSurface};

#[derive(Parser)]
#[command(name = "passmap")]
#[command(about = "Satellite ground-track visualization engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tracking server
    Serve { config: String },
    /// Fetch the world geometry, paint the base map once and print its
    /// draw operations as JSON
    Basemap { config: String },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Basemap { config } => basemap(&config),
    }
}

fn load_config(path: &str) -> Option<Config> {
    match Config::from_file(path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            None
        }
    }
}

fn serve(config_path: &str) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn basemap(config_path: &str) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(async {
        let http = reqwest::Client::new();
        geo::fetch_geometry(&http, &config.map.geometry_url).await
    });

    match result {
        Ok(geometry) => {
            let projection = Projection::new(config.projection);
            let mut surface =
                RecordingSurface::new(config.projection.width, config.projection.height);
            render_base_map(&geometry, &projection, &mut surface);
            match serde_json::to_string_pretty(surface.ops()) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Serialization error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error fetching world map data: {}", e);
            ExitCode::FAILURE
        }
    }
}
