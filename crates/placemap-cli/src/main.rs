mod booking;
mod classify;
mod fanout;
mod place;
mod search;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use placemap_core::AppConfig;
use placemap_scraper::{DecodeProfile, PlaceClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "placemap")]
#[command(about = "Extract business hours, menus and place details from map place pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print normalized business hours per place
    Hours {
        /// Place (business) ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Read the home page from a saved file instead of fetching it
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Print menu records per place
    Menu {
        /// Place (business) ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Read the menu list page from a saved file instead of fetching it
        #[arg(long)]
        html: Option<PathBuf>,
        /// How the page is unescaped before menu objects are located
        #[arg(long, value_enum, default_value_t = ProfileArg::Plain)]
        profile: ProfileArg,
    },
    /// Print coordinates, address, review stats and keywords per place
    Place {
        /// Place (business) ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Read the home page from a saved file instead of fetching it
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Print pickup-order menus from the booking service
    BookingMenu {
        /// Place id used for record ids
        #[arg(long)]
        place_id: String,
        /// Booking business id
        #[arg(long)]
        booking_id: String,
        /// Booking item id
        #[arg(long)]
        item_id: String,
        /// Which menu query to read
        #[arg(long, value_enum, default_value_t = MenuSource::Menu)]
        source: MenuSource,
    },
    /// Search places around a coordinate
    Search {
        #[arg(long)]
        query: String,
        /// Latitude
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// Map raw category strings onto configured category groups
    Classify {
        /// Raw category strings, e.g. "카페,디저트"
        #[arg(required = true)]
        categories: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    Plain,
    Unescaped,
}

impl From<ProfileArg> for DecodeProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Plain => DecodeProfile::Plain,
            ProfileArg::Unescaped => DecodeProfile::Unescaped,
        }
    }
}

/// `menu` keeps only items in stock today; `menu-groups` lists every group item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum MenuSource {
    Menu,
    MenuGroups,
}

fn build_client(config: &AppConfig) -> anyhow::Result<PlaceClient> {
    PlaceClient::from_config(config).context("failed to build place client")
}

/// Logs go to stderr so stdout stays one JSON document per line.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = placemap_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(env = ?config.env, "configuration loaded");

    match cli.command {
        Commands::Hours { ids, html } => place::run_hours(&config, &ids, html.as_deref()).await,
        Commands::Menu { ids, html, profile } => {
            place::run_menu(&config, &ids, html.as_deref(), profile.into()).await
        }
        Commands::Place { ids, html } => place::run_place(&config, &ids, html.as_deref()).await,
        Commands::BookingMenu {
            place_id,
            booking_id,
            item_id,
            source,
        } => booking::run_booking_menu(&config, &place_id, &booking_id, &item_id, source).await,
        Commands::Search { query, lat, lng } => search::run_search(&config, &query, lat, lng).await,
        Commands::Classify { categories } => classify::run_classify(&config, &categories),
    }
}

#[cfg(test)]
mod tests;
