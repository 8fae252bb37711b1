mod commands;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "braprime-cli")]
#[command(about = "BraPrime delivery location tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search places by free text, biased toward a point when given.
    Search {
        query: String,
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
    },
    /// Read search-box text line by line from stdin and print debounced results.
    Typeahead {
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
    },
    /// Turn a map point into a delivery address.
    Reverse {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// Quote the delivery fee and time between a merchant and a customer point.
    Estimate {
        #[arg(long, allow_negative_numbers = true)]
        merchant_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        merchant_lng: f64,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Base fee in GNF before the distance surcharge.
        #[arg(long, default_value = "15000")]
        base_fee: Decimal,
        /// Overrides `BRAPRIME_MAX_DELIVERY_DISTANCE_KM`.
        #[arg(long)]
        max_distance_km: Option<f64>,
    },
    /// Search, pick a result, and confirm it as the delivery location.
    Select {
        query: String,
        /// Zero-based index into the search results.
        #[arg(long, default_value_t = 0)]
        pick: usize,
        #[arg(long)]
        landmark: Option<String>,
        #[arg(long, allow_negative_numbers = true, requires = "merchant_lng")]
        merchant_lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "merchant_lat")]
        merchant_lng: Option<f64>,
        #[arg(long, default_value = "15000")]
        base_fee: Decimal,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = braprime_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Search { query, lat, lng }) => {
            let bias = lat
                .zip(lng)
                .map(|(lat, lng)| braprime_core::Coordinates::new(lat, lng));
            commands::run_search(&config, &query, bias).await?;
        }
        Some(Commands::Typeahead { lat, lng }) => {
            let bias = lat
                .zip(lng)
                .map(|(lat, lng)| braprime_core::Coordinates::new(lat, lng));
            commands::run_typeahead(&config, bias).await?;
        }
        Some(Commands::Reverse { lat, lng }) => {
            commands::run_reverse(&config, braprime_core::Coordinates::new(lat, lng)).await?;
        }
        Some(Commands::Estimate {
            merchant_lat,
            merchant_lng,
            lat,
            lng,
            base_fee,
            max_distance_km,
        }) => {
            commands::run_estimate(
                braprime_core::Coordinates::new(merchant_lat, merchant_lng),
                braprime_core::Coordinates::new(lat, lng),
                base_fee,
                max_distance_km.unwrap_or(config.max_delivery_distance_km),
            );
        }
        Some(Commands::Select {
            query,
            pick,
            landmark,
            merchant_lat,
            merchant_lng,
            base_fee,
        }) => {
            let merchant = merchant_lat
                .zip(merchant_lng)
                .map(|(lat, lng)| braprime_core::Coordinates::new(lat, lng));
            commands::run_select(
                &config,
                &query,
                pick,
                landmark.as_deref(),
                merchant,
                base_fee,
            )
            .await?;
        }
        None => println!("braprime-cli ready; run with --help for commands"),
    }

    Ok(())
}
