use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the config file (market_trend.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Classify locally instead of calling the classification service
    #[arg(long)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the trend pipeline once and print the result as JSON
    Trend {
        /// Entity id as used by the market API (e.g. "bitcoin")
        entity_id: String,
    },

    /// Print the top gainers and losers over the last 24 hours
    Movers {
        /// How many entities to show on each side
        #[arg(long, default_value = "3")]
        count: usize,
    },

    /// List the top entities by market cap
    Entities {
        /// Case-insensitive symbol filter (e.g. "btc")
        #[arg(long)]
        search: Option<String>,
    },

    /// Print price, market cap, ROI and 24h change for one entity as JSON
    Detail {
        /// Entity id as used by the market API (e.g. "ethereum")
        entity_id: String,
    },

    /// Print the latest headlines as JSON
    News,

    /// Read entity ids from stdin, debounce them, and print each published update
    Watch,
}
