use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use market_trend::{
    cli::commands::{Cli, Commands},
    config::TrendConfig,
    models::quote::TopMovers,
    pipeline::{PipelineSettings, TrendPipeline},
    providers::{
        MarketSource, NewsSource, TrendClassifier, coingecko::CoinGeckoProvider,
        cryptopanic::CryptoPanicProvider, heuristic::LocalHeuristic, predict_rest::PredictClient,
    },
    registry::EntityRegistry,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config =
        TrendConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let market =
        Arc::new(CoinGeckoProvider::new(&config).context("failed to create market provider")?);

    match cli.command {
        Commands::Trend { entity_id } => {
            let pipeline = build_pipeline(&config, Arc::clone(&market), cli.offline)?;
            let ticket = pipeline.select(&entity_id);
            let update = pipeline
                .run(&ticket)
                .await
                .context("trend run was superseded")?;
            println!("{}", serde_json::to_string_pretty(&update)?);
        }

        Commands::Movers { count } => {
            let registry = EntityRegistry::new();
            registry
                .refresh(market.as_ref(), config.top_entities)
                .await
                .context("failed to fetch top entities")?;
            let quotes = market
                .fetch_quotes(&registry.snapshot())
                .await
                .context("failed to fetch quotes")?;
            let movers = TopMovers::from_quotes(quotes, count);
            println!("{}", serde_json::to_string_pretty(&movers)?);
        }

        Commands::Entities { search } => {
            let registry = EntityRegistry::new();
            registry
                .refresh(market.as_ref(), config.top_entities)
                .await
                .context("failed to fetch top entities")?;
            for entity in registry.search(search.as_deref().unwrap_or_default()) {
                println!("{}\t{}", entity.symbol, entity.id);
            }
        }

        Commands::Detail { entity_id } => {
            let detail = market
                .fetch_coin_detail(&entity_id)
                .await
                .with_context(|| format!("failed to fetch detail for {entity_id}"))?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }

        Commands::News => {
            let news = CryptoPanicProvider::new(&config).context("failed to create news provider")?;
            let feed = news.latest(config.news_items).await;
            println!("{}", serde_json::to_string_pretty(&feed)?);
        }

        Commands::Watch => {
            let pipeline = Arc::new(build_pipeline(&config, Arc::clone(&market), cli.offline)?);
            let (debouncer, driver) = pipeline.attach(config.quiet_period());

            let mut updates = pipeline.subscribe();
            let printer = tokio::spawn(async move {
                while updates.changed().await.is_ok() {
                    let latest = updates.borrow_and_update().clone();
                    if let Some(update) = latest {
                        match serde_json::to_string(&update) {
                            Ok(line) => println!("{line}"),
                            Err(e) => log::error!("failed to encode update: {e}"),
                        }
                    }
                }
            });

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let entity_id = line.trim();
                if !entity_id.is_empty() {
                    debouncer.submit(entity_id.to_string());
                }
            }

            // Settle the last selection now, then wait for its run. Dropping
            // the pipeline closes the update channel and ends the printer.
            debouncer.flush();
            drop(debouncer);
            driver.await.context("pipeline driver panicked")?;
            drop(pipeline);
            printer.await.context("update printer panicked")?;
        }
    }

    Ok(())
}

fn build_pipeline(
    config: &TrendConfig,
    market: Arc<CoinGeckoProvider>,
    offline: bool,
) -> Result<TrendPipeline> {
    let classifier: Arc<dyn TrendClassifier> = if offline {
        Arc::new(LocalHeuristic)
    } else {
        Arc::new(PredictClient::new(config).context("failed to create classifier client")?)
    };
    Ok(TrendPipeline::new(
        market,
        classifier,
        PipelineSettings::from(config),
    ))
}
