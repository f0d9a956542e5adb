//! TokenSwap CLI
//!
//! Lists token prices and quotes swaps against the live price feed.

use anyhow::{anyhow, Result};
use clap::{ArgGroup, Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokenswap_common::CatalogStatus;
use tokenswap_feed::{CatalogStore, FeedConfig, HttpPriceFeed, RetryingFeed};
use tokenswap_swap::{FormState, SelectionDefaults};

mod session;

use session::{AmountInput, QuoteRequest};

/// TokenSwap CLI
#[derive(Parser, Debug)]
#[command(name = "tokenswap")]
#[command(about = "Token swap price lookup and quoting")]
struct Args {
    /// Price feed URL (overrides PRICE_FEED_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the current price catalog
    Prices,

    /// Quote a swap between two tokens
    #[command(group(ArgGroup::new("input").required(true).args(["amount", "receive"])))]
    Quote {
        /// Token to pay with
        #[arg(long)]
        from: String,

        /// Token to receive
        #[arg(long)]
        to: String,

        /// Amount to pay
        #[arg(long)]
        amount: Option<String>,

        /// Amount to receive
        #[arg(long)]
        receive: Option<String>,

        /// Available balance of the token paid with
        #[arg(long)]
        balance: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(args.json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!args.json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let mut config = FeedConfig::from_env();
    if let Some(url) = args.url {
        config.url = url;
    }
    config.validate().map_err(|e| anyhow!(e))?;

    let defaults = SelectionDefaults::from_env();
    defaults.validate().map_err(|e| anyhow!(e))?;

    info!(url = %config.url, "Loading price catalog");
    let status = load_catalog(&config).await?;

    match args.command {
        Command::Prices => {
            let Some(catalog) = status.catalog() else {
                return Err(unavailable(&status));
            };
            for instrument in catalog.iter() {
                println!("{:<10} {}", instrument.symbol, instrument.price);
            }
        }
        Command::Quote {
            from,
            to,
            amount,
            receive,
            balance,
        } => {
            if !status.is_available() {
                return Err(unavailable(&status));
            }

            let amount = match (amount, receive) {
                (Some(amount), _) => AmountInput::Pay(amount),
                (None, Some(receive)) => AmountInput::Receive(receive),
                (None, None) => return Err(anyhow!("Either --amount or --receive is required")),
            };

            let mut form = FormState::new(defaults);
            form.apply_catalog(status);
            session::replay(
                &mut form,
                &QuoteRequest {
                    from,
                    to,
                    amount,
                    balance,
                },
            )?;

            println!("{}", serde_json::to_string_pretty(&session::report(&form))?);
        }
    }

    Ok(())
}

async fn load_catalog(config: &FeedConfig) -> Result<CatalogStatus> {
    let http = Arc::new(HttpPriceFeed::new(config)?);
    let feed = RetryingFeed::new(http, config.retry_attempts);
    let store = CatalogStore::new(config.revalidate_interval);

    Ok(store.refresh(&feed).await)
}

fn unavailable(status: &CatalogStatus) -> anyhow::Error {
    match status {
        CatalogStatus::Failed(reason) => anyhow!("{}: {}", status.notice().unwrap_or_default(), reason),
        _ => anyhow!("{}", status.notice().unwrap_or_default()),
    }
}
