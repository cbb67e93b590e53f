use std::env;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crypto_tracker::models::{AssetSnapshot, Interval};
use crypto_tracker::services::asset_detail::{AssetDetail, load_asset_detail};
use crypto_tracker::utils::formatting::{
    ChangeDirection, change_direction, format_max_supply, format_number, format_percent,
    format_usd,
};
use crypto_tracker::{AssetDataProvider, ProviderConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crypto_tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Loads .env as well
    let config = ProviderConfig::from_env();

    let provider = match AssetDataProvider::new(config) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut args = env::args().skip(1);
    let result = match args.next() {
        Some(id) => {
            let interval = args.next().map(|raw| raw.parse::<Interval>().unwrap_or_default());
            load_asset_detail(&provider, &id, interval)
                .await
                .map(|detail| print_detail(&detail))
        }
        None => provider
            .list_top_assets(None)
            .await
            .map(|envelope| print_asset_table(&envelope.data)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Failed to load cryptocurrency data: {}", e);
            eprintln!("Failed to load cryptocurrency data: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn change_marker(change: &str) -> &'static str {
    match change_direction(change) {
        ChangeDirection::Gain => "▲",
        ChangeDirection::Loss => "▼",
        ChangeDirection::Flat => "•",
    }
}

fn print_asset_table(assets: &[AssetSnapshot]) {
    println!(
        "{:>4}  {:<8} {:<20} {:>14} {:>14} {:>11}",
        "#", "SYMBOL", "NAME", "PRICE", "MARKET CAP", "24H"
    );

    for asset in assets {
        println!(
            "{:>4}  {:<8} {:<20} {:>14} {:>14} {:>9} {}",
            asset.rank,
            asset.symbol,
            asset.name,
            format_usd(&asset.price_usd),
            format_usd(&asset.market_cap_usd),
            format_percent(&asset.change_percent_24h),
            change_marker(&asset.change_percent_24h)
        );
    }
}

fn print_detail(detail: &AssetDetail) {
    let asset = &detail.asset;

    println!("{} ({})  Rank #{}", asset.name, asset.symbol, asset.rank);
    println!(
        "Price:       {}  {} {} (24h)",
        format_usd(&asset.price_usd),
        change_marker(&asset.change_percent_24h),
        format_percent(&asset.change_percent_24h)
    );
    println!("Market Cap:  {}", format_usd(&asset.market_cap_usd));
    println!("24h Volume:  {}", format_usd(&asset.volume_usd_24h));
    println!("Supply:      {} {}", format_number(&asset.supply), asset.symbol);
    println!("Max Supply:  {}", format_max_supply(asset));

    if let Some(explorer) = asset.explorer.as_deref().filter(|url| !url.is_empty()) {
        println!("Explorer:    {}", explorer);
    }

    if let (Some(first), Some(last)) = (detail.history.first(), detail.history.last()) {
        let low = detail.history.iter().map(|p| p.price_usd()).min().unwrap_or_default();
        let high = detail.history.iter().map(|p| p.price_usd()).max().unwrap_or_default();

        println!();
        println!(
            "Price History ({}, {} points)",
            detail.interval.label(),
            detail.history.len()
        );
        println!(
            "  {} -> {}",
            format_usd(&first.price_usd),
            format_usd(&last.price_usd)
        );
        println!(
            "  low {}  high {}",
            format_usd(&low.to_string()),
            format_usd(&high.to_string())
        );
    }
}
