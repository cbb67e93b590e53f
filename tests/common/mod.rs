use serde_json::{Value, json};
use std::net::TcpListener;

use crypto_tracker::{AssetDataProvider, ProviderConfig};

/// Base URL of a loopback port nobody listens on.
/// Binds an ephemeral port and releases it so connects are refused.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub fn degrade_provider(base_url: &str, relay_prefix: Option<String>) -> AssetDataProvider {
    let config = ProviderConfig::default()
        .with_base_url(base_url)
        .with_relay_prefix(relay_prefix)
        .with_synthetic_seed(2024);
    AssetDataProvider::new(config).expect("Failed to build provider")
}

pub fn strict_provider(base_url: &str) -> AssetDataProvider {
    let config = ProviderConfig::strict().with_base_url(base_url);
    AssetDataProvider::new(config).expect("Failed to build provider")
}

pub fn asset_json(id: &str, rank: u32, symbol: &str, name: &str, price: &str) -> Value {
    json!({
        "id": id,
        "rank": rank.to_string(),
        "symbol": symbol,
        "name": name,
        "supply": "1000000.0000000000000000",
        "maxSupply": null,
        "marketCapUsd": "5000000000.0000000000000000",
        "volumeUsd24Hr": "250000000.0000000000000000",
        "priceUsd": price,
        "changePercent24Hr": "1.2345",
        "vwap24Hr": price,
        "explorer": format!("https://explorer.example/{}", id)
    })
}

pub fn envelope(data: Value) -> Value {
    json!({ "data": data, "timestamp": 1_710_504_000_000i64 })
}

pub fn history_json(start: i64, prices: &[&str]) -> Value {
    let points: Vec<Value> = prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            json!({
                "priceUsd": price,
                "time": start + i as i64 * 86_400_000,
                "date": "2024-03-15T00:00:00.000Z"
            })
        })
        .collect();
    Value::Array(points)
}
