use serde::Serialize;

use crate::error::ProviderError;
use crate::models::{AssetSnapshot, Interval, PricePoint};
use crate::services::asset_provider::AssetDataProvider;

/// Everything the detail view needs for one asset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDetail {
    pub asset: AssetSnapshot,
    pub history: Vec<PricePoint>,
    pub interval: Interval,
    pub timestamp: i64,
}

/// Load the snapshot and its history concurrently. Fails if either query
/// fails, which can only happen in strict mode.
pub async fn load_asset_detail(
    provider: &AssetDataProvider,
    id: &str,
    interval: Option<Interval>,
) -> Result<AssetDetail, ProviderError> {
    let interval = interval.unwrap_or_else(|| provider.config().default_interval.clone());

    let (asset, history) = tokio::try_join!(
        provider.get_asset(id),
        provider.get_asset_history(id, Some(interval.clone()))
    )?;

    tracing::info!(
        "Loaded {} with {} price points ({})",
        asset.data.name,
        history.data.len(),
        interval.label()
    );

    Ok(AssetDetail {
        asset: asset.data,
        history: history.data,
        interval,
        timestamp: asset.timestamp.max(history.timestamp),
    })
}
