use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::models::{AssetSnapshot, Envelope, Interval, PricePoint};
use crate::services::synthetic;

/// Client for the CoinCap `/assets` endpoints.
///
/// Every query tries the upstream directly first. With `degrade_on_failure`
/// set, any failure (network error, timeout, non-success status or a body
/// that does not decode) is retried once through the relay, and if that
/// fails too the query resolves to synthetic data instead of an error.
/// Without it there is exactly one direct attempt and failures propagate.
#[derive(Clone)]
pub struct AssetDataProvider {
    client: Client,
    config: ProviderConfig,
}

impl AssetDataProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ProviderError::Client)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Top assets by market cap, in upstream rank order.
    pub async fn list_top_assets(
        &self,
        limit: Option<NonZeroU32>,
    ) -> Result<Envelope<Vec<AssetSnapshot>>, ProviderError> {
        let limit = limit.unwrap_or(self.config.default_limit);
        tracing::info!("Fetching top {} assets", limit);

        let path = format!("/assets?limit={}", limit);

        match self.fetch::<Vec<AssetSnapshot>>(&path).await {
            Ok(envelope) => {
                tracing::debug!("Fetched {} assets", envelope.data.len());
                Ok(envelope)
            }
            Err(e) if self.config.degrade_on_failure => {
                tracing::warn!("Serving synthetic asset list after failure: {}", e);
                Ok(synthetic::asset_list(Utc::now()))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get_asset(&self, id: &str) -> Result<Envelope<AssetSnapshot>, ProviderError> {
        tracing::info!("Fetching asset {}", id);

        let path = format!("/assets/{}", id);

        match self.fetch::<AssetSnapshot>(&path).await {
            Ok(envelope) => Ok(envelope),
            Err(e) if self.config.degrade_on_failure => {
                tracing::warn!("Serving synthetic snapshot for {} after failure: {}", id, e);
                Ok(synthetic::asset(id, Utc::now()))
            }
            Err(e) => Err(e),
        }
    }

    /// Price history for `id`, oldest first. `interval` defaults to the
    /// configured one; unknown intervals are sent upstream as-is.
    pub async fn get_asset_history(
        &self,
        id: &str,
        interval: Option<Interval>,
    ) -> Result<Envelope<Vec<PricePoint>>, ProviderError> {
        let interval = interval.unwrap_or_else(|| self.config.default_interval.clone());
        tracing::info!("Fetching {} history for {}", interval, id);

        let path = format!("/assets/{}/history?interval={}", id, interval);

        match self.fetch::<Vec<PricePoint>>(&path).await {
            Ok(envelope) => {
                tracing::debug!("Fetched {} price points for {}", envelope.data.len(), id);
                Ok(envelope)
            }
            Err(e) if self.config.degrade_on_failure => {
                tracing::warn!("Serving synthetic history for {} after failure: {}", id, e);
                let mut rng = match self.config.synthetic_seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                Ok(synthetic::asset_history(id, Utc::now(), &mut rng))
            }
            Err(e) => Err(e),
        }
    }

    /// Direct attempt, then the relay hop when degrading. Returns the last
    /// failure if nothing worked.
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ProviderError> {
        let url = format!("{}{}", self.config.base_url, path);

        let direct_err = match self.attempt::<T>(&url).await {
            Ok(envelope) => return Ok(envelope),
            Err(e) => e,
        };

        if !self.config.degrade_on_failure {
            return Err(direct_err);
        }

        let Some(prefix) = self.config.relay_prefix.as_deref() else {
            return Err(direct_err);
        };

        tracing::warn!("Direct request failed ({}), retrying through relay", direct_err);

        let relay_url = format!("{}{}", prefix, url);
        self.attempt::<T>(&relay_url).await.inspect_err(|e| {
            tracing::warn!("Relay request failed: {}", e);
        })
    }

    async fn attempt<T: DeserializeOwned>(&self, url: &str) -> Result<Envelope<T>, ProviderError> {
        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ProviderError::Upstream {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .json::<Envelope<T>>()
            .await
            .map_err(|source| ProviderError::Decode {
                url: url.to_string(),
                source,
            })
    }
}
