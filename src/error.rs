use thiserror::Error;

/// Failures surfaced by the asset data provider when it runs in strict mode.
/// In degrade mode these are logged and replaced with synthetic data.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to reach market data API at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error! Status: {status}")]
    Upstream { url: String, status: u16 },

    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ProviderError {
    /// HTTP status for upstream rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ProviderError::Transport { url, .. }
            | ProviderError::Upstream { url, .. }
            | ProviderError::Decode { url, .. } => Some(url),
            ProviderError::Client(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_carries_status() {
        let err = ProviderError::Upstream {
            url: "https://api.coincap.io/v2/assets/nope".to_string(),
            status: 404,
        };

        assert_eq!(err.to_string(), "HTTP error! Status: 404");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.url(), Some("https://api.coincap.io/v2/assets/nope"));
    }
}
