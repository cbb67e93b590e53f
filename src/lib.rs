// src/lib.rs

pub mod config;
pub mod error;
pub mod models;

pub mod services {
    pub mod asset_detail;
    pub mod asset_provider;
    pub mod synthetic;
}

pub mod utils;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use services::asset_provider::AssetDataProvider;
