pub mod asset;

pub use asset::{AssetSnapshot, Envelope, Interval, PricePoint};
