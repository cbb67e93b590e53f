use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Response wrapper used by every CoinCap endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    pub timestamp: i64, // epoch millis
}

/// One asset as CoinCap reports it. Numeric fields stay as decimal text;
/// use the accessors to get parsed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshot {
    pub id: String,
    pub rank: String,
    pub symbol: String,
    pub name: String,
    pub supply: String,
    #[serde(default)]
    pub max_supply: Option<String>, // None = uncapped
    pub market_cap_usd: String,
    #[serde(rename = "volumeUsd24Hr")]
    pub volume_usd_24h: String,
    pub price_usd: String,
    #[serde(rename = "changePercent24Hr")]
    pub change_percent_24h: String,
    #[serde(rename = "vwap24Hr", default, deserialize_with = "null_as_empty")]
    pub vwap_24h: String,
    #[serde(default)]
    pub explorer: Option<String>,
}

impl AssetSnapshot {
    pub fn rank_number(&self) -> Option<u32> {
        self.rank.trim().parse().ok()
    }

    pub fn supply(&self) -> Decimal {
        parse_or_zero(&self.supply)
    }

    pub fn max_supply(&self) -> Option<Decimal> {
        self.max_supply.as_deref().and_then(parse_decimal_text)
    }

    pub fn market_cap_usd(&self) -> Decimal {
        parse_or_zero(&self.market_cap_usd)
    }

    pub fn volume_usd_24h(&self) -> Decimal {
        parse_or_zero(&self.volume_usd_24h)
    }

    pub fn price_usd(&self) -> Decimal {
        parse_or_zero(&self.price_usd)
    }

    pub fn change_percent_24h(&self) -> Decimal {
        parse_or_zero(&self.change_percent_24h)
    }

    pub fn vwap_24h(&self) -> Decimal {
        parse_or_zero(&self.vwap_24h)
    }
}

/// A single sample from `/assets/{id}/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub price_usd: String,
    pub time: i64, // epoch millis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl PricePoint {
    pub fn price_usd(&self) -> Decimal {
        parse_or_zero(&self.price_usd)
    }
}

/// History sampling granularity. Anything CoinCap might add later is kept
/// verbatim in `Other` and sent upstream untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    M5,
    M15,
    M30,
    H1,
    H2,
    H6,
    H12,
    #[default]
    D1,
    W1,
    Other(String),
}

impl Interval {
    pub const KNOWN: [Interval; 9] = [
        Interval::M5,
        Interval::M15,
        Interval::M30,
        Interval::H1,
        Interval::H2,
        Interval::H6,
        Interval::H12,
        Interval::D1,
        Interval::W1,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Interval::M5 => "m5",
            Interval::M15 => "m15",
            Interval::M30 => "m30",
            Interval::H1 => "h1",
            Interval::H2 => "h2",
            Interval::H6 => "h6",
            Interval::H12 => "h12",
            Interval::D1 => "d1",
            Interval::W1 => "w1",
            Interval::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Interval::M5 => "5 Minutes",
            Interval::M15 => "15 Minutes",
            Interval::M30 => "30 Minutes",
            Interval::H1 => "1 Hour",
            Interval::H2 => "2 Hours",
            Interval::H6 => "6 Hours",
            Interval::H12 => "12 Hours",
            Interval::D1 => "1 Day",
            Interval::W1 => "1 Week",
            Interval::Other(raw) => raw,
        }
    }
}

impl FromStr for Interval {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let interval = Interval::KNOWN
            .iter()
            .find(|known| known.as_str() == s)
            .cloned()
            .unwrap_or_else(|| Interval::Other(s.to_string()));
        Ok(interval)
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse CoinCap decimal text. Accepts plain and scientific notation;
/// anything else yields `None`.
pub fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

fn parse_or_zero(text: &str) -> Decimal {
    parse_decimal_text(text).unwrap_or(Decimal::ZERO)
}

// CoinCap sends `null` for vwap24Hr on thinly traded assets
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
