use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::AssetSnapshot;
use crate::models::asset::parse_decimal_text;

const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Direction of a 24h change, used to pick gain/loss styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Gain,
    Loss,
    Flat,
}

fn two_places(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// USD amount with B/M suffixes for large values, e.g. `$40.00B`.
/// Amounts under a million print in full (`$1800.00`).
pub fn format_usd(value: &str) -> String {
    let Some(num) = parse_decimal_text(value) else {
        return "$0.00".to_string();
    };

    if num.abs() >= BILLION {
        format!("${}B", two_places(num / BILLION))
    } else if num.abs() >= MILLION {
        format!("${}M", two_places(num / MILLION))
    } else {
        format!("${}", two_places(num))
    }
}

/// Signed percentage, e.g. `+2.50%` or `-1.80%`.
pub fn format_percent(value: &str) -> String {
    match parse_decimal_text(value) {
        Some(num) if num >= Decimal::ZERO => format!("+{}%", two_places(num)),
        Some(num) => format!("{}%", two_places(num)),
        None => "0.00%".to_string(),
    }
}

/// Plain quantity with B/M/K suffixes, e.g. supply figures.
pub fn format_number(value: &str) -> String {
    let Some(num) = parse_decimal_text(value) else {
        return "0".to_string();
    };

    if num.abs() >= BILLION {
        format!("{}B", two_places(num / BILLION))
    } else if num.abs() >= MILLION {
        format!("{}M", two_places(num / MILLION))
    } else if num.abs() >= THOUSAND {
        format!("{}K", two_places(num / THOUSAND))
    } else {
        two_places(num)
    }
}

pub fn change_direction(value: &str) -> ChangeDirection {
    match parse_decimal_text(value) {
        Some(num) if num > Decimal::ZERO => ChangeDirection::Gain,
        Some(num) if num < Decimal::ZERO => ChangeDirection::Loss,
        _ => ChangeDirection::Flat,
    }
}

/// `Unlimited` for uncapped assets, otherwise the cap with its symbol.
pub fn format_max_supply(asset: &AssetSnapshot) -> String {
    match asset.max_supply.as_deref() {
        Some(max) if !max.trim().is_empty() => format!("{} {}", format_number(max), asset.symbol),
        _ => "Unlimited".to_string(),
    }
}
