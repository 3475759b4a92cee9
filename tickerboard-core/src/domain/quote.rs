//! One row of the board: a stock's price and fundamentals snapshot.
//!
//! The data source omits fields freely and is not schema-checked, so every
//! field deserializes leniently: absent, `null`, or wrongly-typed values
//! become `None` instead of failing the whole response.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single stock quote as returned by `GET /api/stocks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default, deserialize_with = "lenient_text")]
    pub symbol: Option<String>,
    #[serde(rename = "longName", default, deserialize_with = "lenient_text")]
    pub long_name: Option<String>,
    #[serde(rename = "currentPrice", default, deserialize_with = "lenient_f64")]
    pub current_price: Option<f64>,
    #[serde(rename = "previousClose", default, deserialize_with = "lenient_f64")]
    pub previous_close: Option<f64>,
    #[serde(rename = "dayHigh", default, deserialize_with = "lenient_f64")]
    pub day_high: Option<f64>,
    #[serde(rename = "dayLow", default, deserialize_with = "lenient_f64")]
    pub day_low: Option<f64>,
    #[serde(rename = "marketCap", default, deserialize_with = "lenient_magnitude")]
    pub market_cap: Option<Magnitude>,
    #[serde(default, deserialize_with = "lenient_magnitude")]
    pub volume: Option<Magnitude>,
    #[serde(rename = "sharesOutstanding", default, deserialize_with = "lenient_magnitude")]
    pub shares_outstanding: Option<Magnitude>,
    #[serde(rename = "trailingPE", default, deserialize_with = "lenient_f64")]
    pub trailing_pe: Option<f64>,
    /// Fraction, e.g. `0.0123` for 1.23%.
    #[serde(rename = "dividendYield", default, deserialize_with = "lenient_f64")]
    pub dividend_yield: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sector: Option<String>,
    #[serde(rename = "Weight", default, deserialize_with = "lenient_passthrough")]
    pub weight: Option<Passthrough>,
    #[serde(rename = "Number", default, deserialize_with = "lenient_passthrough")]
    pub number: Option<Passthrough>,
}

impl Quote {
    /// Percent change of `current_price` against `previous_close`.
    ///
    /// `None` when either price is missing or the previous close is zero.
    pub fn daily_change_percent(&self) -> Option<f64> {
        let current = self.current_price?;
        let previous = self.previous_close?;
        if previous == 0.0 {
            return None;
        }
        let pct = (current / previous - 1.0) * 100.0;
        pct.is_finite().then_some(pct)
    }
}

/// A large count (market cap, volume, share count).
///
/// Some data sources format these server-side (`"2.9000T"`); those strings
/// are kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Magnitude {
    Value(f64),
    Preformatted(String),
}

impl Magnitude {
    pub fn value(&self) -> Option<f64> {
        match self {
            Magnitude::Value(v) => Some(*v),
            Magnitude::Preformatted(_) => None,
        }
    }
}

/// Opaque display-only value (`Number`, `Weight`) supplied by the data source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Passthrough {
    Number(serde_json::Number),
    Text(String),
}

impl Passthrough {
    /// Numeric reading, if the value is a number or a numeric string.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Passthrough::Number(n) => n.as_f64(),
            Passthrough::Text(s) => parse_finite(s),
        }
    }
}

impl fmt::Display for Passthrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Passthrough::Number(n) => write!(f, "{n}"),
            Passthrough::Text(s) => f.write_str(s),
        }
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => parse_finite(&s),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_magnitude<'de, D>(deserializer: D) -> Result<Option<Magnitude>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).map(Magnitude::Value),
        Some(Value::String(s)) => match parse_finite(&s) {
            Some(v) => Some(Magnitude::Value(v)),
            None if s.is_empty() || s == "N/A" => None,
            None => Some(Magnitude::Preformatted(s)),
        },
        _ => None,
    })
}

fn lenient_passthrough<'de, D>(deserializer: D) -> Result<Option<Passthrough>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(Passthrough::Number(n)),
        Some(Value::String(s)) if !s.is_empty() => Some(Passthrough::Text(s)),
        _ => None,
    })
}
