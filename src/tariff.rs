use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EasyEnergyError, Result};

/// One entry of a tariff response, as sent by the API.
///
/// Electricity entries carry both tariffs, gas entries only `TariffUsage`.
/// Other fields the API sends are ignored.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TariffItem {
    pub timestamp: String,
    pub tariff_usage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tariff_return: Option<f64>,
}

pub(crate) fn decode_items(json: &str) -> Result<Vec<TariffItem>> {
    Ok(serde_json::from_str(json)?)
}

pub(crate) fn encode_items(items: &[TariffItem]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

/// Parses an API timestamp, either RFC 3339 or with a colon-less offset (`+0000`).
pub(crate) fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .or_else(|_| DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|datetime| datetime.with_timezone(&Utc))
        .map_err(|e| {
            EasyEnergyError::UnsupportedResponse(format!(
                "parsing timestamp {timestamp:?} failed: {e}"
            ))
        })
}

pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}
