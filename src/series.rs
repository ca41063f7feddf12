use chrono::{DateTime, Utc};

use crate::error::{EasyEnergyError, Result};
use crate::rates::{Preference, PricePoint, Rates};
use crate::tariff::{self, TariffItem};

/// Electricity tariffs for one hour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElectricityPrice {
    /// Start of the hour this price is valid for
    pub timestamp: DateTime<Utc>,
    /// Price per kWh for consumption
    pub usage: f64,
    /// Price per kWh paid for electricity returned to the grid
    pub feed_in: f64,
}

impl TryFrom<TariffItem> for ElectricityPrice {
    type Error = EasyEnergyError;

    fn try_from(item: TariffItem) -> Result<Self> {
        let feed_in = item.tariff_return.ok_or_else(|| {
            EasyEnergyError::UnsupportedResponse(format!(
                "missing TariffReturn at {}",
                item.timestamp
            ))
        })?;

        Ok(Self {
            timestamp: tariff::parse_timestamp(&item.timestamp)?,
            usage: item.tariff_usage,
            feed_in,
        })
    }
}

impl From<&ElectricityPrice> for TariffItem {
    fn from(price: &ElectricityPrice) -> Self {
        Self {
            timestamp: tariff::format_timestamp(&price.timestamp),
            tariff_usage: price.usage,
            tariff_return: Some(price.feed_in),
        }
    }
}

/// Gas tariff for one hour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasPrice {
    /// Start of the hour this price is valid for
    pub timestamp: DateTime<Utc>,
    /// Price per m³
    pub price: f64,
}

impl TryFrom<TariffItem> for GasPrice {
    type Error = EasyEnergyError;

    fn try_from(item: TariffItem) -> Result<Self> {
        Ok(Self {
            timestamp: tariff::parse_timestamp(&item.timestamp)?,
            price: item.tariff_usage,
        })
    }
}

impl From<&GasPrice> for TariffItem {
    fn from(price: &GasPrice) -> Self {
        Self {
            timestamp: tariff::format_timestamp(&price.timestamp),
            tariff_usage: price.price,
            tariff_return: None,
        }
    }
}

/// Hourly electricity prices, ordered by time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElectricitySeries {
    prices: Vec<ElectricityPrice>,
}

impl ElectricitySeries {
    /// Builds a series, sorting the prices by time.
    ///
    /// Two prices for the same hour are rejected.
    pub fn new(prices: Vec<ElectricityPrice>) -> Result<Self> {
        Ok(Self {
            prices: into_ordered(prices, |price: &ElectricityPrice| price.timestamp)?,
        })
    }

    /// Maps a JSON response of the electricity endpoint.
    pub fn from_json(json: &str) -> Result<Self> {
        let prices = tariff::decode_items(json)?
            .into_iter()
            .map(ElectricityPrice::try_from)
            .collect::<Result<Vec<_>>>()?;

        Self::new(prices)
    }

    /// Encodes the series in the shape the API responds with.
    pub fn to_json(&self) -> Result<String> {
        let items = self.prices.iter().map(TariffItem::from).collect::<Vec<_>>();
        tariff::encode_items(&items)
    }

    pub fn prices(&self) -> &[ElectricityPrice] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Consumption prices; lower is better.
    pub fn usage(&self) -> Rates<'_, ElectricityPrice> {
        Rates::new(
            self.prices.as_slice(),
            |price: &ElectricityPrice| PricePoint {
                timestamp: price.timestamp,
                price: price.usage,
            },
            Preference::Lower,
        )
    }

    /// Feed-in prices; higher is better.
    pub fn feed_in(&self) -> Rates<'_, ElectricityPrice> {
        Rates::new(
            self.prices.as_slice(),
            |price: &ElectricityPrice| PricePoint {
                timestamp: price.timestamp,
                price: price.feed_in,
            },
            Preference::Higher,
        )
    }
}

/// Hourly gas prices, ordered by time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GasSeries {
    prices: Vec<GasPrice>,
}

impl GasSeries {
    /// Builds a series, sorting the prices by time.
    ///
    /// Two prices for the same hour are rejected.
    pub fn new(prices: Vec<GasPrice>) -> Result<Self> {
        Ok(Self {
            prices: into_ordered(prices, |price: &GasPrice| price.timestamp)?,
        })
    }

    /// Maps a JSON response of the gas endpoint.
    pub fn from_json(json: &str) -> Result<Self> {
        let prices = tariff::decode_items(json)?
            .into_iter()
            .map(GasPrice::try_from)
            .collect::<Result<Vec<_>>>()?;

        Self::new(prices)
    }

    /// Encodes the series in the shape the API responds with.
    pub fn to_json(&self) -> Result<String> {
        let items = self.prices.iter().map(TariffItem::from).collect::<Vec<_>>();
        tariff::encode_items(&items)
    }

    pub fn prices(&self) -> &[GasPrice] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn rates(&self) -> Rates<'_, GasPrice> {
        Rates::new(
            self.prices.as_slice(),
            |price: &GasPrice| PricePoint {
                timestamp: price.timestamp,
                price: price.price,
            },
            Preference::Lower,
        )
    }
}

fn into_ordered<P>(mut prices: Vec<P>, timestamp: fn(&P) -> DateTime<Utc>) -> Result<Vec<P>> {
    prices.sort_by_key(timestamp);

    if let Some(pair) = prices
        .windows(2)
        .find(|pair| timestamp(&pair[0]) == timestamp(&pair[1]))
    {
        return Err(EasyEnergyError::UnsupportedResponse(format!(
            "duplicate price for {}",
            timestamp(&pair[0])
        )));
    }

    Ok(prices)
}
