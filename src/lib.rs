//! Client for the [easyEnergy](https://www.easyenergy.com) dynamic tariff API.
//!
//! Prices are fetched per local date range and returned as [`ElectricitySeries`]
//! or [`GasSeries`]. Statistics such as the lowest, highest or average price are
//! available through the [`Rates`] view of a series.

mod client;
mod error;
mod query;
mod rates;
mod series;
mod tariff;

use chrono::NaiveDate;

pub use client::{Config, EasyEnergy};
pub use error::{EasyEnergyError, Result};
pub use query::{Endpoint, PriceQuery, VatOption, API_BASE_URL};
pub use rates::{Preference, PricePoint, Rates};
pub use series::{ElectricityPrice, ElectricitySeries, GasPrice, GasSeries};

/// Query hourly electricity prices from `start_date` through `end_date` with a
/// default client.
///
/// Use an [`EasyEnergy`] client directly to reuse the HTTP session across calls.
pub async fn fetch_energy_prices(
    start_date: NaiveDate,
    end_date: NaiveDate,
    vat: VatOption,
) -> Result<ElectricitySeries> {
    EasyEnergy::new()?
        .energy_prices(start_date, end_date, Some(vat))
        .await
}

/// Query gas prices from `start_date` through `end_date` with a default client.
pub async fn fetch_gas_prices(
    start_date: NaiveDate,
    end_date: NaiveDate,
    vat: VatOption,
) -> Result<GasSeries> {
    EasyEnergy::new()?
        .gas_prices(start_date, end_date, Some(vat))
        .await
}
