use std::time::Duration;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::error::{EasyEnergyError, Result};
use crate::query::{Endpoint, PriceQuery, VatOption, API_BASE_URL};
use crate::series::{ElectricitySeries, GasSeries};

const USER_AGENT: &str = concat!("RustEasyEnergy/", env!("CARGO_PKG_VERSION"));

/// Client settings.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL the endpoint paths are appended to
    pub base_url: String,
    /// VAT mode used when a call does not pass one
    pub vat: VatOption,
    /// Timeout for a single request
    pub timeout: Duration,
    /// Time zone the requested dates are interpreted in
    pub timezone: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_owned(),
            vat: VatOption::default(),
            timeout: Duration::from_secs(10),
            timezone: chrono_tz::Europe::Amsterdam,
        }
    }
}

impl Config {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_vat(mut self, vat: VatOption) -> Self {
        self.vat = vat;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }
}

/// Client for the easyEnergy tariff API.
///
/// The HTTP session lives as long as the client and is released when it is dropped.
#[derive(Clone, Debug)]
pub struct EasyEnergy {
    http: reqwest::Client,
    config: Config,
}

impl EasyEnergy {
    /// Creates a client with the default [`Config`].
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self::with_http_client(http, config))
    }

    /// Uses an existing HTTP client. The configured timeout is applied per request.
    pub fn with_http_client(http: reqwest::Client, config: Config) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Query hourly electricity prices for the local days `start_date` through `end_date`.
    ///
    /// `vat` overrides the VAT mode of the client's [`Config`]. A period without
    /// published prices yields an empty series.
    pub async fn energy_prices(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        vat: Option<VatOption>,
    ) -> Result<ElectricitySeries> {
        let query = PriceQuery::electricity(
            start_date,
            end_date,
            vat.unwrap_or(self.config.vat),
            self.config.timezone,
        )?;

        let body = self.request(Endpoint::Electricity, &query).await?;
        let series = ElectricitySeries::from_json(&body)?;
        debug!(points = series.len(), "decoded electricity prices");

        Ok(series)
    }

    /// Query gas prices for the gas days `start_date` through `end_date`.
    ///
    /// Gas days start at 06:00 local time; see [`PriceQuery::gas`].
    pub async fn gas_prices(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        vat: Option<VatOption>,
    ) -> Result<GasSeries> {
        let now = Utc::now().with_timezone(&self.config.timezone);
        let query = PriceQuery::gas(start_date, end_date, vat.unwrap_or(self.config.vat), now)?;

        let body = self.request(Endpoint::Gas, &query).await?;
        let series = GasSeries::from_json(&body)?;
        debug!(points = series.len(), "decoded gas prices");

        Ok(series)
    }

    fn build_request(&self, endpoint: Endpoint, query: &PriceQuery) -> Result<reqwest::Request> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        );

        Ok(self
            .http
            .get(url)
            .query(&query.to_params())
            .header(ACCEPT, "application/json, text/plain")
            .timeout(self.config.timeout)
            .build()?)
    }

    async fn request(&self, endpoint: Endpoint, query: &PriceQuery) -> Result<String> {
        let request = self.build_request(endpoint, query)?;
        debug!(
            endpoint = endpoint.path(),
            start = %query.start,
            end = %query.end,
            vat = query.vat.as_query_value(),
            "requesting tariffs"
        );

        let response = self.http.execute(request).await?;
        let status = response.status();
        let response = response.error_for_status().map_err(|e| {
            warn!(%status, endpoint = endpoint.path(), "api responded with an error status");
            EasyEnergyError::from(e)
        })?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        let body = response.text().await?;

        if !content_type.contains("application/json") {
            warn!(content_type = %content_type, "unexpected content type from api");
            return Err(EasyEnergyError::UnexpectedContentType { content_type, body });
        }

        Ok(body)
    }
}
