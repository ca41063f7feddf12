use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{EasyEnergyError, Result};

/// Base URL of the easyEnergy tariff API.
pub const API_BASE_URL: &str = "https://mijn.easyenergy.com/nl/api/tariff/";

/// Local hour at which a gas day starts.
const GAS_DAY_START_HOUR: u32 = 6;

/// Whether prices are requested with or without VAT.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VatOption {
    #[default]
    Include,
    Exclude,
}

impl VatOption {
    /// Value of the `includeVat` query parameter.
    pub const fn as_query_value(&self) -> &'static str {
        match self {
            VatOption::Include => "true",
            VatOption::Exclude => "false",
        }
    }
}

/// Tariff endpoints of the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Electricity,
    Gas,
}

impl Endpoint {
    /// Returns the path of the endpoint, relative to [`API_BASE_URL`].
    pub const fn path(&self) -> &'static str {
        match self {
            Endpoint::Electricity => "getapxtariffs",
            Endpoint::Gas => "getlebatariffs",
        }
    }
}

/// A resolved tariff query: a half-open UTC interval and a VAT mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub vat: VatOption,
}

impl PriceQuery {
    /// Electricity prices cover whole local days, from midnight of `start_date`
    /// up to midnight after `end_date`.
    pub fn electricity(
        start_date: NaiveDate,
        end_date: NaiveDate,
        vat: VatOption,
        timezone: Tz,
    ) -> Result<Self> {
        check_range(start_date, end_date)?;

        Ok(Self {
            start: local_to_utc(timezone, start_date, NaiveTime::MIN),
            end: local_to_utc(timezone, next_day(start_date, end_date)?, NaiveTime::MIN),
            vat,
        })
    }

    /// Gas prices cover gas days, which run from 06:00 local time to 06:00 the next day.
    ///
    /// Before 06:00 the gas day that is still running started yesterday, so the window
    /// is shifted back by one day depending on `now`.
    pub fn gas(
        start_date: NaiveDate,
        end_date: NaiveDate,
        vat: VatOption,
        now: DateTime<Tz>,
    ) -> Result<Self> {
        check_range(start_date, end_date)?;

        let timezone = now.timezone();
        let gas_day_start = NaiveTime::MIN + TimeDelta::hours(i64::from(GAS_DAY_START_HOUR));

        let (first_day, last_day) = if now.hour() >= GAS_DAY_START_HOUR {
            (start_date, next_day(start_date, end_date)?)
        } else {
            let previous_day = start_date
                .checked_sub_days(Days::new(1))
                .ok_or(EasyEnergyError::InvalidRange {
                    start: start_date,
                    end: end_date,
                })?;
            (previous_day, end_date)
        };

        Ok(Self {
            start: local_to_utc(timezone, first_day, gas_day_start),
            end: local_to_utc(timezone, last_day, gas_day_start),
            vat,
        })
    }

    /// Query parameters in the order and format the API expects.
    pub fn to_params(&self) -> [(&'static str, String); 3] {
        [
            ("startTimestamp", format_timestamp(&self.start)),
            ("endTimestamp", format_timestamp(&self.end)),
            ("includeVat", self.vat.as_query_value().to_owned()),
        ]
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(EasyEnergyError::InvalidRange { start, end });
    }
    Ok(())
}

fn next_day(start: NaiveDate, end: NaiveDate) -> Result<NaiveDate> {
    end.checked_add_days(Days::new(1))
        .ok_or(EasyEnergyError::InvalidRange { start, end })
}

/// Local times skipped by a DST gap resolve to the first local time after the gap.
fn local_to_utc(timezone: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let mut local = date.and_time(time);
    loop {
        if let Some(datetime) = timezone.from_local_datetime(&local).earliest() {
            return datetime.with_timezone(&Utc);
        }
        local += TimeDelta::minutes(1);
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S.000Z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Santiago;
    use chrono_tz::Europe::Amsterdam;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_electricity_single_winter_day() {
        let today = date(2022, 12, 29);
        let query = PriceQuery::electricity(today, today, VatOption::Include, Amsterdam).unwrap();

        assert_eq!(query.start, utc("2022-12-28T23:00:00Z"));
        assert_eq!(query.end, utc("2022-12-29T23:00:00Z"));
    }

    #[test]
    fn test_electricity_summer_range() {
        let query = PriceQuery::electricity(
            date(2023, 6, 1),
            date(2023, 6, 2),
            VatOption::Exclude,
            Amsterdam,
        )
        .unwrap();

        assert_eq!(query.start, utc("2023-05-31T22:00:00Z"));
        assert_eq!(query.end, utc("2023-06-02T22:00:00Z"));
        assert_eq!(query.vat, VatOption::Exclude);
    }

    #[test]
    fn test_electricity_dst_start_day_has_23_hours() {
        let day = date(2023, 3, 26);
        let query = PriceQuery::electricity(day, day, VatOption::Include, Amsterdam).unwrap();

        assert_eq!(query.start, utc("2023-03-25T23:00:00Z"));
        assert_eq!(query.end, utc("2023-03-26T22:00:00Z"));
        assert_eq!((query.end - query.start).num_hours(), 23);
    }

    #[test]
    fn test_electricity_day_starting_in_dst_gap() {
        // Chile skips 00:00 to 01:00 on 2023-09-03.
        let day = date(2023, 9, 3);
        let query = PriceQuery::electricity(day, day, VatOption::Include, Santiago).unwrap();

        assert_eq!(query.start, utc("2023-09-03T04:00:00Z"));
        assert_eq!(query.end, utc("2023-09-04T03:00:00Z"));
        assert_eq!((query.end - query.start).num_hours(), 23);
    }

    #[test]
    fn test_electricity_range_ending_before_dst_gap() {
        let day = date(2023, 9, 2);
        let query = PriceQuery::electricity(day, day, VatOption::Include, Santiago).unwrap();

        assert_eq!(query.start, utc("2023-09-02T04:00:00Z"));
        assert_eq!(query.end, utc("2023-09-03T04:00:00Z"));
    }

    #[test]
    fn test_electricity_invalid_range() {
        let result = PriceQuery::electricity(
            date(2022, 12, 30),
            date(2022, 12, 29),
            VatOption::Include,
            Amsterdam,
        );

        assert!(matches!(result, Err(EasyEnergyError::InvalidRange { .. })));
    }

    #[test]
    fn test_gas_afternoon() {
        let today = date(2022, 12, 14);
        let now = Amsterdam.with_ymd_and_hms(2022, 12, 14, 15, 0, 0).unwrap();
        let query = PriceQuery::gas(today, today, VatOption::Include, now).unwrap();

        assert_eq!(query.start, utc("2022-12-14T05:00:00Z"));
        assert_eq!(query.end, utc("2022-12-15T05:00:00Z"));
    }

    #[test]
    fn test_gas_early_morning_uses_previous_gas_day() {
        let today = date(2022, 12, 14);
        let now = Amsterdam.with_ymd_and_hms(2022, 12, 14, 4, 0, 0).unwrap();
        let query = PriceQuery::gas(today, today, VatOption::Include, now).unwrap();

        assert_eq!(query.start, utc("2022-12-13T05:00:00Z"));
        assert_eq!(query.end, utc("2022-12-14T05:00:00Z"));
    }

    #[test]
    fn test_gas_invalid_range() {
        let now = Amsterdam.with_ymd_and_hms(2022, 12, 14, 15, 0, 0).unwrap();
        let result = PriceQuery::gas(date(2022, 12, 15), date(2022, 12, 14), VatOption::Include, now);

        assert!(matches!(result, Err(EasyEnergyError::InvalidRange { .. })));
    }

    #[test]
    fn test_params() {
        let today = date(2022, 12, 29);
        let query = PriceQuery::electricity(today, today, VatOption::Exclude, Amsterdam).unwrap();

        assert_eq!(
            query.to_params(),
            [
                ("startTimestamp", "2022-12-28T23:00:00.000Z".to_owned()),
                ("endTimestamp", "2022-12-29T23:00:00.000Z".to_owned()),
                ("includeVat", "false".to_owned()),
            ]
        );
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Electricity.path(), "getapxtariffs");
        assert_eq!(Endpoint::Gas.path(), "getlebatariffs");
        assert_eq!(VatOption::default(), VatOption::Include);
    }
}
