use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use crate::error::{EasyEnergyError, Result};

/// A single rate at the start of its hour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Which direction of a rate is favourable to the customer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preference {
    /// Consumption: cheaper is better.
    Lower,
    /// Feed-in: a higher compensation is better.
    Higher,
}

impl Preference {
    fn at_least_as_good(&self, price: f64, reference: f64) -> bool {
        match self {
            Preference::Lower => price <= reference,
            Preference::Higher => price >= reference,
        }
    }
}

/// Borrowed view on one rate of a price series.
///
/// All statistics are computed from the points alone; gaps in the series are
/// not filled in. Ties between extremal prices resolve to the earliest point.
pub struct Rates<'a, P> {
    points: &'a [P],
    project: fn(&P) -> PricePoint,
    preference: Preference,
}

impl<P> Clone for Rates<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Rates<'_, P> {}

impl<'a, P: 'a> Rates<'a, P> {
    pub(crate) fn new(points: &'a [P], project: fn(&P) -> PricePoint, preference: Preference) -> Self {
        Self {
            points,
            project,
            preference,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = PricePoint> + 'a {
        self.points.iter().map(self.project)
    }

    /// Returns all points of this rate in ascending time order.
    pub fn points(&self) -> Vec<PricePoint> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn preference(&self) -> Preference {
        self.preference
    }

    /// Returns the point whose hour contains `moment`.
    pub fn price_at<Tz: TimeZone>(&self, moment: &DateTime<Tz>) -> Result<PricePoint> {
        let moment = moment.with_timezone(&Utc);
        self.iter()
            .find(|point| point.timestamp <= moment && moment < point.timestamp + TimeDelta::hours(1))
            .ok_or(EasyEnergyError::NotFound(moment))
    }

    /// Returns the point for the current hour.
    pub fn current(&self) -> Result<PricePoint> {
        self.price_at(&Utc::now())
    }

    /// Returns the point `hours` hours from now.
    pub fn in_hours(&self, hours: i64) -> Result<PricePoint> {
        let now = Utc::now();
        let moment = TimeDelta::try_hours(hours)
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or(EasyEnergyError::NotFound(now))?;
        self.price_at(&moment)
    }

    pub fn lowest(&self) -> Result<PricePoint> {
        self.iter()
            .reduce(|best, point| if point.price < best.price { point } else { best })
            .ok_or(EasyEnergyError::EmptySeries)
    }

    pub fn highest(&self) -> Result<PricePoint> {
        self.iter()
            .reduce(|best, point| if point.price > best.price { point } else { best })
            .ok_or(EasyEnergyError::EmptySeries)
    }

    pub fn lowest_price(&self) -> Result<f64> {
        Ok(self.lowest()?.price)
    }

    pub fn highest_price(&self) -> Result<f64> {
        Ok(self.highest()?.price)
    }

    pub fn time_of_lowest(&self) -> Result<DateTime<Utc>> {
        Ok(self.lowest()?.timestamp)
    }

    pub fn time_of_highest(&self) -> Result<DateTime<Utc>> {
        Ok(self.highest()?.timestamp)
    }

    /// Arithmetic mean over all points.
    pub fn average_price(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(EasyEnergyError::EmptySeries);
        }
        Ok(self.iter().map(|point| point.price).sum::<f64>() / self.len() as f64)
    }

    /// `price` as a share of the highest price, rounded to whole percents.
    ///
    /// A highest price of zero yields 0.
    pub fn percentage_of_max(&self, price: f64) -> Result<f64> {
        let highest = self.highest_price()?;
        if highest == 0.0 {
            return Ok(0.0);
        }
        Ok((price / highest * 100.0).round())
    }

    /// Number of hours priced at `price` or better, `price`'s own hour included.
    pub fn hours_with_current_price_or_better(&self, price: f64) -> Result<usize> {
        if self.is_empty() {
            return Err(EasyEnergyError::EmptySeries);
        }
        Ok(self
            .iter()
            .filter(|point| self.preference.at_least_as_good(point.price, price))
            .count())
    }
}
