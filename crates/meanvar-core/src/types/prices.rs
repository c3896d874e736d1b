//! Closing price histories.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Closing prices for one ticker, sorted by date with unique dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series, sorting by date and keeping the last close for
    /// duplicated dates.
    pub fn new(ticker: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self {
            ticker: ticker.into(),
            points: deduped,
        }
    }

    /// Ticker symbol.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Price points in date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of closes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no closes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Close on `date`, if present.
    #[must_use]
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, day).unwrap()
    }

    #[test]
    fn test_sorts_and_dedups() {
        let series = PriceSeries::new(
            "AAPL",
            vec![
                PricePoint::new(d(3), 3.0),
                PricePoint::new(d(1), 1.0),
                PricePoint::new(d(3), 3.5),
                PricePoint::new(d(2), 2.0),
            ],
        );

        assert_eq!(series.ticker(), "AAPL");
        assert_eq!(series.len(), 3);
        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(1), d(2), d(3)]);
        assert_eq!(series.close_on(d(3)), Some(3.5));
        assert_eq!(series.close_on(d(4)), None);
    }

    #[test]
    fn test_empty() {
        let series = PriceSeries::new("NONE", Vec::new());
        assert!(series.is_empty());
    }
}
