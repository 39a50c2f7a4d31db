use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single closing price on a trading date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Ordered closing prices for one symbol, as returned by a provider.
///
/// Points are kept sorted by date with at most one point per date, so every
/// lookup below is a binary search. A series is owned by a single valuation
/// call and never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSeries")]
pub struct PriceSeries {
    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub symbol: String,

    points: Vec<PricePoint>,
}

/// Wire shape of a series; decoded points go through `PriceSeries::new`
/// so ordering and symbol case hold for deserialized data too.
#[derive(Deserialize)]
struct RawSeries {
    symbol: String,
    #[serde(default)]
    points: Vec<PricePoint>,
}

impl From<RawSeries> for PriceSeries {
    fn from(raw: RawSeries) -> Self {
        PriceSeries::new(raw.symbol, raw.points)
    }
}

impl PriceSeries {
    /// Build a series from unordered points. Later duplicates of a date win.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        let mut series = Self {
            symbol: symbol.into().to_uppercase(),
            points: Vec::with_capacity(points.len()),
        };
        for point in points {
            series.insert(point);
        }
        series
    }

    /// An empty series for `symbol`.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    /// Insert or replace the point for `point.date`, keeping date order.
    pub fn insert(&mut self, point: PricePoint) {
        match self.points.binary_search_by_key(&point.date, |p| p.date) {
            Ok(idx) => self.points[idx] = point,
            Err(idx) => self.points.insert(idx, point),
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent close in the series. No freshness check is applied.
    pub fn latest_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// Close on exactly `date`. Non-trading days yield `None`; there is no
    /// snapping to a neighbouring date.
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| self.points[idx].close)
    }

    /// Sub-series with dates in the closed interval `[from, to]`.
    /// An inverted interval yields an empty series.
    pub fn slice(&self, from: NaiveDate, to: NaiveDate) -> PriceSeries {
        if from > to {
            return Self::empty(self.symbol.clone());
        }
        // first entry >= from
        let start = self
            .points
            .binary_search_by_key(&from, |p| p.date)
            .unwrap_or_else(|pos| pos);
        // first entry > to
        let end = self
            .points
            .binary_search_by_key(&to, |p| p.date)
            .map(|pos| pos + 1)
            .unwrap_or_else(|pos| pos);
        Self {
            symbol: self.symbol.clone(),
            points: self.points[start..end].to_vec(),
        }
    }
}
