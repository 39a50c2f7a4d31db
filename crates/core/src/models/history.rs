use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::price::PriceSeries;
use crate::errors::CoreError;

/// Close-price history for every holding over a requested window.
///
/// Symbols whose fetch failed are absent from `series` and reported in
/// `warnings`. Symbols that were fetched but traded on no day in the window
/// are present with an empty series.
#[derive(Debug, Default)]
pub struct HistoricalSeries {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub series: BTreeMap<String, PriceSeries>,
    pub warnings: Vec<CoreError>,
}

impl HistoricalSeries {
    /// `true` when no symbol has a single point in the window.
    pub fn has_no_data(&self) -> bool {
        self.series.values().all(|s| s.is_empty())
    }

    /// Align all series by date into a table.
    pub fn to_table(&self) -> HistoryTable {
        HistoryTable::from_series(&self.series)
    }
}

/// One row of a [`HistoryTable`]: a date and one cell per symbol column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub date: NaiveDate,

    /// Close per column, `None` where that symbol has no point on `date`
    pub closes: Vec<Option<f64>>,
}

/// Dates × symbols table of close prices, gaps left as `None`.
///
/// The core builds these; the shell only prints them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryTable {
    pub symbols: Vec<String>,
    pub rows: Vec<HistoryRow>,
}

impl HistoryTable {
    pub fn from_series(series: &BTreeMap<String, PriceSeries>) -> Self {
        let symbols: Vec<String> = series.keys().cloned().collect();
        let dates: BTreeSet<NaiveDate> = series
            .values()
            .flat_map(|s| s.points().iter().map(|p| p.date))
            .collect();

        let rows = dates
            .into_iter()
            .map(|date| HistoryRow {
                date,
                closes: series.values().map(|s| s.close_on(date)).collect(),
            })
            .collect();

        Self { symbols, rows }
    }

    /// Close for `symbol` on `date`, `None` for a gap or unknown column.
    pub fn cell(&self, date: NaiveDate, symbol: &str) -> Option<f64> {
        let col = self.symbols.iter().position(|s| s == symbol)?;
        let row = self.rows.iter().find(|r| r.date == date)?;
        row.closes.get(col).copied().flatten()
    }
}

const DATE_WIDTH: usize = 10;
const GAP: &str = "-";

impl fmt::Display for HistoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .symbols
            .iter()
            .enumerate()
            .map(|(col, symbol)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.closes.get(col).copied().flatten())
                    .map(|c| format!("{c:.2}").len())
                    .chain([symbol.len(), GAP.len()])
                    .max()
                    .unwrap_or(GAP.len())
            })
            .collect();

        write!(f, "{:<width$}", "Date", width = DATE_WIDTH)?;
        for (symbol, &width) in self.symbols.iter().zip(&widths) {
            write!(f, "  {symbol:>width$}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(
                f,
                "{:<width$}",
                row.date.format("%Y-%m-%d").to_string(),
                width = DATE_WIDTH
            )?;
            for (col, &width) in widths.iter().enumerate() {
                match row.closes.get(col).copied().flatten() {
                    Some(close) => write!(f, "  {close:>width$.2}")?,
                    None => write!(f, "  {:>width$}", GAP)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
