//! Time-indexed candle table with named indicator columns

use crate::data::Candle;
use crate::error::{ChartError, ChartResult};
use chrono::{DateTime, Utc};
use polars::prelude::{DataFrame, DataType, NamedFrom, Series, TimeUnit};
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use std::fmt;

/// Name of the datetime index column
pub const DATE: &str = "date";

/// Candles projected into rows, indexed by bucket start time
///
/// Backed by a polars [`DataFrame`] whose first column is `date`; every other
/// column is `f64` with null for a missing value. Rows keep the order of the
/// candle sequence they were built from. The table is derived on demand and
/// never persisted.
#[derive(Debug, Clone)]
pub struct CandleTable {
    frame: DataFrame,
}

impl CandleTable {
    /// Build the raw table: one row per candle, one column per candle field
    pub fn from_candles(candles: &[Candle]) -> ChartResult<Self> {
        let millis = candles
            .iter()
            .enumerate()
            .map(|(index, c)| {
                c.datetime()
                    .map(|ts| ts.timestamp_millis())
                    .ok_or(ChartError::DataShape { field: "date", index })
            })
            .collect::<ChartResult<Vec<i64>>>()?;

        let date = Series::new(DATE, millis).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
        let frame = DataFrame::new(vec![
            date,
            Series::new("open", candles.iter().map(|c| c.open).collect::<Vec<_>>()),
            Series::new("high", candles.iter().map(|c| c.high).collect::<Vec<_>>()),
            Series::new("low", candles.iter().map(|c| c.low).collect::<Vec<_>>()),
            Series::new("close", candles.iter().map(|c| c.close).collect::<Vec<_>>()),
            Series::new("volume", candles.iter().map(|c| c.volume).collect::<Vec<_>>()),
            Series::new("quoteVolume", candles.iter().map(|c| c.quote_volume).collect::<Vec<_>>()),
            Series::new(
                "weightedAverage",
                candles.iter().map(|c| c.weighted_average).collect::<Vec<_>>(),
            ),
        ])?;
        Ok(Self { frame })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Underlying data frame, `date` column included
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Row timestamps
    pub fn index(&self) -> Vec<DateTime<Utc>> {
        let Ok(series) = self.frame.column(DATE).and_then(|s| s.cast(&DataType::Int64)) else {
            return Vec::new();
        };
        let Ok(millis) = series.i64() else {
            return Vec::new();
        };
        millis
            .into_iter()
            .flatten()
            .filter_map(DateTime::from_timestamp_millis)
            .collect()
    }

    /// Get a value column by name
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        if name == DATE {
            return None;
        }
        let series = self.frame.column(name).ok()?;
        Some(series.f64().ok()?.into_iter().collect())
    }

    /// Value column names in insertion order
    pub fn column_names(&self) -> Vec<&str> {
        self.frame
            .get_column_names()
            .into_iter()
            .filter(|name| *name != DATE)
            .collect()
    }

    /// Add a column, replacing any existing column of the same name in place
    pub fn insert_column(&mut self, name: &str, values: Vec<Option<f64>>) -> ChartResult<()> {
        if name == DATE {
            return Err(ChartError::Indicator(format!("`{}` is the index column", DATE)));
        }
        if values.len() != self.len() {
            return Err(ChartError::Indicator(format!(
                "column `{}` has {} values for {} rows",
                name,
                values.len(),
                self.len()
            )));
        }
        self.frame.with_column(Series::new(name, values))?;
        Ok(())
    }

    /// Keep the index and the named columns, in the order given; unknown names are skipped
    pub fn select(&self, names: &[&str]) -> ChartResult<Self> {
        let existing = self.frame.get_column_names();
        let mut keep = vec![DATE];
        for name in names {
            if existing.contains(name) && !keep.contains(name) {
                keep.push(*name);
            }
        }
        Ok(Self {
            frame: self.frame.select(keep)?,
        })
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Self {
        Self {
            frame: self.frame.head(Some(n)),
        }
    }

    /// Last `n` rows
    pub fn tail(&self, n: usize) -> Self {
        Self {
            frame: self.frame.tail(Some(n)),
        }
    }
}

impl fmt::Display for CandleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frame)
    }
}

#[derive(Serialize)]
struct ColumnJson<'a> {
    name: &'a str,
    values: Vec<Option<f64>>,
}

#[derive(Serialize)]
struct TableJson<'a> {
    index: Vec<DateTime<Utc>>,
    columns: Vec<ColumnJson<'a>>,
}

/// Serialized as `{"index": [...], "columns": [{"name", "values"}]}`, nulls for missing values
impl Serialize for CandleTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let columns = self
            .column_names()
            .into_iter()
            .map(|name| {
                self.column(name)
                    .map(|values| ColumnJson { name, values })
                    .ok_or_else(|| S::Error::custom(format!("column `{}` is not numeric", name)))
            })
            .collect::<Result<Vec<_>, S::Error>>()?;

        TableJson {
            index: self.index(),
            columns,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let p = 100.0 + i as f64;
                Candle::new(1_600_000_000 + i as i64 * 300, p, p + 2.0, p - 1.0, p + 1.0, 10.0, p + 0.5)
            })
            .collect()
    }

    #[test]
    fn test_from_candles_keeps_order_and_fields() {
        let table = CandleTable::from_candles(&candles(3)).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.index()[1].timestamp(), 1_600_000_300);
        assert_eq!(table.column("open").unwrap(), vec![Some(100.0), Some(101.0), Some(102.0)]);
        assert_eq!(table.column("quoteVolume").unwrap(), vec![None, None, None]);
        assert_eq!(
            table.column_names(),
            vec!["open", "high", "low", "close", "volume", "quoteVolume", "weightedAverage"]
        );
        assert!(matches!(
            table.frame().column(DATE).unwrap().dtype(),
            DataType::Datetime(TimeUnit::Milliseconds, None)
        ));
    }

    #[test]
    fn test_insert_column_checks_length() {
        let mut table = CandleTable::from_candles(&candles(3)).unwrap();

        assert!(table.insert_column("x", vec![Some(1.0)]).is_err());
        assert!(table.insert_column(DATE, vec![None; 3]).is_err());
        table.insert_column("x", vec![None, Some(1.0), Some(2.0)]).unwrap();
        table.insert_column("x", vec![Some(0.0); 3]).unwrap();
        assert_eq!(table.column("x").unwrap(), vec![Some(0.0); 3]);
        assert_eq!(table.column_names().len(), 8);
    }

    #[test]
    fn test_head_tail_select() {
        let table = CandleTable::from_candles(&candles(10)).unwrap();

        let tail = table.select(&["close", "missing", "open", "close"]).unwrap().tail(3);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail.column_names(), vec!["close", "open"]);
        assert_eq!(tail.column("open").unwrap()[0], Some(107.0));
        assert_eq!(tail.index()[0].timestamp(), 1_600_002_100);

        assert_eq!(table.head(20).len(), 10);
        assert_eq!(table.tail(0).len(), 0);
    }

    #[test]
    fn test_display_marks_missing_values() {
        let mut table = CandleTable::from_candles(&candles(2)).unwrap();
        table.insert_column("rsi", vec![None, Some(50.0)]).unwrap();

        let text = table.select(&["rsi"]).unwrap().to_string();
        assert!(text.contains("null"));
        assert!(text.contains("2020-09-13"));
    }

    #[test]
    fn test_serializes_index_and_columns() {
        let mut table = CandleTable::from_candles(&candles(2)).unwrap();
        table.insert_column("rsi", vec![None, Some(50.0)]).unwrap();

        let json = serde_json::to_value(table.select(&["rsi"]).unwrap()).unwrap();
        assert_eq!(json["index"].as_array().unwrap().len(), 2);
        assert_eq!(json["columns"][0]["name"], "rsi");
        assert!(json["columns"][0]["values"][0].is_null());
        assert_eq!(json["columns"][0]["values"][1], 50.0);
    }

    #[test]
    fn test_out_of_range_date_is_rejected() {
        let mut bad = candles(2);
        bad[1].date = i64::MAX;

        let err = CandleTable::from_candles(&bad).unwrap_err();
        assert!(matches!(err, ChartError::DataShape { field: "date", index: 1 }));
    }
}
