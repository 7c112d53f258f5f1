//! Indicator table tests

use chartcache::prelude::*;

/// Helper function to create ascending test candles
fn create_test_candles(count: usize, base_price: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let price = base_price + (i as f64 * 0.1) + (i as f64 % 10.0) * 0.5;
            Candle::new(
                1_600_000_000 + i as i64 * 300,
                price,
                price + 1.0,
                price - 1.5,
                price + 0.25,
                1000.0,
                price + 0.1,
            )
        })
        .collect()
}

fn missing_prefix(column: &[Option<f64>]) -> usize {
    column.iter().take_while(|v| v.is_none()).count()
}

#[test]
fn test_two_hundred_candles_window_120() {
    let table = IndicatorAssembler::new()
        .assemble(&create_test_candles(200, 100.0), 120)
        .unwrap();

    assert_eq!(table.len(), 200);

    let emaslow = table.column("emaslow").unwrap();
    assert_eq!(missing_prefix(&emaslow), 119);
    assert!(emaslow[119..].iter().all(Option::is_some));

    let emafast = table.column("emafast").unwrap();
    assert_eq!(missing_prefix(&emafast), 59);

    let rsi = table.column("rsi").unwrap();
    assert_eq!(missing_prefix(&rsi), 5);
    assert!(rsi[5..].iter().all(Option::is_some));

    let roc = table.column("roc").unwrap();
    assert_eq!(missing_prefix(&roc), 1);
    assert!(roc[1..].iter().all(Option::is_some));

    assert_eq!(missing_prefix(&table.column("sma").unwrap()), 119);
    assert_eq!(missing_prefix(&table.column("macd").unwrap()), 25);
    assert_eq!(missing_prefix(&table.column("macdsignal").unwrap()), 33);
}

#[test]
fn test_all_columns_present() {
    let table = IndicatorAssembler::new()
        .assemble(&create_test_candles(50, 10.0), 20)
        .unwrap();

    for name in [
        "open", "high", "low", "close", "volume", "weightedAverage", "sma", "upperband",
        "lowerband", "bbpercent", "bbrange", "emaslow", "emafast", "macd", "macdsignal",
        "macdhist", "roc", "rsi", "bodysize", "shadowsize",
    ] {
        let column = table.column(name).unwrap_or_else(|| panic!("missing column {}", name));
        assert_eq!(column.len(), 50);
    }
}

#[test]
fn test_window_larger_than_rows() {
    let table = IndicatorAssembler::new()
        .assemble(&create_test_candles(30, 100.0), 120)
        .unwrap();

    assert_eq!(table.len(), 30);
    assert!(table.column("emaslow").unwrap().iter().all(Option::is_none));
    assert!(table.column("upperband").unwrap().iter().all(Option::is_none));
    assert_eq!(missing_prefix(&table.column("emafast").unwrap()), 30);
}

#[test]
fn test_fewer_rows_than_rsi_lookback() {
    let table = IndicatorAssembler::new()
        .assemble(&create_test_candles(3, 100.0), 4)
        .unwrap();

    assert_eq!(table.len(), 3);
    assert!(table.column("rsi").unwrap().iter().all(Option::is_none));
    assert_eq!(missing_prefix(&table.column("roc").unwrap()), 1);
}

#[test]
fn test_empty_chart() {
    let table = IndicatorAssembler::new().assemble(&[], 120).unwrap();

    assert!(table.is_empty());
    assert_eq!(table.column("rsi").unwrap().len(), 0);
}

#[test]
fn test_body_and_shadow_sizes() {
    let candles = create_test_candles(40, 50.0);
    let table = IndicatorAssembler::new().assemble(&candles, 10).unwrap();

    let body = table.column("bodysize").unwrap();
    let shadow = table.column("shadowsize").unwrap();
    for (i, candle) in candles.iter().enumerate() {
        assert_eq!(body[i], Some(candle.open - candle.close));
        assert_eq!(shadow[i], Some(candle.high - candle.low));
        assert!(shadow[i].unwrap() >= 0.0);
    }
}

#[test]
fn test_index_follows_candle_order() {
    let mut candles = create_test_candles(5, 10.0);
    candles.swap(1, 3);
    let table = IndicatorAssembler::new().assemble(&candles, 2).unwrap();

    let index: Vec<i64> = table.index().iter().map(|ts| ts.timestamp()).collect();
    let dates: Vec<i64> = candles.iter().map(|c| c.date).collect();
    assert_eq!(index, dates);
}

#[test]
fn test_odd_window_uses_floor_half_for_fast_ema() {
    let table = IndicatorAssembler::new()
        .assemble(&create_test_candles(40, 10.0), 21)
        .unwrap();

    assert_eq!(missing_prefix(&table.column("emaslow").unwrap()), 20);
    assert_eq!(missing_prefix(&table.column("emafast").unwrap()), 9);
}

#[test]
fn test_missing_weighted_average_fails() {
    let mut candles = create_test_candles(10, 10.0);
    candles[6].weighted_average = None;

    let err = IndicatorAssembler::new()
        .assemble(&candles, 5)
        .unwrap_err();

    assert!(matches!(
        err,
        ChartError::DataShape {
            field: "weightedAverage",
            index: 6
        }
    ));
}

#[test]
fn test_window_below_two_is_rejected() {
    let err = IndicatorAssembler::new()
        .assemble(&create_test_candles(10, 10.0), 1)
        .unwrap_err();

    assert!(matches!(err, ChartError::Config(_)));
}

#[test]
fn test_bbpercent_tracks_band_position() {
    let table = IndicatorAssembler::new()
        .assemble(&create_test_candles(60, 100.0), 20)
        .unwrap();

    let price = table.column("weightedAverage").unwrap();
    let upper = table.column("upperband").unwrap();
    let lower = table.column("lowerband").unwrap();
    let percent = table.column("bbpercent").unwrap();
    for i in 19..60 {
        let expected = (price[i].unwrap() - lower[i].unwrap()) / (upper[i].unwrap() - lower[i].unwrap());
        assert!((percent[i].unwrap() - expected).abs() < 1e-9);
    }
}

/// Library stub returning constant columns, to check the assembler's plumbing
struct ConstantLibrary;

impl IndicatorLibrary for ConstantLibrary {
    fn bollinger_bands(&self, series: &[f64], _window: usize) -> chartcache::Result<Vec<Option<BBResult>>> {
        Ok(vec![None; series.len()])
    }

    fn ema(&self, series: &[f64], window: usize) -> chartcache::Result<Vec<Option<f64>>> {
        Ok(vec![Some(window as f64); series.len()])
    }

    fn macd(&self, series: &[f64]) -> chartcache::Result<MACDColumns> {
        Ok(MACDColumns {
            macd: vec![None; series.len()],
            signal: vec![None; series.len()],
            histogram: vec![None; series.len()],
        })
    }

    fn rsi(&self, series: &[f64], lookback: usize) -> chartcache::Result<Vec<f64>> {
        Ok(vec![50.0; series.len().saturating_sub(lookback)])
    }

    fn rate_of_change(&self, series: &[f64], lag: usize) -> chartcache::Result<Vec<f64>> {
        Ok(vec![1.0; series.len().saturating_sub(lag)])
    }
}

#[test]
fn test_custom_library_and_start_padding() {
    let table = IndicatorAssembler::with_library(ConstantLibrary)
        .assemble(&create_test_candles(8, 10.0), 6)
        .unwrap();

    assert_eq!(table.column("emaslow").unwrap()[0], Some(6.0));
    assert_eq!(table.column("emafast").unwrap()[0], Some(3.0));
    assert_eq!(
        table.column("roc").unwrap(),
        &[None, Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0)]
    );
    assert_eq!(missing_prefix(&table.column("rsi").unwrap()), 5);
    assert_eq!(table.column("rsi").unwrap()[7], Some(50.0));
}
