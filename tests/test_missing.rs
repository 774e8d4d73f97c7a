//! Unit tests for the missingness mask

use missminer::pipeline::{missing_flags, MissingnessMask};
use missminer::MiningError;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_missing_ratios_basic() {
    let df = df! {
        "col_complete" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
        "col_partial_missing" => [Some(1.0f64), Some(2.0), None, None, Some(5.0)],
        "col_all_missing" => [None::<f64>, None, None, None, None],
    }
    .unwrap();

    let mask = MissingnessMask::from_frame(&df).unwrap();
    let ratio_map: std::collections::HashMap<_, _> = mask.missing_ratios().into_iter().collect();

    assert!(
        (ratio_map["col_complete"] - 0.0).abs() < 0.001,
        "col_complete should have 0% missing, got {}",
        ratio_map["col_complete"]
    );
    assert!(
        (ratio_map["col_partial_missing"] - 0.4).abs() < 0.001,
        "col_partial_missing should have 40% missing, got {}",
        ratio_map["col_partial_missing"]
    );
    assert!(
        (ratio_map["col_all_missing"] - 1.0).abs() < 0.001,
        "col_all_missing should have 100% missing, got {}",
        ratio_map["col_all_missing"]
    );
}

#[test]
fn test_missing_ratios_sorted_descending() {
    let df = common::create_missing_test_dataframe();
    let ratios = MissingnessMask::from_frame(&df).unwrap().missing_ratios();

    for i in 0..ratios.len() - 1 {
        assert!(
            ratios[i].1 >= ratios[i + 1].1,
            "Ratios should be sorted descending: {} >= {}",
            ratios[i].1,
            ratios[i + 1].1
        );
    }
}

#[test]
fn test_missing_columns_in_dataset_order() {
    let df = common::create_missing_test_dataframe();
    let mask = MissingnessMask::from_frame(&df).unwrap();

    assert_eq!(
        mask.missing_columns(),
        vec![
            "col_20pct_missing",
            "col_40pct_missing",
            "col_all_missing",
            "col_text"
        ]
    );
}

#[test]
fn test_mask_shape_matches_frame() {
    let df = common::create_missing_data();
    let mask = MissingnessMask::from_frame(&df).unwrap();

    assert_eq!(mask.n_rows(), 100);
    assert_eq!(mask.columns(), &["Numeric", "Categorical", "Missing"]);
    for name in mask.columns() {
        assert_eq!(mask.column(name).unwrap().len(), 100);
    }
}

#[test]
fn test_fixture_missing_rows() {
    let df = common::create_missing_data();
    let mask = MissingnessMask::from_frame(&df).unwrap();

    let flags = mask.column("Missing").unwrap();
    let missing_rows: Vec<usize> = flags
        .iter()
        .enumerate()
        .filter(|(_, &m)| m)
        .map(|(i, _)| i)
        .collect();

    assert_eq!(missing_rows, (1..=10).collect::<Vec<_>>());
    assert_eq!(mask.missing_count("Numeric").unwrap(), 0);
    assert_eq!(mask.missing_count("Categorical").unwrap(), 0);
    assert_eq!(mask.missing_columns(), vec!["Missing"]);
}

#[test]
fn test_nan_counts_as_missing_in_float_columns() {
    let column = Column::new("f".into(), &[Some(1.0f64), Some(f64::NAN), None]);
    assert_eq!(missing_flags(&column).unwrap(), vec![false, true, true]);
}

#[test]
fn test_text_nan_is_a_value() {
    let column = Column::new("s".into(), &[Some("NaN"), None]);
    assert_eq!(missing_flags(&column).unwrap(), vec![false, true]);
}

#[test]
fn test_unknown_column_lookup() {
    let df = common::create_missing_data();
    let mask = MissingnessMask::from_frame(&df).unwrap();

    assert!(matches!(
        mask.column("nope"),
        Err(MiningError::UnknownColumn(name)) if name == "nope"
    ));
}

#[test]
fn test_empty_frame_has_no_ratios() {
    let df = DataFrame::empty();
    let mask = MissingnessMask::from_frame(&df).unwrap();

    assert_eq!(mask.n_rows(), 0);
    assert!(mask.missing_ratios().is_empty());
    assert!(mask.missing_columns().is_empty());
}
