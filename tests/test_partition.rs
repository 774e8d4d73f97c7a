//! Tests for dividing a dataset by column kind

use missminer::pipeline::{column_names, divide_by_kind, ColumnKind};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_divide_mining_fixture() {
    let df = common::create_missing_data();
    let (categorical, numeric) = divide_by_kind(&df, ColumnKind::Categorical).unwrap();

    assert_eq!(column_names(&categorical), vec!["Categorical", "Missing"]);
    assert_eq!(column_names(&numeric), vec!["Numeric"]);
    common::assert_shape(&categorical, 100, 2);
    common::assert_shape(&numeric, 100, 1);
}

#[test]
fn test_partition_is_disjoint_and_complete() {
    let df = common::create_mixed_type_dataframe();

    for kind in [ColumnKind::Categorical, ColumnKind::Numeric] {
        let (matching, rest) = divide_by_kind(&df, kind).unwrap();
        let matching_names = column_names(&matching);
        let rest_names = column_names(&rest);

        for name in &matching_names {
            assert!(!rest_names.contains(name), "'{}' appears in both parts", name);
        }

        let mut union: Vec<String> = matching_names.into_iter().chain(rest_names).collect();
        union.sort();
        let mut original = column_names(&df);
        original.sort();
        assert_eq!(union, original, "Parts should cover every column for {}", kind);
    }
}

#[test]
fn test_mixed_types_divide_by_dtype() {
    let df = common::create_mixed_type_dataframe();
    let (categorical, numeric) = divide_by_kind(&df, ColumnKind::Categorical).unwrap();

    common::assert_has_columns(&categorical, &["str_col", "bool_col"]);
    common::assert_has_columns(&numeric, &["int_col", "float_col"]);
}

#[test]
fn test_numeric_only_frame_has_empty_categorical_part() {
    let df = df! {
        "a" => [1.0f64, 2.0],
        "b" => [3i64, 4],
    }
    .unwrap();

    let (categorical, numeric) = divide_by_kind(&df, ColumnKind::Categorical).unwrap();
    assert_eq!(categorical.width(), 0);
    assert_eq!(numeric.width(), 2);
}

#[test]
fn test_divide_keeps_rows_aligned() {
    let df = common::create_missing_data();
    let (categorical, numeric) = divide_by_kind(&df, ColumnKind::Numeric).unwrap();

    assert_eq!(categorical.height(), df.height());
    assert_eq!(numeric.height(), df.height());
}
