//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

use missminer::pipeline::{ColumnKind, FeatureMatrix, MissingnessModel};
use rust_xlsxwriter::Workbook;

/// Create the standard 100-row mining fixture
///
/// This DataFrame includes:
/// - `Numeric`: Random uniform values, complete
/// - `Categorical`: 60 x "A" followed by 40 x "B", complete
/// - `Missing`: Random letters from "ABC", rows 1 to 10 missing
pub fn create_missing_data() -> DataFrame {
    let mut rng = StdRng::seed_from_u64(0);
    let letters = ["A", "B", "C"];

    let numeric: Vec<f64> = (0..100).map(|_| rng.gen::<f64>()).collect();
    let categorical: Vec<&str> = (0..100).map(|i| if i < 60 { "A" } else { "B" }).collect();
    let missing: Vec<Option<&str>> = (0..100)
        .map(|i| {
            let letter = letters[rng.gen_range(0..letters.len())];
            if (1..=10).contains(&i) {
                None
            } else {
                Some(letter)
            }
        })
        .collect();

    df! {
        "Numeric" => numeric,
        "Categorical" => categorical,
        "Missing" => missing,
    }
    .unwrap()
}

/// Create a DataFrame whose missingness is fully explained by another column
///
/// `income` is missing exactly when `segment` is "retired".
pub fn create_systematic_missing_dataframe() -> DataFrame {
    let segments = ["retired", "employed", "student", "employed"];
    let segment: Vec<&str> = (0..80).map(|i| segments[i % segments.len()]).collect();
    let age: Vec<f64> = (0..80).map(|i| 20.0 + (i % 50) as f64).collect();
    let income: Vec<Option<f64>> = segment
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if *s == "retired" {
                None
            } else {
                Some(1000.0 + i as f64 * 10.0)
            }
        })
        .collect();

    df! {
        "age" => age,
        "segment" => segment,
        "income" => income,
    }
    .unwrap()
}

/// Create a DataFrame with specific missing value patterns
pub fn create_missing_test_dataframe() -> DataFrame {
    df! {
        "col_complete" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
        "col_20pct_missing" => [Some(1.0f64), None, Some(3.0), Some(4.0), Some(5.0)], // 20% missing
        "col_40pct_missing" => [Some(1.0f64), Some(2.0), None, None, Some(5.0)], // 40% missing
        "col_all_missing" => [None::<f64>, None, None, None, None], // 100% missing
        "col_text" => [Some("a"), Some("b"), None, Some("a"), Some("b")], // 20% missing
    }
    .unwrap()
}

/// Create a DataFrame with mixed column types and no missing values
pub fn create_mixed_type_dataframe() -> DataFrame {
    df! {
        "int_col" => [1i32, 2, 3, 4],
        "float_col" => [0.5f64, 1.5, 2.5, 3.5],
        "str_col" => ["x", "y", "x", "z"],
        "bool_col" => [true, false, true, true],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write `df` to `sheet` of a temporary xlsx workbook.
///
/// A "Cover" sheet holding a single note comes first, so the data sheet is
/// only found when it is selected by name. Null cells are left empty.
pub fn create_temp_xlsx(df: &DataFrame, sheet: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let xlsx_path = temp_dir.path().join("test_data.xlsx");

    let mut workbook = Workbook::new();
    {
        let cover = workbook.add_worksheet();
        cover.set_name("Cover").unwrap();
        cover.write_string(0, 0, "note").unwrap();
        cover.write_string(1, 0, "see data sheet").unwrap();
    }

    let data = workbook.add_worksheet();
    data.set_name(sheet).unwrap();
    for (col, column) in df.get_columns().iter().enumerate() {
        let col = col as u16;
        data.write_string(0, col, column.name().as_str()).unwrap();

        if ColumnKind::of(column.dtype()) == ColumnKind::Numeric {
            let cast = column.cast(&DataType::Float64).unwrap();
            for (row, value) in cast.f64().unwrap().into_iter().enumerate() {
                if let Some(v) = value {
                    data.write_number(row as u32 + 1, col, v).unwrap();
                }
            }
        } else {
            let cast = column.cast(&DataType::String).unwrap();
            for (row, value) in cast.str().unwrap().into_iter().enumerate() {
                if let Some(v) = value {
                    data.write_string(row as u32 + 1, col, v).unwrap();
                }
            }
        }
    }

    workbook.save(&xlsx_path).unwrap();
    (temp_dir, xlsx_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Model stub that predicts nothing missing and reports fixed importances
#[derive(Debug, Clone, Default)]
pub struct FixedModel {
    pub importances: Vec<f64>,
}

impl FixedModel {
    pub fn new(importances: Vec<f64>) -> Self {
        Self { importances }
    }
}

impl MissingnessModel for FixedModel {
    fn predict(&self, features: &FeatureMatrix) -> Vec<bool> {
        vec![false; features.n_rows()]
    }

    fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
