//! Dataset loader for CSV, Parquet and spreadsheet workbooks

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::path::Path;

use super::classifier::MissingnessClassifier;
use crate::report::ResultCollection;

/// Extensions of spreadsheet workbooks
const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "xlsb", "ods"];

/// Load a dataset from a file (CSV, Parquet or workbook based on extension).
///
/// `sheet` selects the worksheet of a workbook; the first sheet is used when
/// it is None. `infer_schema_length` of 0 scans the whole CSV file for type
/// inference.
pub fn load_dataset(
    path: &Path,
    sheet: Option<&str>,
    infer_schema_length: usize,
) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        let df = load_workbook(path, sheet)?;
        log::info!(
            "Loaded {} row(s) x {} column(s) from {}",
            df.height(),
            df.width(),
            path.display()
        );
        return Ok(df);
    }

    let lf = match extension.as_str() {
        "csv" => {
            let infer = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            LazyCsvReader::new(path)
                .with_infer_schema_length(infer)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet, {}",
            extension,
            SPREADSHEET_EXTENSIONS.join(", ")
        ),
    };

    if let Some(sheet) = sheet {
        log::warn!(
            "Ignoring sheet '{}': {} is not a spreadsheet",
            sheet,
            path.display()
        );
    }

    let df = lf
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    log::info!(
        "Loaded {} row(s) x {} column(s) from {}",
        df.height(),
        df.width(),
        path.display()
    );

    Ok(df)
}

/// Read one worksheet into a DataFrame.
///
/// The first row holds the column names. Empty and error cells are nulls;
/// columns with only numeric cells become Float64, columns with only boolean
/// cells become Boolean, anything else becomes String.
fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                bail!(
                    "Sheet '{}' not found in {}. Available sheets: {}",
                    name,
                    path.display(),
                    sheet_names.join(", ")
                );
            }
            name.to_string()
        }
        None => sheet_names
            .first()
            .cloned()
            .with_context(|| format!("Workbook has no sheets: {}", path.display()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet '{}' of {}", sheet_name, path.display()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        log::warn!("Sheet '{}' of {} is empty", sheet_name, path.display());
        return Ok(DataFrame::empty());
    };
    let body: Vec<&[Data]> = rows.collect();

    let columns: Vec<Column> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = match cell {
                Data::Empty => format!("column_{}", i + 1),
                other => other.to_string(),
            };
            let cells: Vec<Option<&Data>> = body.iter().map(|row| row.get(i)).collect();
            sheet_column(name, &cells)
        })
        .collect();

    DataFrame::new(columns)
        .with_context(|| format!("Failed to build dataset from sheet '{}'", sheet_name))
}

fn is_blank(cell: Option<&Data>) -> bool {
    matches!(cell, None | Some(Data::Empty) | Some(Data::Error(_)))
}

fn sheet_column(name: String, cells: &[Option<&Data>]) -> Column {
    let mut filled = cells.iter().copied().filter(|c| !is_blank(*c)).flatten();

    if filled
        .clone()
        .all(|c| matches!(c, Data::Int(_) | Data::Float(_)))
    {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|c| match c {
                Some(Data::Int(v)) => Some(*v as f64),
                Some(Data::Float(v)) => Some(*v),
                _ => None,
            })
            .collect();
        return Column::new(name.into(), values);
    }

    if filled.all(|c| matches!(c, Data::Bool(_))) {
        let values: Vec<Option<bool>> = cells
            .iter()
            .map(|c| match c {
                Some(Data::Bool(v)) => Some(*v),
                _ => None,
            })
            .collect();
        return Column::new(name.into(), values);
    }

    let values: Vec<Option<String>> = cells
        .iter()
        .map(|&c| if is_blank(c) { None } else { c.map(|d| d.to_string()) })
        .collect();
    Column::new(name.into(), values)
}

/// Rows, columns and estimated memory (MB) of a loaded dataset
pub fn dataset_stats(df: &DataFrame) -> (usize, usize, f64) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}

/// Load a dataset file and mine every column with missing values
pub fn mine_missing_features(path: &Path, sheet: Option<&str>) -> Result<ResultCollection> {
    let df = load_dataset(path, sheet, 10000)?;
    let results = MissingnessClassifier::new(&df)?.mine_all_columns()?;
    Ok(results)
}
