//! Missingness mask and missing value analysis

use polars::prelude::*;

use crate::error::{MiningError, MiningResult};

/// Boolean table marking every absent cell of a dataset.
///
/// A cell is absent when it is null, or `NaN` in a floating-point column.
/// Built once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MissingnessMask {
    n_rows: usize,
    columns: Vec<String>,
    flags: Vec<Vec<bool>>,
}

impl MissingnessMask {
    pub fn from_frame(df: &DataFrame) -> MiningResult<Self> {
        let mut columns = Vec::with_capacity(df.width());
        let mut flags = Vec::with_capacity(df.width());

        for column in df.get_columns() {
            columns.push(column.name().to_string());
            flags.push(missing_flags(column)?);
        }

        Ok(Self {
            n_rows: df.height(),
            columns,
            flags,
        })
    }

    /// Missing flags of one column
    pub fn column(&self, name: &str) -> MiningResult<&[bool]> {
        self.position(name).map(|i| self.flags[i].as_slice())
    }

    pub fn missing_count(&self, name: &str) -> MiningResult<usize> {
        Ok(self.column(name)?.iter().filter(|&&m| m).count())
    }

    /// Columns with at least one missing cell, in dataset order
    pub fn missing_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(&self.flags)
            .filter(|(_, flags)| flags.iter().any(|&m| m))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Share of missing cells per column, sorted by ratio descending
    pub fn missing_ratios(&self) -> Vec<(String, f64)> {
        if self.n_rows == 0 {
            return Vec::new();
        }

        let mut ratios: Vec<(String, f64)> = self
            .columns
            .iter()
            .zip(&self.flags)
            .map(|(name, flags)| {
                let missing = flags.iter().filter(|&&m| m).count();
                (name.clone(), missing as f64 / self.n_rows as f64)
            })
            .collect();

        ratios.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ratios
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn position(&self, name: &str) -> MiningResult<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| MiningError::UnknownColumn(name.to_string()))
    }
}

/// Per-row missing flags for a single column
pub fn missing_flags(column: &Column) -> MiningResult<Vec<bool>> {
    let flags = match column.dtype() {
        DataType::Float32 | DataType::Float64 => {
            let cast = column.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map_or(true, f64::is_nan))
                .collect()
        }
        _ => {
            let nulls = column.as_materialized_series().is_null();
            nulls.into_iter().map(|v| v.unwrap_or(false)).collect()
        }
    };
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_marks_nulls_and_nans() {
        let df = df! {
            "f" => [Some(1.0f64), None, Some(f64::NAN)],
            "s" => [Some("a"), Some("b"), None],
            "i" => [1i32, 2, 3],
        }
        .unwrap();

        let mask = MissingnessMask::from_frame(&df).unwrap();
        assert_eq!(mask.column("f").unwrap(), &[false, true, true]);
        assert_eq!(mask.column("s").unwrap(), &[false, false, true]);
        assert_eq!(mask.missing_count("i").unwrap(), 0);
        assert_eq!(mask.missing_columns(), vec!["f", "s"]);
    }

    #[test]
    fn test_unknown_column() {
        let df = df! { "a" => [1i32] }.unwrap();
        let mask = MissingnessMask::from_frame(&df).unwrap();
        assert!(matches!(
            mask.column("b"),
            Err(MiningError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_ratios_sorted_descending() {
        let df = df! {
            "low" => [Some(1i32), Some(2), Some(3), None],
            "high" => [None::<i32>, None, None, Some(4)],
            "none" => [1i32, 2, 3, 4],
        }
        .unwrap();

        let ratios = MissingnessMask::from_frame(&df).unwrap().missing_ratios();
        assert_eq!(ratios[0], ("high".to_string(), 0.75));
        assert_eq!(ratios[1], ("low".to_string(), 0.25));
        assert_eq!(ratios[2], ("none".to_string(), 0.0));
    }

    #[test]
    fn test_empty_frame() {
        let mask = MissingnessMask::from_frame(&DataFrame::empty()).unwrap();
        assert!(mask.missing_ratios().is_empty());
        assert!(mask.missing_columns().is_empty());
    }
}
