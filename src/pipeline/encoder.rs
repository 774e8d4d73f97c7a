//! One-hot encoding of categorical columns, cached per column
//!
//! Missing cells become the explicit category `"NaN"` before binarization.
//! Categories are ordered lexically. A column with exactly two categories
//! collapses to a single indicator for the second category; a column with a
//! single category encodes to one all-zero indicator.

use std::collections::{BTreeSet, HashMap};

use polars::prelude::*;

use super::features::{FeatureMatrix, FeatureName};
use crate::error::{MiningError, MiningResult};

/// Label given to missing cells of a categorical column
pub const MISSING_LABEL: &str = "NaN";

/// Cached one-hot encodings for every column of a categorical frame
#[derive(Debug, Clone, Default)]
pub struct CategoricalEncoder {
    columns: Vec<String>,
    frames: HashMap<String, FeatureMatrix>,
}

impl CategoricalEncoder {
    /// Encode every column of `data` up front
    pub fn new(data: &DataFrame) -> MiningResult<Self> {
        let mut columns = Vec::with_capacity(data.width());
        let mut frames = HashMap::with_capacity(data.width());

        for column in data.get_columns() {
            let name = column.name().to_string();
            let encoded = binarize_column(column)?;
            log::debug!(
                "Encoded '{}' into {} indicator column(s)",
                name,
                encoded.n_features()
            );
            frames.insert(name.clone(), encoded);
            columns.push(name);
        }

        Ok(Self { columns, frames })
    }

    /// Cached encoding of `column`
    pub fn get(&self, column: &str) -> MiningResult<&FeatureMatrix> {
        self.frames
            .get(column)
            .ok_or_else(|| MiningError::UnknownColumn(column.to_string()))
    }

    /// Encoded column names, in dataset order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Convert a single categorical column to its indicator representation
pub fn binarize_column(column: &Column) -> MiningResult<FeatureMatrix> {
    let name = column.name().to_string();
    let labels = category_labels(column)?;

    let classes: Vec<&str> = labels
        .iter()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let encoded_classes: &[&str] = if classes.len() == 2 {
        &classes[1..]
    } else {
        &classes
    };

    let single_class = classes.len() == 1;

    let mut encoded = FeatureMatrix::empty(labels.len());
    for class in encoded_classes {
        let indicator: Vec<f64> = labels
            .iter()
            .map(|label| if label == class && !single_class { 1.0 } else { 0.0 })
            .collect();
        encoded.push_column(FeatureName::category(name.as_str(), *class), indicator)?;
    }

    Ok(encoded)
}

/// Cell values as strings, with missing cells labelled `"NaN"`
pub(crate) fn category_labels(column: &Column) -> MiningResult<Vec<String>> {
    let fill = |v: Option<String>| v.unwrap_or_else(|| MISSING_LABEL.to_string());

    let labels = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .map(|v| fill(v.map(|s| s.to_string())))
            .collect(),
        DataType::Boolean => column
            .bool()?
            .into_iter()
            .map(|v| fill(v.map(|b| b.to_string())))
            .collect(),
        _ => {
            let cast = column.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| fill(v.map(|s| s.to_string())))
                .collect()
        }
    };

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_sums(matrix: &FeatureMatrix) -> Vec<f64> {
        (0..matrix.n_rows())
            .map(|r| (0..matrix.n_features()).map(|c| matrix.value(r, c)).sum())
            .collect()
    }

    #[test]
    fn test_three_categories_identity() {
        let column = Column::new("Test".into(), &["A", "B", "C"]);
        let encoded = binarize_column(&column).unwrap();

        assert_eq!(encoded.n_features(), 3);
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert_eq!(encoded.value(r, c), expected);
            }
        }
    }

    #[test]
    fn test_missing_becomes_nan_category() {
        let column = Column::new("Test".into(), &[Some("A"), Some("B"), Some("C"), None]);
        let encoded = binarize_column(&column).unwrap();

        assert!(encoded
            .names()
            .contains(&FeatureName::category("Test", "NaN")));
        assert_eq!(encoded.n_features(), 4);
        assert!(row_sums(&encoded).iter().all(|&s| s == 1.0));
    }

    #[test]
    fn test_binary_collapse_keeps_second_class() {
        let column = Column::new("Flag".into(), &["no", "yes", "yes", "no"]);
        let encoded = binarize_column(&column).unwrap();

        assert_eq!(encoded.n_features(), 1);
        assert_eq!(encoded.names()[0], FeatureName::category("Flag", "yes"));
        assert_eq!(encoded.column(0), &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_binary_collapse_with_missing() {
        // "A" and "NaN" are the two classes; "NaN" sorts second
        let column = Column::new("M".into(), &[Some("A"), None, Some("A")]);
        let encoded = binarize_column(&column).unwrap();

        assert_eq!(encoded.n_features(), 1);
        assert_eq!(encoded.names()[0], FeatureName::category("M", "NaN"));
        assert_eq!(encoded.column(0), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_single_category_is_one_zero_column() {
        let column = Column::new("Const".into(), &["A", "A", "A"]);
        let encoded = binarize_column(&column).unwrap();

        assert_eq!(encoded.n_features(), 1);
        assert_eq!(encoded.names()[0], FeatureName::category("Const", "A"));
        assert_eq!(encoded.column(0), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_column_lookup() {
        let df = df! { "A" => ["x", "y"] }.unwrap();
        let encoder = CategoricalEncoder::new(&df).unwrap();
        let err = encoder.get("Z").unwrap_err();
        assert!(matches!(err, MiningError::UnknownColumn(ref c) if c == "Z"));
    }
}
