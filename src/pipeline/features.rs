//! Feature names and the column-major feature matrix fed to the classifier

use std::fmt;

use crate::error::{MiningError, MiningResult};

/// Name of a single model input feature.
///
/// Numeric features keep their column name. One-hot indicators carry the
/// pair of source column and category value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureName {
    Scalar(String),
    Category { variable: String, value: String },
}

impl FeatureName {
    pub fn scalar(name: impl Into<String>) -> Self {
        FeatureName::Scalar(name.into())
    }

    pub fn category(variable: impl Into<String>, value: impl Into<String>) -> Self {
        FeatureName::Category {
            variable: variable.into(),
            value: value.into(),
        }
    }

    /// Source column this feature was derived from
    pub fn variable(&self) -> &str {
        match self {
            FeatureName::Scalar(name) => name,
            FeatureName::Category { variable, .. } => variable,
        }
    }
}

/// Human readable form: `Variable:X` or `Variable:X, Value:Y`
impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureName::Scalar(name) => write!(f, "Variable:{}", name),
            FeatureName::Category { variable, value } => {
                write!(f, "Variable:{}, Value:{}", variable, value)
            }
        }
    }
}

/// Dense numeric features stored column by column.
///
/// Every column has exactly `n_rows` values. A matrix may have zero columns
/// and still carry a row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    n_rows: usize,
    names: Vec<FeatureName>,
    columns: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// A matrix with `n_rows` rows and no feature columns
    pub fn empty(n_rows: usize) -> Self {
        Self {
            n_rows,
            names: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Append a feature column, checking it is row-aligned with the matrix
    pub fn push_column(&mut self, name: FeatureName, values: Vec<f64>) -> MiningResult<()> {
        if values.len() != self.n_rows {
            return Err(MiningError::RowMismatch {
                feature: name.to_string(),
                expected: self.n_rows,
                actual: values.len(),
            });
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// Column-wise concatenation (`self` columns first, then `other`)
    pub fn hconcat(mut self, other: FeatureMatrix) -> MiningResult<FeatureMatrix> {
        if other.n_rows != self.n_rows {
            let feature = other
                .names
                .first()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "<empty>".to_string());
            return Err(MiningError::RowMismatch {
                feature,
                expected: self.n_rows,
                actual: other.n_rows,
            });
        }
        self.names.extend(other.names);
        self.columns.extend(other.columns);
        Ok(self)
    }

    /// Rows selected by index, in the order given
    pub fn take_rows(&self, indices: &[usize]) -> FeatureMatrix {
        FeatureMatrix {
            n_rows: indices.len(),
            names: self.names.clone(),
            columns: self
                .columns
                .iter()
                .map(|col| indices.iter().map(|&i| col[i]).collect())
                .collect(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> &[FeatureName] {
        &self.names
    }

    pub fn column(&self, index: usize) -> &[f64] {
        &self.columns[index]
    }

    #[inline]
    pub fn value(&self, row: usize, feature: usize) -> f64 {
        self.columns[feature][row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scalar_feature() {
        assert_eq!(FeatureName::scalar("A").to_string(), "Variable:A");
    }

    #[test]
    fn test_format_category_feature() {
        assert_eq!(
            FeatureName::category("A", "1").to_string(),
            "Variable:A, Value:1"
        );
    }

    #[test]
    fn test_push_column_rejects_wrong_length() {
        let mut matrix = FeatureMatrix::empty(3);
        let err = matrix
            .push_column(FeatureName::scalar("x"), vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, MiningError::RowMismatch { expected: 3, actual: 2, .. }));
        assert_eq!(matrix.n_features(), 0);
    }

    #[test]
    fn test_hconcat_keeps_order() {
        let mut left = FeatureMatrix::empty(2);
        left.push_column(FeatureName::scalar("a"), vec![1.0, 2.0]).unwrap();
        let mut right = FeatureMatrix::empty(2);
        right
            .push_column(FeatureName::category("b", "x"), vec![0.0, 1.0])
            .unwrap();

        let joined = left.hconcat(right).unwrap();
        assert_eq!(joined.n_features(), 2);
        assert_eq!(joined.names()[0], FeatureName::scalar("a"));
        assert_eq!(joined.value(1, 1), 1.0);
    }

    #[test]
    fn test_hconcat_empty_matrices() {
        let joined = FeatureMatrix::empty(4).hconcat(FeatureMatrix::empty(4)).unwrap();
        assert_eq!(joined.n_rows(), 4);
        assert_eq!(joined.n_features(), 0);
    }

    #[test]
    fn test_take_rows() {
        let mut matrix = FeatureMatrix::empty(3);
        matrix
            .push_column(FeatureName::scalar("a"), vec![10.0, 20.0, 30.0])
            .unwrap();
        let subset = matrix.take_rows(&[2, 0]);
        assert_eq!(subset.n_rows(), 2);
        assert_eq!(subset.column(0), &[30.0, 10.0]);
    }
}
