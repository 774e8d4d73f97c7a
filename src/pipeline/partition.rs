//! Column partitioning by declared kind

use polars::prelude::*;
use serde::Serialize;

use crate::error::MiningResult;

/// Declared kind of a dataset column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    /// Kind of a column with the given dtype.
    ///
    /// Text, categorical, enum and boolean columns are categorical; everything
    /// else is treated as numeric.
    pub fn of(dtype: &DataType) -> Self {
        match dtype {
            DataType::String
            | DataType::Boolean
            | DataType::Categorical(..)
            | DataType::Enum(..) => ColumnKind::Categorical,
            _ => ColumnKind::Numeric,
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Split `df` into the columns of `kind` and the remainder.
///
/// Both frames keep the original column order. Either may be empty.
pub fn divide_by_kind(df: &DataFrame, kind: ColumnKind) -> MiningResult<(DataFrame, DataFrame)> {
    let mut matching: Vec<String> = Vec::new();
    let mut rest: Vec<String> = Vec::new();

    for column in df.get_columns() {
        if ColumnKind::of(column.dtype()) == kind {
            matching.push(column.name().to_string());
        } else {
            rest.push(column.name().to_string());
        }
    }

    Ok((df.select(matching)?, df.select(rest)?))
}

/// Names of the columns in `df`, in order
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}
