//! Missing rate of one column broken down across the values of another
//!
//! Categorical features group by value (missing cells as "NaN"). Numeric
//! features group into equal-frequency bins; rows with a missing feature value
//! form their own "NaN" group.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;

use super::encoder::{category_labels, MISSING_LABEL};
use super::missing::missing_flags;
use super::partition::ColumnKind;
use crate::error::{MiningError, MiningResult};

/// Default number of equal-frequency bins for numeric features
pub const DEFAULT_BREAKDOWN_BINS: usize = 10;

/// Missing statistics for one group of rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMissingRate {
    pub label: String,
    pub rows: usize,
    pub missing: usize,
    pub rate: f64,
}

impl GroupMissingRate {
    fn from_flags<'a>(label: String, flags: impl Iterator<Item = &'a bool>) -> Self {
        let (rows, missing) = flags.fold((0usize, 0usize), |(r, m), &f| (r + 1, m + f as usize));
        Self {
            label,
            rows,
            missing,
            rate: if rows > 0 {
                missing as f64 / rows as f64
            } else {
                0.0
            },
        }
    }
}

/// Missing rate of `missing_column` per group of `feature_column`
#[derive(Debug, Clone, Serialize)]
pub struct MissingBreakdown {
    pub missing_column: String,
    pub feature_column: String,
    pub feature_kind: ColumnKind,
    pub overall: GroupMissingRate,
    pub groups: Vec<GroupMissingRate>,
}

pub fn missing_rate_by_group(
    df: &DataFrame,
    missing_column: &str,
    feature_column: &str,
    n_bins: usize,
) -> MiningResult<MissingBreakdown> {
    if n_bins == 0 {
        return Err(MiningError::InvalidConfig(
            "number of bins must be at least 1".to_string(),
        ));
    }

    let missing = missing_flags(lookup(df, missing_column)?)?;
    let feature = lookup(df, feature_column)?;
    let feature_kind = ColumnKind::of(feature.dtype());

    let groups = match feature_kind {
        ColumnKind::Categorical => categorical_groups(feature, &missing)?,
        ColumnKind::Numeric => numeric_groups(feature, &missing, n_bins)?,
    };

    Ok(MissingBreakdown {
        missing_column: missing_column.to_string(),
        feature_column: feature_column.to_string(),
        feature_kind,
        overall: GroupMissingRate::from_flags("All".to_string(), missing.iter()),
        groups,
    })
}

fn lookup<'a>(df: &'a DataFrame, name: &str) -> MiningResult<&'a Column> {
    df.column(name)
        .map_err(|_| MiningError::UnknownColumn(name.to_string()))
}

fn categorical_groups(feature: &Column, missing: &[bool]) -> MiningResult<Vec<GroupMissingRate>> {
    let labels = category_labels(feature)?;

    let mut grouped: BTreeMap<String, Vec<bool>> = BTreeMap::new();
    for (label, &flag) in labels.into_iter().zip(missing) {
        grouped.entry(label).or_default().push(flag);
    }

    Ok(grouped
        .into_iter()
        .map(|(label, flags)| GroupMissingRate::from_flags(label, flags.iter()))
        .collect())
}

fn numeric_groups(
    feature: &Column,
    missing: &[bool],
    n_bins: usize,
) -> MiningResult<Vec<GroupMissingRate>> {
    let cast = feature.cast(&DataType::Float64)?;

    let mut observed: Vec<(f64, bool)> = Vec::new();
    let mut unobserved: Vec<bool> = Vec::new();
    for (value, &flag) in cast.f64()?.into_iter().zip(missing) {
        match value {
            Some(v) if !v.is_nan() => observed.push((v, flag)),
            _ => unobserved.push(flag),
        }
    }
    observed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = observed.len();
    let bin_size = n.div_ceil(n_bins).max(1);
    let mut groups = Vec::new();
    let mut start = 0;

    while start < n {
        let mut end = (start + bin_size).min(n);
        // Equal values always share a bin
        while end < n && observed[end].0 == observed[end - 1].0 {
            end += 1;
        }

        let lower = observed[start].0;
        let label = if end < n {
            format!("[{:.3}, {:.3})", lower, observed[end].0)
        } else {
            format!("[{:.3}, {:.3}]", lower, observed[end - 1].0)
        };
        groups.push(GroupMissingRate::from_flags(
            label,
            observed[start..end].iter().map(|(_, f)| f),
        ));
        start = end;
    }

    if !unobserved.is_empty() {
        groups.push(GroupMissingRate::from_flags(
            MISSING_LABEL.to_string(),
            unobserved.iter(),
        ));
    }

    Ok(groups)
}
