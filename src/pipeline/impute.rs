//! Numeric imputation for the independent variables
//!
//! Imputers never touch the target column; they only fill the numeric
//! features that the classifier learns from.

use polars::prelude::*;

/// Strategy used to fill missing numeric cells
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ImputeStrategy {
    /// Column mean of the observed values (default)
    #[default]
    Mean,
    /// Column median of the observed values
    Median,
    /// Most frequent observed value (smallest one on ties)
    MostFrequent,
    /// A fixed fill value
    Constant(f64),
}

impl std::fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImputeStrategy::Mean => write!(f, "mean"),
            ImputeStrategy::Median => write!(f, "median"),
            ImputeStrategy::MostFrequent => write!(f, "most_frequent"),
            ImputeStrategy::Constant(v) => write!(f, "constant:{}", v),
        }
    }
}

impl std::str::FromStr for ImputeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "mean" => Ok(ImputeStrategy::Mean),
            "median" => Ok(ImputeStrategy::Median),
            "most_frequent" | "most-frequent" | "mode" => Ok(ImputeStrategy::MostFrequent),
            other => match other.strip_prefix("constant:") {
                Some(value) => value
                    .trim()
                    .parse::<f64>()
                    .map(ImputeStrategy::Constant)
                    .map_err(|_| format!("'{}' is not a valid constant fill value", value)),
                None => Err(format!(
                    "Unknown impute strategy: '{}'. Use 'mean', 'median', 'most_frequent' or 'constant:<value>'.",
                    s
                )),
            },
        }
    }
}

/// Fills the missing cells of one numeric column.
///
/// Statistics are fitted on the column passed in, every call.
pub trait Imputer {
    fn fit_transform(&self, column: &Float64Chunked) -> Vec<f64>;
}

/// Per-column statistic imputer
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleImputer {
    pub strategy: ImputeStrategy,
}

impl SimpleImputer {
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self { strategy }
    }

    /// Fill value for the observed (non-missing) cells.
    /// Columns with nothing observed fill with 0.0.
    fn fill_value(&self, observed: &mut [f64]) -> f64 {
        if observed.is_empty() {
            return match self.strategy {
                ImputeStrategy::Constant(v) => v,
                _ => 0.0,
            };
        }

        match self.strategy {
            ImputeStrategy::Mean => observed.iter().sum::<f64>() / observed.len() as f64,
            ImputeStrategy::Median => {
                observed.sort_by(f64::total_cmp);
                let mid = observed.len() / 2;
                if observed.len() % 2 == 0 {
                    (observed[mid - 1] + observed[mid]) / 2.0
                } else {
                    observed[mid]
                }
            }
            ImputeStrategy::MostFrequent => {
                observed.sort_by(f64::total_cmp);
                let mut best = observed[0];
                let mut best_run = 0usize;
                let mut run_start = 0usize;
                for i in 1..=observed.len() {
                    if i == observed.len() || observed[i] != observed[run_start] {
                        let run = i - run_start;
                        if run > best_run {
                            best_run = run;
                            best = observed[run_start];
                        }
                        run_start = i;
                    }
                }
                best
            }
            ImputeStrategy::Constant(v) => v,
        }
    }
}

impl Imputer for SimpleImputer {
    fn fit_transform(&self, column: &Float64Chunked) -> Vec<f64> {
        let mut observed: Vec<f64> = column
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        let fill = self.fill_value(&mut observed);

        column
            .into_iter()
            .map(|v| match v {
                Some(x) if !x.is_nan() => x,
                _ => fill,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunked(values: &[Option<f64>]) -> Float64Chunked {
        Float64Chunked::from_iter_options("x".into(), values.iter().copied())
    }

    #[test]
    fn test_mean_fill() {
        let col = chunked(&[Some(1.0), None, Some(3.0)]);
        let out = SimpleImputer::default().fit_transform(&col);
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_nan_counts_as_missing() {
        let col = chunked(&[Some(2.0), Some(f64::NAN), Some(4.0)]);
        let out = SimpleImputer::default().fit_transform(&col);
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_median_fill() {
        let col = chunked(&[Some(5.0), None, Some(1.0), Some(2.0)]);
        let out = SimpleImputer::new(ImputeStrategy::Median).fit_transform(&col);
        assert_eq!(out[1], 2.0);
    }

    #[test]
    fn test_most_frequent_prefers_smallest_on_tie() {
        let col = chunked(&[Some(3.0), Some(1.0), Some(3.0), Some(1.0), None]);
        let out = SimpleImputer::new(ImputeStrategy::MostFrequent).fit_transform(&col);
        assert_eq!(out[4], 1.0);
    }

    #[test]
    fn test_all_missing_fills_zero() {
        let col = chunked(&[None, None]);
        let out = SimpleImputer::default().fit_transform(&col);
        assert_eq!(out, vec![0.0, 0.0]);
    }

    #[test]
    fn test_parse_strategies() {
        assert_eq!("mean".parse::<ImputeStrategy>().unwrap(), ImputeStrategy::Mean);
        assert_eq!("MEDIAN".parse::<ImputeStrategy>().unwrap(), ImputeStrategy::Median);
        assert_eq!(
            "constant:-1.5".parse::<ImputeStrategy>().unwrap(),
            ImputeStrategy::Constant(-1.5)
        );
        assert!("bogus".parse::<ImputeStrategy>().is_err());
    }
}
