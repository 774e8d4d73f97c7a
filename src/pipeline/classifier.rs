//! Missingness mining: per-column data preparation, model fitting and scoring
//!
//! For every column with missing cells a decision tree learns to predict the
//! column's missing flag from all other columns. Numeric predictors are
//! imputed, categorical predictors are one-hot encoded, and the tree is scored
//! with F1 on a held-out partition.

use indicatif::ProgressBar;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::MinerConfig;
use super::encoder::CategoricalEncoder;
use super::features::{FeatureMatrix, FeatureName};
use super::impute::{Imputer, SimpleImputer};
use super::metrics::{f1_score, train_test_split};
use super::missing::MissingnessMask;
use super::partition::{divide_by_kind, ColumnKind};
use super::tree::{DecisionTreeClassifier, MissingnessModel};
use crate::error::{MiningError, MiningResult};
use crate::report::{ResultCollection, ResultRecord};

/// Mines a dataset for patterns of missingness
pub struct MissingnessClassifier {
    categorical: DataFrame,
    numeric: DataFrame,
    encoder: CategoricalEncoder,
    mask: MissingnessMask,
    missing_columns: Vec<String>,
    imputer: Box<dyn Imputer>,
    config: MinerConfig,
    n_rows: usize,
}

impl std::fmt::Debug for MissingnessClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MissingnessClassifier")
            .field("missing_columns", &self.missing_columns)
            .field("config", &self.config)
            .field("n_rows", &self.n_rows)
            .finish_non_exhaustive()
    }
}

impl MissingnessClassifier {
    /// Classifier with the default configuration and mean imputation
    pub fn new(data: &DataFrame) -> MiningResult<Self> {
        Self::with_config(data, MinerConfig::default())
    }

    pub fn with_config(data: &DataFrame, config: MinerConfig) -> MiningResult<Self> {
        Self::with_imputer(data, config, || Box::new(SimpleImputer::default()))
    }

    /// Classifier whose numeric imputer is built by `imputer_factory`.
    ///
    /// The factory runs once; the imputer it returns is owned by this
    /// classifier alone.
    pub fn with_imputer<F>(
        data: &DataFrame,
        config: MinerConfig,
        imputer_factory: F,
    ) -> MiningResult<Self>
    where
        F: FnOnce() -> Box<dyn Imputer>,
    {
        config.validate()?;

        let (categorical, numeric) = divide_by_kind(data, ColumnKind::Categorical)?;
        let encoder = CategoricalEncoder::new(&categorical)?;
        let mask = MissingnessMask::from_frame(data)?;
        let missing_columns = mask.missing_columns();

        log::info!(
            "Prepared {} row(s): {} categorical, {} numeric column(s), {} with missing values",
            data.height(),
            categorical.width(),
            numeric.width(),
            missing_columns.len()
        );

        Ok(Self {
            categorical,
            numeric,
            encoder,
            mask,
            missing_columns,
            imputer: imputer_factory(),
            config,
            n_rows: data.height(),
        })
    }

    /// Imputed numeric predictors, excluding `target`
    pub fn prepare_numeric_features(&self, target: &str) -> MiningResult<FeatureMatrix> {
        let mut features = FeatureMatrix::empty(self.n_rows);

        for column in self.numeric.get_columns() {
            if column.name().as_str() == target {
                continue;
            }
            let cast = column.cast(&DataType::Float64)?;
            let values = self.imputer.fit_transform(cast.f64()?);
            features.push_column(FeatureName::scalar(column.name().as_str()), values)?;
        }

        Ok(features)
    }

    /// Cached one-hot predictors, excluding `target`
    pub fn prepare_categorical_features(&self, target: &str) -> MiningResult<FeatureMatrix> {
        let mut features = FeatureMatrix::empty(self.n_rows);

        for column in self.encoder.columns() {
            if column == target {
                continue;
            }
            features = features.hconcat(self.encoder.get(column)?.clone())?;
        }

        Ok(features)
    }

    /// Feature matrix (numeric then categorical) and the missing flags of `target`
    pub fn prepare_training_data(&self, target: &str) -> MiningResult<(FeatureMatrix, Vec<bool>)> {
        let labels = self.mask.column(target)?.to_vec();
        let features = self
            .prepare_numeric_features(target)?
            .hconcat(self.prepare_categorical_features(target)?)?;
        Ok((features, labels))
    }

    /// Mine a single column, shuffling with the configured seed (or entropy)
    pub fn mine_column(&self, target: &str) -> MiningResult<ResultRecord> {
        let mut rng = self.rng();
        self.mine_column_with_rng(target, &mut rng)
    }

    /// Mine a single column using the caller's random source for the split
    pub fn mine_column_with_rng<R: Rng + ?Sized>(
        &self,
        target: &str,
        rng: &mut R,
    ) -> MiningResult<ResultRecord> {
        if !self.mask.columns().iter().any(|c| c == target) {
            return Err(MiningError::UnknownColumn(target.to_string()));
        }

        let (features, labels) = self.prepare_training_data(target)?;
        let split = train_test_split(features.n_rows(), self.config.test_fraction, rng)?;

        let train_x = features.take_rows(&split.train);
        let train_y: Vec<bool> = split.train.iter().map(|&i| labels[i]).collect();
        let test_x = features.take_rows(&split.test);
        let test_y: Vec<bool> = split.test.iter().map(|&i| labels[i]).collect();

        let mut model = DecisionTreeClassifier::new(self.config.tree);
        model.fit(&train_x, &train_y)?;
        let score = f1_score(&test_y, &model.predict(&test_x));

        log::info!(
            "Mined '{}': {} feature(s), F1 {:.3}",
            target,
            features.n_features(),
            score
        );

        Ok(ResultRecord::new(
            target,
            Box::new(model),
            features.names().to_vec(),
            score,
        ))
    }

    /// Mine every column with missing values, in dataset order
    pub fn mine_all_columns(&self) -> MiningResult<ResultCollection> {
        self.mine_all_columns_with_progress(&ProgressBar::hidden())
    }

    /// Mine every column with missing values, ticking `progress` per column
    pub fn mine_all_columns_with_progress(
        &self,
        progress: &ProgressBar,
    ) -> MiningResult<ResultCollection> {
        let mut rng = self.rng();
        let mut results = ResultCollection::new();

        for column in &self.missing_columns {
            progress.set_message(format!("Mining '{}'", column));
            results.append(self.mine_column_with_rng(column, &mut rng)?);
            progress.inc(1);
        }

        Ok(results)
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Columns with at least one missing value, in dataset order
    pub fn missing_columns(&self) -> &[String] {
        &self.missing_columns
    }

    pub fn mask(&self) -> &MissingnessMask {
        &self.mask
    }

    pub fn encoder(&self) -> &CategoricalEncoder {
        &self.encoder
    }

    pub fn categorical_data(&self) -> &DataFrame {
        &self.categorical
    }

    pub fn numeric_data(&self) -> &DataFrame {
        &self.numeric
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }
}

/// Mine every column of `data` that has missing values, using the default
/// configuration.
pub fn mine_missing(data: &DataFrame) -> MiningResult<ResultCollection> {
    MissingnessClassifier::new(data)?.mine_all_columns()
}
