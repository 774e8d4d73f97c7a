//! Train/test splitting and classification scoring

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{MiningError, MiningResult};

/// Row indices of the training and held-out partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n_rows` and cut it into train and test partitions.
///
/// The test partition holds `ceil(test_fraction * n_rows)` rows, the training
/// partition the rest. Both must end up non-empty.
pub fn train_test_split<R: Rng + ?Sized>(
    n_rows: usize,
    test_fraction: f64,
    rng: &mut R,
) -> MiningResult<TrainTestSplit> {
    let n_test = (test_fraction * n_rows as f64).ceil() as usize;
    if n_test == 0 || n_test >= n_rows {
        return Err(MiningError::InsufficientRows {
            rows: n_rows,
            test_fraction,
        });
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    indices.shuffle(rng);

    let train = indices.split_off(n_test);
    Ok(TrainTestSplit {
        train,
        test: indices,
    })
}

/// Counts of the positive-class confusion matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_negatives: usize,
}

impl ConfusionCounts {
    pub fn from_labels(truth: &[bool], predicted: &[bool]) -> Self {
        let mut counts = ConfusionCounts::default();
        for (&t, &p) in truth.iter().zip(predicted) {
            match (t, p) {
                (true, true) => counts.true_positives += 1,
                (false, true) => counts.false_positives += 1,
                (true, false) => counts.false_negatives += 1,
                (false, false) => counts.true_negatives += 1,
            }
        }
        counts
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// F1 score of the positive ("is missing") class.
///
/// Computed as `2TP / (2TP + FP + FN)`, which equals the harmonic mean of
/// precision and recall; 0.0 when the denominator is zero.
pub fn f1_score(truth: &[bool], predicted: &[bool]) -> f64 {
    let c = ConfusionCounts::from_labels(truth, predicted);
    ratio(
        2 * c.true_positives,
        2 * c.true_positives + c.false_positives + c.false_negatives,
    )
}
