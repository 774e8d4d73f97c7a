//! CART decision tree classifier for the "is missing" label
//!
//! Splits are chosen by Gini impurity reduction over the midpoints between
//! distinct sorted feature values. Feature importance is the total weighted
//! impurity decrease a feature contributes, normalised to sum to 1.

use std::fmt;

use super::config::TreeParams;
use super::features::FeatureMatrix;
use crate::error::{MiningError, MiningResult};

/// Values closer than this are treated as equal when placing thresholds
const VALUE_TOLERANCE: f64 = 1e-10;

/// Gains at or below this are not worth a split
const MIN_GAIN: f64 = 1e-12;

/// A fitted model that predicts missingness and explains itself through
/// per-feature importance scores.
///
/// Importances are aligned with the feature order the model was trained on.
pub trait MissingnessModel: fmt::Debug {
    /// Predict the "is missing" label of every row
    fn predict(&self, features: &FeatureMatrix) -> Vec<bool>;

    /// One importance score per training feature
    fn feature_importances(&self) -> &[f64];

    /// Short model identifier used in reports
    fn name(&self) -> &str {
        "model"
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        positives: usize,
        negatives: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Best split found for a node
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Binary decision tree classifier
#[derive(Debug, Clone, Default)]
pub struct DecisionTreeClassifier {
    params: TreeParams,
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

impl DecisionTreeClassifier {
    pub fn new(params: TreeParams) -> Self {
        Self {
            params,
            nodes: Vec::new(),
            importances: Vec::new(),
        }
    }

    /// Fit the tree on `features` and boolean `labels`.
    ///
    /// A matrix with zero feature columns is accepted: the tree is a single
    /// leaf predicting the majority label and the importance vector is empty.
    pub fn fit(&mut self, features: &FeatureMatrix, labels: &[bool]) -> MiningResult<()> {
        if labels.len() != features.n_rows() {
            return Err(MiningError::RowMismatch {
                feature: "<labels>".to_string(),
                expected: features.n_rows(),
                actual: labels.len(),
            });
        }
        if labels.is_empty() {
            return Err(MiningError::EmptyTrainingSet);
        }

        self.nodes.clear();
        self.importances = vec![0.0; features.n_features()];

        let indices: Vec<usize> = (0..labels.len()).collect();
        self.grow(features, labels, &indices, 0);

        let total: f64 = self.importances.iter().sum();
        if total > 0.0 {
            for importance in &mut self.importances {
                *importance /= total;
            }
        }

        log::debug!(
            "Fitted decision tree: {} node(s), depth {}, {} feature(s)",
            self.nodes.len(),
            self.depth(),
            features.n_features()
        );
        Ok(())
    }

    fn grow(
        &mut self,
        features: &FeatureMatrix,
        labels: &[bool],
        indices: &[usize],
        depth: usize,
    ) -> usize {
        let positives = indices.iter().filter(|&&i| labels[i]).count();
        let negatives = indices.len() - positives;

        let node_id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            positives,
            negatives,
        });

        let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
        if depth_reached
            || indices.len() < self.params.min_samples_split
            || positives == 0
            || negatives == 0
        {
            return node_id;
        }

        let Some(split) = find_best_split(features, labels, indices, self.params.min_samples_leaf)
        else {
            return node_id;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| features.value(i, split.feature) <= split.threshold);

        self.importances[split.feature] += indices.len() as f64 * split.gain;

        let left = self.grow(features, labels, &left_rows, depth + 1);
        let right = self.grow(features, labels, &right_rows, depth + 1);
        self.nodes[node_id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };

        node_id
    }

    fn predict_row(&self, features: &FeatureMatrix, row: usize) -> bool {
        let mut node_id = 0;
        loop {
            match self.nodes.get(node_id) {
                Some(Node::Leaf {
                    positives,
                    negatives,
                }) => return positives > negatives,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    node_id = if features.value(row, *feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                None => return false,
            }
        }
    }

    /// Longest root-to-leaf path (a single leaf has depth 0)
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match nodes.get(id) {
                Some(Node::Split { left, right, .. }) => {
                    1 + walk(nodes, *left).max(walk(nodes, *right))
                }
                _ => 0,
            }
        }
        walk(&self.nodes, 0)
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn is_fitted(&self) -> bool {
        !self.nodes.is_empty()
    }
}

impl MissingnessModel for DecisionTreeClassifier {
    fn predict(&self, features: &FeatureMatrix) -> Vec<bool> {
        (0..features.n_rows())
            .map(|row| self.predict_row(features, row))
            .collect()
    }

    fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    fn name(&self) -> &str {
        "decision_tree"
    }
}

/// Gini impurity of a binary node: `2 * p * (1 - p)`
fn gini_impurity(events: f64, non_events: f64) -> f64 {
    let total = events + non_events;
    if total == 0.0 {
        return 0.0;
    }
    let p = events / total;
    2.0 * p * (1.0 - p)
}

/// Search every feature for the threshold with the largest impurity reduction
fn find_best_split(
    features: &FeatureMatrix,
    labels: &[bool],
    indices: &[usize],
    min_samples_leaf: usize,
) -> Option<SplitCandidate> {
    let n = indices.len();
    let total_events = indices.iter().filter(|&&i| labels[i]).count() as f64;
    let total_non_events = n as f64 - total_events;
    let parent_gini = gini_impurity(total_events, total_non_events);

    let mut best: Option<SplitCandidate> = None;
    let mut sorted: Vec<(f64, bool)> = Vec::with_capacity(n);

    for feature in 0..features.n_features() {
        sorted.clear();
        sorted.extend(indices.iter().map(|&i| (features.value(i, feature), labels[i])));
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_events = 0.0f64;
        let mut left_non_events = 0.0f64;

        for i in 0..n - 1 {
            if sorted[i].1 {
                left_events += 1.0;
            } else {
                left_non_events += 1.0;
            }

            let left_count = i + 1;
            let right_count = n - left_count;
            if left_count < min_samples_leaf || right_count < min_samples_leaf {
                continue;
            }

            // Never split between equal values
            if (sorted[i].0 - sorted[i + 1].0).abs() < VALUE_TOLERANCE {
                continue;
            }

            let right_events = total_events - left_events;
            let right_non_events = total_non_events - left_non_events;

            let left_prop = left_count as f64 / n as f64;
            let right_prop = right_count as f64 / n as f64;
            let weighted_child_gini = left_prop * gini_impurity(left_events, left_non_events)
                + right_prop * gini_impurity(right_events, right_non_events);

            let gain = parent_gini - weighted_child_gini;
            if gain > MIN_GAIN && best.map_or(true, |b| gain > b.gain) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (sorted[i].0 + sorted[i + 1].0) / 2.0,
                    gain,
                });
            }
        }
    }

    best
}
