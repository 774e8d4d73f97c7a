//! Mining results: one record per mined column, and the ordered collection
//! that renders them as plain text or markdown.

use std::any::Any;
use std::fmt;

use comfy_table::{presets::ASCII_MARKDOWN, Table};

use crate::error::{MiningError, MiningResult};
use crate::pipeline::{FeatureName, MissingnessModel};

/// Default number of features listed per column in markdown reports
pub const DEFAULT_TOP_FEATURES: usize = 5;

/// Outcome of mining one column. Immutable once created.
#[derive(Debug)]
pub struct ResultRecord {
    variable: String,
    model: Box<dyn MissingnessModel>,
    features: Vec<FeatureName>,
    score: f64,
}

impl ResultRecord {
    pub fn new(
        variable: impl Into<String>,
        model: Box<dyn MissingnessModel>,
        features: Vec<FeatureName>,
        score: f64,
    ) -> Self {
        Self {
            variable: variable.into(),
            model,
            features,
            score,
        }
    }

    /// The mined (target) column
    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn model(&self) -> &dyn MissingnessModel {
        self.model.as_ref()
    }

    /// Model input features, in training order
    pub fn features(&self) -> &[FeatureName] {
        &self.features
    }

    /// F1 score on the held-out partition
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Features paired with their importance, most important first.
    /// Ties keep training order.
    pub fn ranked_features(&self) -> Vec<(&FeatureName, f64)> {
        let mut ranked: Vec<(&FeatureName, f64)> = self
            .features
            .iter()
            .zip(self.model.feature_importances().iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Ordered collection of `ResultRecord`s, in mining order.
///
/// Items arriving without static type information go through `try_append`
/// and `try_extend`, which reject anything that is not a `ResultRecord` and
/// leave the collection untouched on failure.
#[derive(Debug, Default)]
pub struct ResultCollection {
    records: Vec<ResultRecord>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    /// Build a collection from dynamically typed items
    pub fn try_from_items<I>(items: I) -> MiningResult<Self>
    where
        I: IntoIterator<Item = Box<dyn Any>>,
    {
        let mut collection = Self::new();
        collection.try_extend(items)?;
        Ok(collection)
    }

    pub fn append(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    /// Append `item` if it is a `ResultRecord`
    pub fn try_append(&mut self, item: Box<dyn Any>) -> MiningResult<()> {
        self.records.push(downcast_record(item)?);
        Ok(())
    }

    /// Merge `items` in place. Every item is checked before any is added.
    pub fn try_extend<I>(&mut self, items: I) -> MiningResult<()>
    where
        I: IntoIterator<Item = Box<dyn Any>>,
    {
        let validated = items
            .into_iter()
            .map(downcast_record)
            .collect::<MiningResult<Vec<_>>>()?;
        self.records.extend(validated);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResultRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    /// Plain text report: every feature of every record, by importance
    pub fn render(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&format!("Column: {}\n", record.variable()));
            out.push_str(&format!("F1-score: {:.3}\n", record.score()));
            for (feature, importance) in record.ranked_features() {
                out.push_str(&format!("{}: {:.3}\n", feature, importance));
            }
            out.push('\n');
        }
        out
    }

    /// Markdown report with the `top_k` most important features per record
    pub fn render_markdown(&self, top_k: usize) -> String {
        let mut out = String::new();
        for record in &self.records {
            let mut table = Table::new();
            table.load_preset(ASCII_MARKDOWN);
            table.set_header(vec!["Feature", "Feature Importance"]);
            for (feature, importance) in record.ranked_features().into_iter().take(top_k) {
                table.add_row(vec![feature.to_string(), format!("{:.3}", importance)]);
            }

            out.push_str(&format!("## Column: {}\n", record.variable()));
            out.push_str(&format!("### F1-score: {:.3}\n", record.score()));
            out.push_str(&table.to_string());
            out.push_str("\n\n");
        }
        out
    }
}

fn downcast_record(item: Box<dyn Any>) -> MiningResult<ResultRecord> {
    item.downcast::<ResultRecord>()
        .map(|record| *record)
        .map_err(|_| MiningError::TypeMismatch {
            expected: "ResultRecord",
        })
}

impl fmt::Display for ResultCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Extend<ResultRecord> for ResultCollection {
    fn extend<T: IntoIterator<Item = ResultRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl FromIterator<ResultRecord> for ResultCollection {
    fn from_iter<T: IntoIterator<Item = ResultRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ResultCollection {
    type Item = ResultRecord;
    type IntoIter = std::vec::IntoIter<ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
