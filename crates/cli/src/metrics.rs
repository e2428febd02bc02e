//! Binary classification metrics for the phishing class

use crate::dataset::LabeledUrl;
use phishguard_classifier::{Classifier, Result};
use phishguard_features::{extract_features, DECISION_THRESHOLD};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, actual: u8, predicted: u8) {
        match (actual == 1, predicted == 1) {
            (true, true) => self.true_positive += 1,
            (false, true) => self.false_positive += 1,
            (false, false) => self.true_negative += 1,
            (true, false) => self.false_negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    pub fn report(&self) -> EvaluationReport {
        EvaluationReport {
            samples: self.total(),
            accuracy_percent: (self.accuracy() * 10_000.0).round() / 100.0,
            precision: self.precision(),
            recall: self.recall(),
            f1: self.f1(),
            confusion_matrix: *self,
        }
    }
}

/// Serializable evaluation summary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EvaluationReport {
    pub samples: usize,
    /// Percent, two decimals
    pub accuracy_percent: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion_matrix: ConfusionMatrix,
}

/// Score every row with `classifier` and tally the decisions
pub fn evaluate(rows: &[LabeledUrl], classifier: &dyn Classifier) -> Result<ConfusionMatrix> {
    let mut matrix = ConfusionMatrix::default();
    for row in rows {
        let features = extract_features(&row.url);
        let probability = classifier.predict_proba(features.as_slice())?;
        matrix.record(row.label, u8::from(probability >= DECISION_THRESHOLD));
    }
    Ok(matrix)
}

/// 0 when the denominator is 0
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
