//! Repeated hold-out evaluation of an ID3 classifier.
use crate::data::dataset::Dataset;
use crate::metrics::confusion::ConfusionMatrix;
use crate::trees::id3::Id3Classifier;
use std::collections::BTreeSet;
use std::error::Error;

pub const DEFAULT_ITERATIONS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationParams {
    iterations: usize,
    ratio: f64,
    seed: Option<u64>,
}

impl Default for EvaluationParams {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationParams {
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            ratio: 1.0,
            seed: None,
        }
    }

    pub fn set_iterations(&mut self, iterations: usize) -> Result<(), Box<dyn Error>> {
        if iterations < 1 {
            return Err("The number of iterations must be greater than 0.".into());
        }
        self.iterations = iterations;
        Ok(())
    }

    /// Sets the ratio of training records to testing records.
    pub fn set_ratio(&mut self, ratio: f64) -> Result<(), Box<dyn Error>> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err("The training to testing ratio must be a positive number.".into());
        }
        self.ratio = ratio;
        Ok(())
    }

    /// Fixes the shuffles. Trial `i` is seeded with `seed + i`.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of records in the training part of a dataset with `len` records.
    pub fn num_training(&self, len: usize) -> usize {
        (self.ratio * len as f64 / (1.0 + self.ratio)).floor() as usize
    }
}

/// Trains a copy of `classifier` on a random part of `dataset` and tests it on the rest, once
/// per iteration, tallying every (actual, predicted) pair.
///
/// # Errors
///
/// Fails if the training part is empty or a record lacks an attribute the tree needs.
pub fn evaluate(
    dataset: &Dataset,
    attrs: &BTreeSet<String>,
    classifier: &Id3Classifier,
    params: &EvaluationParams,
) -> Result<ConfusionMatrix, Box<dyn Error>> {
    let num_training = params.num_training(dataset.len());
    let mut pairs = Vec::new();

    for trial in 0..params.iterations() {
        let seed = params.seed().map(|seed| seed.wrapping_add(trial as u64));
        let (train, test) = dataset.shuffle_split(num_training, seed)?;

        let mut model = classifier.clone();
        model.fit(train.records(), attrs)?;
        let predictions = model.predict(test.records())?;

        for (record, predicted) in test.records().iter().zip(predictions) {
            pairs.push((record.get(model.class_attr())?.to_string(), predicted));
        }
    }

    Ok(ConfusionMatrix::from_pairs(pairs))
}
