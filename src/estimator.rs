//! Yield Estimator
//!
//! Gradient-boosted ensemble regressor over the four environmental features.
//! Fitted exactly once at startup on a seeded 80/20 train/test split and held
//! read-only for the process lifetime; handlers share it behind an `Arc`.

use anyhow::{anyhow, bail, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec, ValueType};
use gbdt::gradient_boost::GBDT;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::TrainingRecord;

/// Number of trees in the ensemble.
const ENSEMBLE_SIZE: usize = 100;

/// Fraction of rows held out for evaluation.
const TEST_FRACTION: f64 = 0.2;

/// Fixed seed so the split (and therefore the model) is reproducible.
const SPLIT_SEED: u64 = 42;

/// Fewer rows than this and the holdout split degenerates.
const MIN_TRAINING_ROWS: usize = 10;

pub struct YieldEstimator {
    model: GBDT,
}

impl YieldEstimator {
    /// Fit the ensemble and log the holdout mean squared error.
    ///
    /// Fails if the dataset is too small to split. A failure here is fatal at
    /// startup; there is no lazily-trained fallback.
    pub fn fit(records: &[TrainingRecord]) -> Result<Self> {
        if records.len() < MIN_TRAINING_ROWS {
            bail!(
                "Training dataset has {} usable rows, need at least {}",
                records.len(),
                MIN_TRAINING_ROWS
            );
        }

        let mut indices: Vec<usize> = (0..records.len()).collect();
        let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
        indices.shuffle(&mut rng);

        let test_len = ((records.len() as f64) * TEST_FRACTION).round().max(1.0) as usize;
        let (test_idx, train_idx) = indices.split_at(test_len);

        let mut train: DataVec = train_idx
            .iter()
            .map(|&i| {
                Data::new_training_data(
                    feature_vec(&records[i]),
                    1.0,
                    records[i].crop_yield as ValueType,
                    None,
                )
            })
            .collect();

        let mut cfg = Config::new();
        cfg.set_feature_size(4);
        cfg.set_max_depth(4);
        cfg.set_iterations(ENSEMBLE_SIZE);
        cfg.set_shrinkage(0.1);
        cfg.set_loss("SquaredError");
        cfg.set_training_optimization_level(2);

        let mut model = GBDT::new(&cfg);
        model.fit(&mut train);

        // Holdout evaluation, mirroring the startup MSE report
        let test: DataVec = test_idx
            .iter()
            .map(|&i| Data::new_test_data(feature_vec(&records[i]), None))
            .collect();
        let predictions = model.predict(&test);
        let mse: f64 = test_idx
            .iter()
            .zip(predictions.iter())
            .map(|(&i, &p)| {
                let err = f64::from(p) - records[i].crop_yield;
                err * err
            })
            .sum::<f64>()
            / test_idx.len().max(1) as f64;

        tracing::info!(
            "Fitted yield estimator: {} trees, {} train rows, {} holdout rows, MSE {:.4}",
            ENSEMBLE_SIZE,
            train_idx.len(),
            test_idx.len(),
            mse
        );

        Ok(Self { model })
    }

    /// Predict the yield for one feature tuple, rounded to 2 decimals.
    ///
    /// Errors if the ensemble yields no prediction for the sample, rather
    /// than letting that case pass as a zero yield.
    pub fn predict(
        &self,
        rainfall: f64,
        temperature: f64,
        soil_ph: f64,
        fertilizer_use: f64,
    ) -> Result<f64> {
        let sample = Data::new_test_data(
            vec![
                rainfall as ValueType,
                temperature as ValueType,
                soil_ph as ValueType,
                fertilizer_use as ValueType,
            ],
            None,
        );

        let predictions = self.model.predict(&vec![sample]);
        let raw = predictions
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Ensemble returned no prediction for the sample"))?;
        Ok(round2(f64::from(raw)))
    }
}

fn feature_vec(record: &TrainingRecord) -> Vec<ValueType> {
    record.features().iter().map(|&v| v as ValueType).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
