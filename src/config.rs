//! Configuration structures for training
//!
//! This module provides the hyperparameters of a training run and loads them
//! from JSON files. Every field is optional in the file; missing fields take
//! the defaults of the reference MNIST setup.

use crate::error::{Error, Result};
use crate::network::{NetworkShape, Scalar};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Hidden and output layer widths of the default MNIST network.
pub const DEFAULT_LAYER_DIMS: [usize; 3] = [20, 10, 10];
pub const DEFAULT_LEARNING_RATE: Scalar = 0.005;
pub const DEFAULT_ITERATIONS: u64 = 30_000_000;
/// Matches the C library's default `rand()` seed.
pub const DEFAULT_SEED: u64 = 1;
/// Training inputs are divided by 256, evaluation inputs by 255. The two
/// differ in the reference setup and are kept apart so either convention can
/// be pinned.
pub const DEFAULT_TRAIN_PIXEL_DIVISOR: Scalar = 256.0;
pub const DEFAULT_EVAL_PIXEL_DIVISOR: Scalar = 255.0;
pub const DEFAULT_LOG_INTERVAL: u64 = 1_000_000;

/// Hyperparameters of a training run.
///
/// # Example
///
/// ```json
/// {
///   "layer_dims": [20, 10, 10],
///   "learning_rate": 0.005,
///   "iterations": 30000000,
///   "seed": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Width of every layer; the last entry is the number of classes.
    pub layer_dims: Vec<usize>,

    /// Step size of the per-example gradient descent update.
    pub learning_rate: Scalar,

    /// Number of sampled training steps.
    pub iterations: u64,

    /// Seed for parameter initialization and example sampling.
    pub seed: u64,

    /// Divisor applied to raw pixels during training.
    pub train_pixel_divisor: Scalar,

    /// Divisor applied to raw pixels during evaluation.
    pub eval_pixel_divisor: Scalar,

    /// Iterations between progress log lines (0 disables them).
    pub log_interval: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            layer_dims: DEFAULT_LAYER_DIMS.to_vec(),
            learning_rate: DEFAULT_LEARNING_RATE,
            iterations: DEFAULT_ITERATIONS,
            seed: DEFAULT_SEED,
            train_pixel_divisor: DEFAULT_TRAIN_PIXEL_DIVISOR,
            eval_pixel_divisor: DEFAULT_EVAL_PIXEL_DIVISOR,
            log_interval: DEFAULT_LOG_INTERVAL,
        }
    }
}

impl TrainingConfig {
    /// Check value ranges that the type system does not enforce.
    pub fn validate(&self) -> Result<()> {
        if self.layer_dims.is_empty() {
            return Err(Error::Config("layer_dims must list at least one layer".into()));
        }
        if self.layer_dims.contains(&0) {
            return Err(Error::Config("layer_dims must not contain zero widths".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::Config("learning_rate must be positive and finite".into()));
        }
        for (name, divisor) in [
            ("train_pixel_divisor", self.train_pixel_divisor),
            ("eval_pixel_divisor", self.eval_pixel_divisor),
        ] {
            if !(divisor.is_finite() && divisor > 0.0) {
                return Err(Error::Config(format!("{name} must be positive and finite")));
            }
        }
        Ok(())
    }

    /// Network shape for inputs of width `input_dim`.
    pub fn shape(&self, input_dim: usize) -> Result<NetworkShape> {
        NetworkShape::new(input_dim, self.layer_dims.clone())
    }
}

/// Loads a training configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into a [`TrainingConfig`] and
/// validates the result.
///
/// # Examples
///
/// ```no_run
/// use mnist_tanh_mlp::config::load_config;
///
/// let cfg = load_config("config/mnist_tanh.json").unwrap();
/// assert_eq!(cfg.layer_dims, vec![20, 10, 10]);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrainingConfig> {
    let contents = fs::read_to_string(path)?;
    let config: TrainingConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
