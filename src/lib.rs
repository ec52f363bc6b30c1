//! MNIST tanh multilayer perceptron
//!
//! This library trains a small fully connected network with tanh activations
//! by per-example stochastic gradient descent, and evaluates it by counting
//! misclassifications.
//!
//! # Modules
//!
//! - `network`: shape, parameter arena, signal buffers, forward and backward passes
//! - `training`: sampled training loop and exhaustive evaluation
//! - `dataset`: raw image/label buffers and pixel normalization
//! - `idx`: reader for the IDX files MNIST ships in
//! - `config`: training hyperparameters loaded from JSON
//! - `error`: crate-wide error type
//! - `utils`: seeded RNG and activation helpers

pub mod config;
pub mod dataset;
pub mod error;
pub mod idx;
pub mod network;
pub mod training;
pub mod utils;

pub use error::{Error, Result};
