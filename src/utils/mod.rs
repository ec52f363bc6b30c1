//! Shared utilities for the network implementation
//!
//! This module provides the seeded random number generator and the tanh
//! activation helpers used by propagation, training and evaluation.

pub mod activations;
pub mod rng;

pub use activations::{index_of_max, tanh, tanh_derivative};
pub use rng::SimpleRng;
