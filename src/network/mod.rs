//! Network representation and the forward/backward algorithms
//!
//! This module provides the layer geometry ([`NetworkShape`]), the parameter
//! arena ([`NetworkParams`]), the reusable scratch storage ([`SignalBuffer`])
//! and the numerical routines that run on them.
//!
//! # Example
//!
//! ```
//! use mnist_tanh_mlp::network::{feed_forward, learn, NetworkParams, NetworkShape, SignalBuffer};
//! use mnist_tanh_mlp::utils::SimpleRng;
//!
//! let shape = NetworkShape::new(2, vec![3, 1]).unwrap();
//! let mut params = NetworkParams::new(&shape).unwrap();
//! params.randomize(&mut SimpleRng::new(1));
//! let mut signals = SignalBuffer::new(&shape).unwrap();
//!
//! learn(&shape, &[0.5, -0.5], &[1.0], 0.01, &mut params, &mut signals);
//! feed_forward(&shape, &params, &[0.5, -0.5], &mut signals);
//! assert_eq!(signals.output().len(), 1);
//! ```

mod backward;
mod forward;
mod params;
mod shape;
mod signals;

pub use backward::{back_propagate, back_propagate_in_place, learn};
pub use forward::feed_forward;
pub use params::NetworkParams;
pub use shape::NetworkShape;
pub use signals::SignalBuffer;

use crate::error::{Error, Result};

/// Floating-point type of every weight, bias and signal.
pub type Scalar = f32;

/// Allocate `len` zeroed scalars, reporting failure instead of aborting.
pub(crate) fn alloc_scalars(len: usize) -> Result<Vec<Scalar>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| Error::Allocation { len })?;
    buffer.resize(len, 0.0);
    Ok(buffer)
}
