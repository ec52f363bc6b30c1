//! Per-layer scratch storage for forward and backward passes
//!
//! Activations and signal gradients share one offset table; each lives in a
//! single contiguous buffer. A buffer is allocated once per run and reused for
//! every example, so nothing is allocated inside the training loop.

use super::{alloc_scalars, NetworkShape, Scalar};
use crate::error::{Error, Result};

/// Activations and signal gradients of every layer.
#[derive(Debug, Clone)]
pub struct SignalBuffer {
    /// `offsets[l]..offsets[l + 1]` is layer `l`'s slice; one entry per layer plus one.
    offsets: Vec<usize>,
    pub(crate) activations: Vec<Scalar>,
    pub(crate) gradients: Vec<Scalar>,
}

impl SignalBuffer {
    /// Allocate activation and gradient storage for `shape`.
    pub fn new(shape: &NetworkShape) -> Result<Self> {
        let mut offsets = Vec::with_capacity(shape.layer_count() + 1);
        let mut total: usize = 0;
        offsets.push(total);
        for &dim in shape.layer_dims() {
            total = total
                .checked_add(dim)
                .ok_or(Error::SizeOverflow("signal buffer"))?;
            offsets.push(total);
        }

        Ok(Self {
            offsets,
            activations: alloc_scalars(total)?,
            gradients: alloc_scalars(total)?,
        })
    }

    pub fn layer_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Whether this buffer was allocated for `shape`.
    pub fn is_shaped_like(&self, shape: &NetworkShape) -> bool {
        self.layer_count() == shape.layer_count()
            && shape
                .layer_dims()
                .iter()
                .enumerate()
                .all(|(layer, &dim)| self.offsets[layer + 1] - self.offsets[layer] == dim)
    }

    /// Activations of `layer` from the most recent forward pass.
    pub fn activations(&self, layer: usize) -> &[Scalar] {
        &self.activations[self.range(layer)]
    }

    /// Signal gradients of `layer` from the most recent backward pass.
    pub fn gradients(&self, layer: usize) -> &[Scalar] {
        &self.gradients[self.range(layer)]
    }

    /// Activations of the last layer.
    pub fn output(&self) -> &[Scalar] {
        self.activations(self.layer_count() - 1)
    }

    pub(crate) fn range(&self, layer: usize) -> std::ops::Range<usize> {
        self.offsets[layer]..self.offsets[layer + 1]
    }
}
