//! Layer geometry of the network
//!
//! A [`NetworkShape`] is the width of every layer plus the width of the input
//! vector that feeds layer 0. The last layer's width is the number of output
//! classes.

use crate::error::{Error, Result};

/// Layer widths and input dimension of a fully connected network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkShape {
    input_dim: usize,
    layer_dims: Vec<usize>,
}

impl NetworkShape {
    /// Create a shape, rejecting empty layer lists and zero widths.
    ///
    /// # Examples
    ///
    /// ```
    /// use mnist_tanh_mlp::network::NetworkShape;
    ///
    /// let shape = NetworkShape::new(784, vec![20, 10, 10]).unwrap();
    /// assert_eq!(shape.layer_count(), 3);
    /// assert_eq!(shape.input_width(1), 20);
    /// assert!(NetworkShape::new(784, vec![]).is_err());
    /// ```
    pub fn new(input_dim: usize, layer_dims: Vec<usize>) -> Result<Self> {
        if input_dim == 0 {
            return Err(Error::InvalidShape("input dimension must be positive".into()));
        }
        if layer_dims.is_empty() {
            return Err(Error::InvalidShape("at least one layer is required".into()));
        }
        if let Some(layer) = layer_dims.iter().position(|&dim| dim == 0) {
            return Err(Error::InvalidShape(format!("layer {layer} has zero width")));
        }
        Ok(Self {
            input_dim,
            layer_dims,
        })
    }

    /// Width of the vector feeding layer 0.
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn layer_count(&self) -> usize {
        self.layer_dims.len()
    }

    /// Output width of every layer, in order.
    pub fn layer_dims(&self) -> &[usize] {
        &self.layer_dims
    }

    /// Number of neurons in `layer`.
    pub fn layer_dim(&self, layer: usize) -> usize {
        self.layer_dims[layer]
    }

    /// Width of the signal entering `layer`: the previous layer's width, or
    /// the input dimension for layer 0.
    pub fn input_width(&self, layer: usize) -> usize {
        if layer == 0 {
            self.input_dim
        } else {
            self.layer_dims[layer - 1]
        }
    }

    /// Width of the last layer, i.e. the number of classes.
    pub fn output_dim(&self) -> usize {
        self.layer_dims[self.layer_dims.len() - 1]
    }

    /// Total number of weights across all layers, `None` if it overflows.
    pub fn total_weight_count(&self) -> Option<usize> {
        (0..self.layer_count()).try_fold(0usize, |total, layer| {
            self.layer_dim(layer)
                .checked_mul(self.input_width(layer))?
                .checked_add(total)
        })
    }

    /// Total number of neurons (and therefore biases and signals), `None` if
    /// it overflows.
    pub fn total_neuron_count(&self) -> Option<usize> {
        self.layer_dims
            .iter()
            .try_fold(0usize, |total, &dim| total.checked_add(dim))
    }
}
