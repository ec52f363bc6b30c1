//! Weight and bias storage for every layer
//!
//! All weights live in one contiguous buffer and all biases in another. A
//! small per-layer table maps a layer to its slice of each buffer; inside a
//! layer the weights are stored row-major with one row per neuron, so the
//! weights of neuron `n` in layer `l` are the `input_width(l)` scalars
//! starting at `weight_offset(l) + n * input_width(l)`.

use std::fmt;

use super::{alloc_scalars, NetworkShape, Scalar};
use crate::error::{Error, Result};
use crate::utils::SimpleRng;

/// Position of one layer inside the weight and bias arenas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayerLayout {
    weight_offset: usize,
    bias_offset: usize,
    weight_len: usize,
    neurons: usize,
    inputs: usize,
}

/// Weights and biases of a fully connected network.
///
/// The same type serves as the live parameters and as a gradient
/// accumulator of identical layout.
///
/// # Example
///
/// ```
/// use mnist_tanh_mlp::network::{NetworkParams, NetworkShape};
/// use mnist_tanh_mlp::utils::SimpleRng;
///
/// let shape = NetworkShape::new(3, vec![2, 1]).unwrap();
/// let mut params = NetworkParams::new(&shape).unwrap();
/// params.randomize(&mut SimpleRng::new(7));
///
/// assert_eq!(params.neuron_weights(0, 1).len(), 3);
/// assert_eq!(params.biases(1).len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkParams {
    layers: Vec<LayerLayout>,
    weights: Vec<Scalar>,
    biases: Vec<Scalar>,
}

impl NetworkParams {
    /// Allocate parameters for `shape`, all set to 0.0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeOverflow`] if the arena sizes do not fit in
    /// `usize` and [`Error::Allocation`] if they cannot be reserved.
    pub fn new(shape: &NetworkShape) -> Result<Self> {
        let mut layers = Vec::with_capacity(shape.layer_count());
        let mut weight_offset: usize = 0;
        let mut bias_offset: usize = 0;
        for layer in 0..shape.layer_count() {
            let neurons = shape.layer_dim(layer);
            let inputs = shape.input_width(layer);
            let weight_len = neurons
                .checked_mul(inputs)
                .ok_or(Error::SizeOverflow("weight arena"))?;
            layers.push(LayerLayout {
                weight_offset,
                bias_offset,
                weight_len,
                neurons,
                inputs,
            });
            weight_offset = weight_offset
                .checked_add(weight_len)
                .ok_or(Error::SizeOverflow("weight arena"))?;
            bias_offset = bias_offset
                .checked_add(neurons)
                .ok_or(Error::SizeOverflow("bias arena"))?;
        }

        Ok(Self {
            layers,
            weights: alloc_scalars(weight_offset)?,
            biases: alloc_scalars(bias_offset)?,
        })
    }

    /// Fill every weight and bias with an independent uniform value in (-1, 1).
    ///
    /// Values are drawn layer by layer and, within a layer, neuron by neuron:
    /// first the bias, then the weights in input order.
    pub fn randomize(&mut self, rng: &mut SimpleRng) {
        for layer in 0..self.layers.len() {
            let layout = self.layers[layer];
            for neuron in 0..layout.neurons {
                self.biases[layout.bias_offset + neuron] = rng.next_symmetric_f32();
                let start = layout.weight_offset + neuron * layout.inputs;
                for weight in &mut self.weights[start..start + layout.inputs] {
                    *weight = rng.next_symmetric_f32();
                }
            }
        }
    }

    /// Set every weight and bias to 0.0.
    pub fn zero(&mut self) {
        self.weights.fill(0.0);
        self.biases.fill(0.0);
    }

    /// Element-wise `self += scale * other`.
    ///
    /// This is the apply step for gradients accumulated into a separate
    /// buffer by [`super::back_propagate`].
    ///
    /// # Panics
    ///
    /// Panics if `other` was not built for the same shape.
    pub fn add_scaled(&mut self, other: &NetworkParams, scale: Scalar) {
        assert_eq!(
            self.layers, other.layers,
            "Parameter buffers must share the same layout"
        );
        for (param, grad) in self.weights.iter_mut().zip(other.weights.iter()) {
            *param += scale * grad;
        }
        for (param, grad) in self.biases.iter_mut().zip(other.biases.iter()) {
            *param += scale * grad;
        }
    }

    /// Whether this store was allocated for `shape`.
    pub fn is_shaped_like(&self, shape: &NetworkShape) -> bool {
        self.layers.len() == shape.layer_count()
            && self.layers.iter().enumerate().all(|(layer, layout)| {
                layout.neurons == shape.layer_dim(layer) && layout.inputs == shape.input_width(layer)
            })
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }

    /// Incoming weights of one neuron.
    pub fn neuron_weights(&self, layer: usize, neuron: usize) -> &[Scalar] {
        let layout = &self.layers[layer];
        assert!(neuron < layout.neurons, "neuron index out of range");
        let start = layout.weight_offset + neuron * layout.inputs;
        &self.weights[start..start + layout.inputs]
    }

    /// Mutable incoming weights of one neuron.
    pub fn neuron_weights_mut(&mut self, layer: usize, neuron: usize) -> &mut [Scalar] {
        let layout = self.layers[layer];
        assert!(neuron < layout.neurons, "neuron index out of range");
        let start = layout.weight_offset + neuron * layout.inputs;
        &mut self.weights[start..start + layout.inputs]
    }

    /// Weight from input `input` to neuron `neuron` of `layer`.
    pub fn weight(&self, layer: usize, neuron: usize, input: usize) -> Scalar {
        self.neuron_weights(layer, neuron)[input]
    }

    pub fn weight_mut(&mut self, layer: usize, neuron: usize, input: usize) -> &mut Scalar {
        &mut self.neuron_weights_mut(layer, neuron)[input]
    }

    /// Biases of every neuron in `layer`.
    pub fn biases(&self, layer: usize) -> &[Scalar] {
        let layout = &self.layers[layer];
        &self.biases[layout.bias_offset..layout.bias_offset + layout.neurons]
    }

    pub fn biases_mut(&mut self, layer: usize) -> &mut [Scalar] {
        let layout = self.layers[layer];
        &mut self.biases[layout.bias_offset..layout.bias_offset + layout.neurons]
    }

    pub fn bias(&self, layer: usize, neuron: usize) -> Scalar {
        self.biases(layer)[neuron]
    }

    /// The whole weight arena, layer after layer.
    pub fn flat_weights(&self) -> &[Scalar] {
        &self.weights
    }

    /// The whole bias arena, layer after layer.
    pub fn flat_biases(&self) -> &[Scalar] {
        &self.biases
    }

    /// Weight matrix (row-major, one row per neuron) and biases of `layer`.
    pub(crate) fn layer(&self, layer: usize) -> (&[Scalar], &[Scalar]) {
        let layout = &self.layers[layer];
        (
            &self.weights[layout.weight_offset..layout.weight_offset + layout.weight_len],
            &self.biases[layout.bias_offset..layout.bias_offset + layout.neurons],
        )
    }
}

impl fmt::Display for NetworkParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input_dim = self.layers.first().map_or(0, |layout| layout.inputs);
        writeln!(
            f,
            "Network [layer count: {}] [input dim: {}]",
            self.layers.len(),
            input_dim
        )?;
        for (layer, layout) in self.layers.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "  Layer {} [dim: {}]", layer, layout.neurons)?;
            for neuron in 0..layout.neurons {
                writeln!(
                    f,
                    "    Neuron {} [bias: {:+.6}]",
                    neuron,
                    self.bias(layer, neuron)
                )?;
                for (input, weight) in self.neuron_weights(layer, neuron).iter().enumerate() {
                    writeln!(f, "      Weight {}: {:+.6}", input, weight)?;
                }
            }
        }
        Ok(())
    }
}
