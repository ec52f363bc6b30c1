//! Forward propagation

use super::{NetworkParams, NetworkShape, Scalar, SignalBuffer};
use crate::utils::tanh;

/// Compute every layer's activations for `input`.
///
/// For each neuron `n` of layer `l`, `a[n] = tanh(b[n] + Σ_k w[n][k] * prev[k])`,
/// where `prev` is `input` for layer 0 and layer `l - 1`'s activations
/// otherwise. Each layer's activation slice in `signals` is fully overwritten.
///
/// Activations lie in [-1, 1]. The open interval holds only while
/// `|z|` stays below about 9; beyond that f32 `tanh` rounds to exactly ±1.
///
/// # Panics
///
/// Panics if `input` is not `shape.input_dim()` long or if `params` or
/// `signals` were allocated for a different shape.
pub fn feed_forward(
    shape: &NetworkShape,
    params: &NetworkParams,
    input: &[Scalar],
    signals: &mut SignalBuffer,
) {
    assert_eq!(
        input.len(),
        shape.input_dim(),
        "Input length must match the network input dimension"
    );
    assert!(params.is_shaped_like(shape), "Parameters were built for another shape");
    assert!(signals.is_shaped_like(shape), "Signal buffer was built for another shape");

    for layer in 0..shape.layer_count() {
        let inputs = shape.input_width(layer);
        let (weights, biases) = params.layer(layer);

        // Layers are laid out in order, so everything before this layer's
        // offset holds the predecessor's activations.
        let range = signals.range(layer);
        let prev_range = (layer > 0).then(|| signals.range(layer - 1));
        let (earlier, rest) = signals.activations.split_at_mut(range.start);
        let current = &mut rest[..range.len()];
        let prev: &[Scalar] = match prev_range {
            Some(prev_range) => &earlier[prev_range],
            None => input,
        };

        for ((out, row), &bias) in current
            .iter_mut()
            .zip(weights.chunks_exact(inputs))
            .zip(biases.iter())
        {
            let mut z = bias;
            for (w, x) in row.iter().zip(prev.iter()) {
                z += w * x;
            }
            *out = tanh(z);
        }
    }
}
