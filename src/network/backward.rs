//! Back-propagation and the per-example update rule
//!
//! The loss is the squared error `Σ (a[n] - t[n])^2` between the output
//! activations and the target vector. Gradients are always *added* to a
//! target store, scaled by `eta`. Two call patterns share the same code:
//!
//! - [`back_propagate`] accumulates into a separate [`NetworkParams`], which
//!   the caller zeroes beforehand and later applies with
//!   [`NetworkParams::add_scaled`].
//! - [`back_propagate_in_place`] accumulates straight into the live
//!   parameters. With `eta` negative this is a gradient descent step.
//!
//! Both produce identical parameters: in the in-place pattern each weight is
//! read for the predecessor's signal gradient before it is updated, and a
//! layer's update never feeds into the gradients of layers below it.

use super::{feed_forward, NetworkParams, NetworkShape, Scalar, SignalBuffer};
use crate::utils::tanh_derivative;

/// Where one neuron's weight and bias gradients are added.
trait GradientTarget {
    /// Add `step` to the bias and `step * prev_activation[k]` to each weight of
    /// `neuron`, and `delta * w[k]` to `prev_gradient[k]` using the weights as
    /// they were before this call.
    fn accumulate_neuron(
        &mut self,
        layer: usize,
        neuron: usize,
        delta: Scalar,
        step: Scalar,
        prev_activation: &[Scalar],
        prev_gradient: Option<&mut [Scalar]>,
    );
}

struct Separate<'a> {
    params: &'a NetworkParams,
    grad: &'a mut NetworkParams,
}

impl GradientTarget for Separate<'_> {
    fn accumulate_neuron(
        &mut self,
        layer: usize,
        neuron: usize,
        delta: Scalar,
        step: Scalar,
        prev_activation: &[Scalar],
        prev_gradient: Option<&mut [Scalar]>,
    ) {
        if let Some(prev_gradient) = prev_gradient {
            let weights = self.params.neuron_weights(layer, neuron);
            for (g, w) in prev_gradient.iter_mut().zip(weights.iter()) {
                *g += delta * w;
            }
        }
        self.grad.biases_mut(layer)[neuron] += step;
        let row = self.grad.neuron_weights_mut(layer, neuron);
        for (w, x) in row.iter_mut().zip(prev_activation.iter()) {
            *w += step * x;
        }
    }
}

struct InPlace<'a>(&'a mut NetworkParams);

impl GradientTarget for InPlace<'_> {
    fn accumulate_neuron(
        &mut self,
        layer: usize,
        neuron: usize,
        delta: Scalar,
        step: Scalar,
        prev_activation: &[Scalar],
        prev_gradient: Option<&mut [Scalar]>,
    ) {
        self.0.biases_mut(layer)[neuron] += step;
        let row = self.0.neuron_weights_mut(layer, neuron);
        match prev_gradient {
            Some(prev_gradient) => {
                for ((w, g), x) in row
                    .iter_mut()
                    .zip(prev_gradient.iter_mut())
                    .zip(prev_activation.iter())
                {
                    *g += delta * *w;
                    *w += step * x;
                }
            }
            None => {
                for (w, x) in row.iter_mut().zip(prev_activation.iter()) {
                    *w += step * x;
                }
            }
        }
    }
}

fn propagate<T: GradientTarget>(
    shape: &NetworkShape,
    signals: &mut SignalBuffer,
    input: &[Scalar],
    target: &[Scalar],
    eta: Scalar,
    grads: &mut T,
) {
    assert_eq!(
        input.len(),
        shape.input_dim(),
        "Input length must match the network input dimension"
    );
    assert_eq!(
        target.len(),
        shape.output_dim(),
        "Target length must match the output layer width"
    );
    assert!(signals.is_shaped_like(shape), "Signal buffer was built for another shape");

    // d/da of (a - t)^2 for the output layer.
    let output = signals.range(shape.layer_count() - 1);
    for ((grad, &a), &t) in signals.gradients[output.clone()]
        .iter_mut()
        .zip(signals.activations[output].iter())
        .zip(target.iter())
    {
        *grad = 2.0 * (a - t);
    }

    for layer in (0..shape.layer_count()).rev() {
        let range = signals.range(layer);
        let prev_range = (layer > 0).then(|| signals.range(layer - 1));

        let activations = &signals.activations;
        let (earlier_grads, rest) = signals.gradients.split_at_mut(range.start);
        let current_grads = &rest[..range.len()];

        let (prev_activation, mut prev_gradient) = match prev_range {
            Some(prev_range) => {
                let prev_gradient = &mut earlier_grads[prev_range.clone()];
                prev_gradient.fill(0.0);
                (&activations[prev_range], Some(prev_gradient))
            }
            None => (input, None),
        };

        for (neuron, (&a, &g)) in activations[range]
            .iter()
            .zip(current_grads.iter())
            .enumerate()
        {
            let theta_prime = tanh_derivative(a);
            grads.accumulate_neuron(
                layer,
                neuron,
                g * theta_prime,
                eta * g * theta_prime,
                prev_activation,
                prev_gradient.as_deref_mut(),
            );
        }
    }
}

/// Back-propagate the squared error of the last forward pass and add
/// `eta`-scaled gradients to `grad`.
///
/// `signals` must hold the activations from [`feed_forward`] on the same
/// `input` and `params`; its gradient slices are overwritten with the signal
/// gradients of every layer (layer 0's predecessor, the input, gets none).
/// `grad` is only ever added to, so it can sum several examples before a
/// single [`NetworkParams::add_scaled`].
///
/// # Panics
///
/// Panics if any buffer was built for another shape or if `input` or
/// `target` have the wrong length.
#[allow(clippy::too_many_arguments)]
pub fn back_propagate(
    shape: &NetworkShape,
    params: &NetworkParams,
    signals: &mut SignalBuffer,
    input: &[Scalar],
    target: &[Scalar],
    eta: Scalar,
    grad: &mut NetworkParams,
) {
    assert!(params.is_shaped_like(shape), "Parameters were built for another shape");
    assert!(grad.is_shaped_like(shape), "Gradient store was built for another shape");
    propagate(
        shape,
        signals,
        input,
        target,
        eta,
        &mut Separate { params, grad },
    );
}

/// Back-propagate and add `eta`-scaled gradients directly to `params`.
///
/// Equivalent to [`back_propagate`] into a zeroed store followed by
/// `params.add_scaled(&grad, 1.0)`, without the extra store.
pub fn back_propagate_in_place(
    shape: &NetworkShape,
    params: &mut NetworkParams,
    signals: &mut SignalBuffer,
    input: &[Scalar],
    target: &[Scalar],
    eta: Scalar,
) {
    assert!(params.is_shaped_like(shape), "Parameters were built for another shape");
    propagate(shape, signals, input, target, eta, &mut InPlace(params));
}

/// One stochastic gradient descent step on a single example.
///
/// Runs [`feed_forward`] and then [`back_propagate_in_place`] with `-eta`.
pub fn learn(
    shape: &NetworkShape,
    input: &[Scalar],
    target: &[Scalar],
    eta: Scalar,
    params: &mut NetworkParams,
    signals: &mut SignalBuffer,
) {
    feed_forward(shape, params, input, signals);
    back_propagate_in_place(shape, params, signals, input, target, -eta);
}
