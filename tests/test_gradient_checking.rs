// Tests for numerical gradient checking using finite differences.
// These tests verify that analytical gradients match numerical approximations
// computed on an f64 copy of the network.

use mnist_tanh_mlp::network::{
    back_propagate, feed_forward, NetworkParams, NetworkShape, SignalBuffer,
};
use mnist_tanh_mlp::utils::SimpleRng;

// ============================================================================
// f64 reference network
// ============================================================================

// Per-layer weights (neuron-major) and biases in double precision.
#[derive(Clone)]
struct ReferenceNet {
    input_dim: usize,
    weights: Vec<Vec<Vec<f64>>>,
    biases: Vec<Vec<f64>>,
}

impl ReferenceNet {
    fn from_params(shape: &NetworkShape, params: &NetworkParams) -> Self {
        let mut weights = Vec::new();
        let mut biases = Vec::new();
        for layer in 0..shape.layer_count() {
            weights.push(
                (0..shape.layer_dim(layer))
                    .map(|n| params.neuron_weights(layer, n).iter().map(|&w| w as f64).collect())
                    .collect(),
            );
            biases.push(params.biases(layer).iter().map(|&b| b as f64).collect());
        }
        Self {
            input_dim: shape.input_dim(),
            weights,
            biases,
        }
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        assert_eq!(input.len(), self.input_dim);
        let mut current = input.to_vec();
        for (weights, biases) in self.weights.iter().zip(&self.biases) {
            current = weights
                .iter()
                .zip(biases)
                .map(|(row, b)| {
                    let z: f64 = b + row.iter().zip(&current).map(|(w, x)| w * x).sum::<f64>();
                    z.tanh()
                })
                .collect();
        }
        current
    }

    fn loss(&self, input: &[f64], target: &[f64]) -> f64 {
        self.forward(input)
            .iter()
            .zip(target)
            .map(|(a, t)| (a - t) * (a - t))
            .sum()
    }
}

// Relative error with a floor so tiny gradients compare on absolute terms.
fn relative_error(analytic: f64, numeric: f64) -> f64 {
    let denom = analytic.abs().max(numeric.abs()).max(1e-2);
    (analytic - numeric).abs() / denom
}

// Check every weight and bias of `params` against central differences.
fn check_gradients(shape: &NetworkShape, params: &NetworkParams, input: &[f32], target: &[f32]) {
    const EPS: f64 = 1e-5;
    const TOLERANCE: f64 = 1e-3;

    let mut signals = SignalBuffer::new(shape).unwrap();
    let mut grad = NetworkParams::new(shape).unwrap();
    feed_forward(shape, params, input, &mut signals);
    back_propagate(shape, params, &mut signals, input, target, 1.0, &mut grad);

    let reference = ReferenceNet::from_params(shape, params);
    let input64: Vec<f64> = input.iter().map(|&x| x as f64).collect();
    let target64: Vec<f64> = target.iter().map(|&t| t as f64).collect();

    for layer in 0..shape.layer_count() {
        for neuron in 0..shape.layer_dim(layer) {
            for k in 0..shape.input_width(layer) {
                let mut plus = reference.clone();
                let mut minus = reference.clone();
                plus.weights[layer][neuron][k] += EPS;
                minus.weights[layer][neuron][k] -= EPS;
                let numeric =
                    (plus.loss(&input64, &target64) - minus.loss(&input64, &target64)) / (2.0 * EPS);
                let analytic = grad.weight(layer, neuron, k) as f64;
                assert!(
                    relative_error(analytic, numeric) < TOLERANCE,
                    "weight [{layer}][{neuron}][{k}]: analytic {analytic}, numeric {numeric}"
                );
            }

            let mut plus = reference.clone();
            let mut minus = reference.clone();
            plus.biases[layer][neuron] += EPS;
            minus.biases[layer][neuron] -= EPS;
            let numeric =
                (plus.loss(&input64, &target64) - minus.loss(&input64, &target64)) / (2.0 * EPS);
            let analytic = grad.bias(layer, neuron) as f64;
            assert!(
                relative_error(analytic, numeric) < TOLERANCE,
                "bias [{layer}][{neuron}]: analytic {analytic}, numeric {numeric}"
            );
        }
    }
}

#[cfg(test)]
mod gradient_tests {
    use super::*;

    #[test]
    fn test_reference_matches_library_forward() {
        let shape = NetworkShape::new(3, vec![4, 2]).unwrap();
        let mut params = NetworkParams::new(&shape).unwrap();
        params.randomize(&mut SimpleRng::new(2));
        let input = [0.3f32, -0.2, 0.8];

        let mut signals = SignalBuffer::new(&shape).unwrap();
        feed_forward(&shape, &params, &input, &mut signals);
        let reference = ReferenceNet::from_params(&shape, &params)
            .forward(&input.iter().map(|&x| x as f64).collect::<Vec<_>>());

        for (a, r) in signals.output().iter().zip(&reference) {
            assert!((*a as f64 - r).abs() < 1e-5);
        }
    }

    #[test]
    fn test_gradient_check_fixed_weights() {
        let shape = NetworkShape::new(2, vec![2, 1]).unwrap();
        let mut params = NetworkParams::new(&shape).unwrap();
        params.neuron_weights_mut(0, 0).copy_from_slice(&[0.5, -0.3]);
        params.neuron_weights_mut(0, 1).copy_from_slice(&[0.2, 0.7]);
        params.biases_mut(0).copy_from_slice(&[0.1, -0.2]);
        params.neuron_weights_mut(1, 0).copy_from_slice(&[0.4, -0.6]);
        params.biases_mut(1)[0] = 0.05;

        check_gradients(&shape, &params, &[0.9, 0.4], &[1.0]);
        check_gradients(&shape, &params, &[0.1, -0.8], &[-1.0]);
    }

    #[test]
    fn test_gradient_check_random_three_layers() {
        let shape = NetworkShape::new(4, vec![5, 4, 3]).unwrap();
        let mut params = NetworkParams::new(&shape).unwrap();
        params.randomize(&mut SimpleRng::new(123));

        check_gradients(&shape, &params, &[0.2, 0.6, 0.0, 0.9], &[-1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_gradient_check_near_saturation() {
        let shape = NetworkShape::new(3, vec![3, 2]).unwrap();
        let mut params = NetworkParams::new(&shape).unwrap();
        params.randomize(&mut SimpleRng::new(5));
        params.add_scaled(&params.clone(), 1.0);

        check_gradients(&shape, &params, &[0.99, 0.99, 0.99], &[1.0, -1.0]);
    }
}
