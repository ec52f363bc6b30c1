//! Activation helpers for the tanh network
//!
//! The network uses tanh on every layer. Back-propagation only ever needs the
//! derivative at a point whose activation is already known, so the derivative
//! is expressed in terms of the output rather than the pre-activation.

use crate::network::Scalar;

/// Hyperbolic tangent activation.
pub fn tanh(x: Scalar) -> Scalar {
    x.tanh()
}

/// Tanh derivative assuming `y = tanh(z)`.
///
/// Returns `1 - y^2`.
pub fn tanh_derivative(y: Scalar) -> Scalar {
    1.0 - y * y
}

/// Index of the first maximum value.
///
/// Ties resolve to the lowest index. Returns 0 for an empty slice.
pub fn index_of_max(values: &[Scalar]) -> usize {
    let mut max_index = 0;
    let mut max_value = match values.first() {
        Some(&value) => value,
        None => return 0,
    };
    for (i, &value) in values.iter().enumerate().skip(1) {
        if value > max_value {
            max_value = value;
            max_index = i;
        }
    }
    max_index
}
