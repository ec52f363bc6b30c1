//! Training loop and evaluation routine
//!
//! Training draws examples uniformly at random with replacement and applies
//! one in-place gradient descent step per example. Evaluation runs the
//! forward pass over every example and counts wrong predictions.

use log::{debug, info};

use crate::config::TrainingConfig;
use crate::dataset::{check_labels, normalize_into, validate, Images, Labels};
use crate::error::{Error, Result};
use crate::network::{
    alloc_scalars, feed_forward, learn, NetworkParams, NetworkShape, Scalar, SignalBuffer,
};
use crate::utils::{index_of_max, SimpleRng};

/// Target value of the true class.
const TARGET_ON: Scalar = 1.0;
/// Target value of every other class (tanh's lower bound, not 0).
const TARGET_OFF: Scalar = -1.0;

/// Train a freshly randomized network of `shape` on `images`/`labels`.
///
/// Uses `learning_rate`, `iterations`, `train_pixel_divisor` and
/// `log_interval` from `config`; the layer widths come from `shape`. Runs the
/// full iteration count unconditionally. Initialization and sampling both
/// draw from `rng`, so a fixed seed reproduces the returned parameters.
///
/// # Errors
///
/// Fails before training starts if images and labels disagree in count,
/// image size differs from `shape.input_dim()`, a label has no output
/// neuron, the dataset is empty, or buffers cannot be allocated.
pub fn train(
    shape: &NetworkShape,
    images: &Images,
    labels: &Labels,
    config: &TrainingConfig,
    rng: &mut SimpleRng,
) -> Result<NetworkParams> {
    validate(images, labels, shape.input_dim())?;
    check_labels(labels, shape.output_dim())?;
    if images.count() == 0 {
        return Err(Error::EmptyDataset);
    }

    let mut params = NetworkParams::new(shape)?;
    params.randomize(rng);

    // Scratch reused by every iteration.
    let mut signals = SignalBuffer::new(shape)?;
    let mut input = alloc_scalars(shape.input_dim())?;
    let mut target = alloc_scalars(shape.output_dim())?;
    target.fill(TARGET_OFF);

    info!("Training for {} iterations", config.iterations);

    for iteration in 0..config.iterations {
        let example = rng.gen_usize(images.count());
        normalize_into(images.image(example), config.train_pixel_divisor, &mut input);

        let label = labels.get(example) as usize;
        target[label] = TARGET_ON;
        learn(shape, &input, &target, config.learning_rate, &mut params, &mut signals);
        target[label] = TARGET_OFF;

        if config.log_interval > 0 && (iteration + 1) % config.log_interval == 0 {
            debug!("Completed {} / {} iterations", iteration + 1, config.iterations);
        }
    }

    info!("Trained network successfully");
    Ok(params)
}

/// Count the examples whose predicted class differs from the label.
///
/// The prediction is the index of the largest output activation (the lowest
/// index on ties). Pixels are divided by `pixel_divisor`. An empty dataset
/// yields 0, and a label with no matching output is always a miss.
pub fn evaluate(
    shape: &NetworkShape,
    params: &NetworkParams,
    images: &Images,
    labels: &Labels,
    pixel_divisor: Scalar,
) -> Result<usize> {
    validate(images, labels, shape.input_dim())?;

    let mut signals = SignalBuffer::new(shape)?;
    let mut input = alloc_scalars(shape.input_dim())?;

    let mut misclassifications = 0;
    for example in 0..images.count() {
        normalize_into(images.image(example), pixel_divisor, &mut input);
        feed_forward(shape, params, &input, &mut signals);

        if index_of_max(signals.output()) != labels.get(example) as usize {
            misclassifications += 1;
        }
    }

    debug!(
        "Evaluated {} examples, {} misclassified",
        images.count(),
        misclassifications
    );
    Ok(misclassifications)
}
