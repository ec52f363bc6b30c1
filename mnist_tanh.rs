// mnist_tanh - train and evaluate the tanh MLP on MNIST IDX files
//
// ```bash
// cargo run --release --bin mnist_tanh -- \
//   ./data/train-images.idx3-ubyte ./data/train-labels.idx1-ubyte \
//   ./data/t10k-images.idx3-ubyte ./data/t10k-labels.idx1-ubyte \
//   --config config/mnist_tanh.json
// ```
//
// The report is logged at `info`, shown by default. Set `RUST_LOG=debug`
// for progress lines or `RUST_LOG=warn` to silence it.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mnist_tanh_mlp::config::{load_config, TrainingConfig};
use mnist_tanh_mlp::dataset::{Images, Labels};
use mnist_tanh_mlp::idx::{load_images, load_labels};
use mnist_tanh_mlp::network::{NetworkParams, NetworkShape, Scalar};
use mnist_tanh_mlp::training::{evaluate, train};
use mnist_tanh_mlp::utils::SimpleRng;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Train a tanh MLP with per-example SGD and report misclassifications
#[derive(Parser, Debug)]
#[command(name = "mnist_tanh", version, about)]
struct Cli {
    /// IDX image file used for training
    train_images: PathBuf,

    /// IDX label file used for training
    train_labels: PathBuf,

    /// Optional IDX image file for the test set
    #[arg(requires = "test_labels")]
    test_images: Option<PathBuf>,

    /// Optional IDX label file for the test set
    test_labels: Option<PathBuf>,

    /// JSON training configuration
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the number of training iterations
    #[arg(long)]
    iterations: Option<u64>,

    /// Override the learning rate
    #[arg(long)]
    learning_rate: Option<Scalar>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print every weight and bias after training
    #[arg(long)]
    print_network: bool,
}

/// Resolve the configuration file (or defaults) and apply CLI overrides.
fn resolve_config(cli: &Cli) -> Result<TrainingConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TrainingConfig::default(),
    };
    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    if let Some(learning_rate) = cli.learning_rate {
        config.learning_rate = learning_rate;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn load_dataset(images: &Path, labels: &Path) -> Result<(Images, Labels)> {
    let images = load_images(images)
        .with_context(|| format!("could not read image file {}", images.display()))?;
    info!(
        "Loaded {} images with dimensions {}x{}",
        images.count(),
        images.width(),
        images.height()
    );
    let labels = load_labels(labels)
        .with_context(|| format!("could not read label file {}", labels.display()))?;
    info!("Loaded {} labels", labels.count());
    Ok((images, labels))
}

/// Misclassification rate in percent; 0 for an empty set.
fn error_rate(misclassifications: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        misclassifications as f64 / count as f64 * 100.0
    }
}

fn report(
    name: &str,
    shape: &NetworkShape,
    params: &NetworkParams,
    images: &Images,
    labels: &Labels,
    config: &TrainingConfig,
) -> Result<usize> {
    info!("Testing network on {name} set...");
    let misclassifications = evaluate(shape, params, images, labels, config.eval_pixel_divisor)?;
    info!(
        "Misclassifications for {name} set: {} / {} -- {:.2}% error rate",
        misclassifications,
        images.count(),
        error_rate(misclassifications, images.count())
    );
    Ok(misclassifications)
}

fn run(cli: &Cli) -> Result<()> {
    let program_start = Instant::now();
    let config = resolve_config(cli)?;

    let (train_images, train_labels) = load_dataset(&cli.train_images, &cli.train_labels)?;
    let shape = config.shape(train_images.image_pixels())?;

    let train_start = Instant::now();
    let mut rng = SimpleRng::new(config.seed);
    let params = train(&shape, &train_images, &train_labels, &config, &mut rng)?;
    info!(
        "Total training time: {:.2} seconds",
        train_start.elapsed().as_secs_f64()
    );

    if cli.print_network {
        print!("{params}");
    }

    report("training", &shape, &params, &train_images, &train_labels, &config)?;

    if let (Some(images), Some(labels)) = (&cli.test_images, &cli.test_labels) {
        info!("Loading test set...");
        let (test_images, test_labels) = load_dataset(images, labels)?;
        report("test", &shape, &params, &test_images, &test_labels, &config)?;
    }

    info!(
        "Total program time: {:.2} seconds",
        program_start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Log filter used when the environment sets none; the report is at `info`.
const DEFAULT_LOG_FILTER: &str = "info";

fn logger_builder(env: env_logger::Env<'_>) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or(DEFAULT_LOG_FILTER))
}

fn main() -> Result<()> {
    logger_builder(env_logger::Env::default()).init();
    let cli = Cli::parse();
    run(&cli)
}
