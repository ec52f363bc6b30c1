//! Comprehensive tests for configuration parsing
//!
//! This file tests the config module including:
//! - Loading the bundled JSON config files
//! - Filling missing fields with defaults
//! - Handling invalid JSON and missing files
//! - Rejecting out-of-range values

use mnist_tanh_mlp::config::{load_config, TrainingConfig};
use mnist_tanh_mlp::Error;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp config");
    file
}

// ============================================================================
// Bundled Config Tests
// ============================================================================

mod bundled_config_tests {
    use super::*;

    #[test]
    fn test_load_default_config_file() {
        let config = load_config("config/mnist_tanh.json").expect("Failed to load config");

        assert_eq!(config, TrainingConfig::default());
    }

    #[test]
    fn test_load_quick_config_file() {
        let config =
            load_config("config/mnist_tanh_quick.json").expect("Failed to load quick config");

        assert_eq!(config.layer_dims, vec![32, 10]);
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.iterations, 600_000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.log_interval, 100_000);
        assert_eq!(config.train_pixel_divisor, 256.0);
        assert_eq!(config.eval_pixel_divisor, 255.0);
    }
}

// ============================================================================
// Temp Config Tests
// ============================================================================

mod temp_config_tests {
    use super::*;

    #[test]
    fn test_empty_json_object_uses_defaults() {
        let file = write_temp_config("{}");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config, TrainingConfig::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let file = write_temp_config(
            r#"{
                "layer_dims": [16, 4],
                "learning_rate": 1e-2,
                "iterations": 12,
                "seed": 0,
                "train_pixel_divisor": 255.0,
                "eval_pixel_divisor": 256,
                "log_interval": 0
            }"#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.layer_dims, vec![16, 4]);
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.iterations, 12);
        assert_eq!(config.seed, 0);
        assert_eq!(config.train_pixel_divisor, 255.0);
        assert_eq!(config.eval_pixel_divisor, 256.0);
        assert_eq!(config.log_interval, 0);
    }

    #[test]
    fn test_shape_uses_layer_dims() {
        let file = write_temp_config(r#"{ "layer_dims": [8, 3] }"#);
        let config = load_config(file.path()).unwrap();
        let shape = config.shape(784).unwrap();

        assert_eq!(shape.input_dim(), 784);
        assert_eq!(shape.layer_dims(), &[8, 3]);
        assert_eq!(shape.output_dim(), 3);
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling_tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = load_config("config/does_not_exist.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_invalid_json_syntax() {
        let file = write_temp_config(r#"{ "iterations": 10, }"#);
        assert!(matches!(load_config(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_empty_file() {
        let file = write_temp_config("");
        assert!(matches!(load_config(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_wrong_type_iterations() {
        let file = write_temp_config(r#"{ "iterations": "many" }"#);
        assert!(matches!(load_config(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_negative_iterations_rejected() {
        let file = write_temp_config(r#"{ "iterations": -1 }"#);
        assert!(matches!(load_config(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = write_temp_config(r#"{ "batch_size": 32 }"#);
        assert!(matches!(load_config(file.path()), Err(Error::Json(_))));
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    fn assert_config_error(contents: &str) {
        let file = write_temp_config(contents);
        let result = load_config(file.path());
        assert!(
            matches!(result, Err(Error::Config(_))),
            "expected a validation error for {contents}, got {result:?}"
        );
    }

    #[test]
    fn test_empty_layer_dims() {
        assert_config_error(r#"{ "layer_dims": [] }"#);
    }

    #[test]
    fn test_zero_layer_width() {
        assert_config_error(r#"{ "layer_dims": [20, 0, 10] }"#);
    }

    #[test]
    fn test_non_positive_learning_rate() {
        assert_config_error(r#"{ "learning_rate": 0.0 }"#);
        assert_config_error(r#"{ "learning_rate": -0.1 }"#);
    }

    #[test]
    fn test_non_positive_pixel_divisor() {
        assert_config_error(r#"{ "train_pixel_divisor": 0.0 }"#);
        assert_config_error(r#"{ "eval_pixel_divisor": -255.0 }"#);
    }

    #[test]
    fn test_default_validates() {
        assert!(TrainingConfig::default().validate().is_ok());
    }
}
