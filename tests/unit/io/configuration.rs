//! Tests for layout configuration constants and validation

#[cfg(test)]
mod tests {
    use chromagrid::LayoutError;
    use chromagrid::io::configuration::{
        DEFAULT_COLLECTION_KEY, DEFAULT_COLUMNS, DEFAULT_CONVERGENCE_THRESHOLD,
        DEFAULT_DOWNSAMPLE_SIZE, DEFAULT_MAX_ITERATIONS, DEFAULT_PALETTE_SIZE, FALLBACK_GRAY,
        LEFT_NEIGHBOR_WEIGHT, LayoutConfig, TOP_NEIGHBOR_WEIGHT, WRAP_NEIGHBOR_SHARE,
        WRAP_NEIGHBOR_WEIGHT,
    };
    use std::time::Duration;

    fn rejected_parameter(config: &LayoutConfig) -> Option<&'static str> {
        match config.validate() {
            Err(LayoutError::InvalidParameter { parameter, .. }) => Some(parameter),
            _ => None,
        }
    }

    // Tests extraction defaults
    // Verified by changing constant values
    #[test]
    fn test_extraction_defaults() {
        assert_eq!(DEFAULT_PALETTE_SIZE, 4);
        assert_eq!(DEFAULT_DOWNSAMPLE_SIZE, 50);
        assert_eq!(DEFAULT_MAX_ITERATIONS, 20);
        assert!((DEFAULT_CONVERGENCE_THRESHOLD - 1.0).abs() < f64::EPSILON);
        assert_eq!(FALLBACK_GRAY, 128);
    }

    // Tests left neighbors weigh more than top, and wrap the least
    // Verified by inverting relationship values
    #[test]
    fn test_neighbor_weight_relationship() {
        assert!(LEFT_NEIGHBOR_WEIGHT > TOP_NEIGHBOR_WEIGHT);
        assert!(TOP_NEIGHBOR_WEIGHT > WRAP_NEIGHBOR_WEIGHT);
        assert!(WRAP_NEIGHBOR_SHARE > 0.0 && WRAP_NEIGHBOR_SHARE < 1.0);
    }

    // Tests default configuration mirrors the constants and validates
    // Verified by defaulting columns to zero
    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.palette_size, DEFAULT_PALETTE_SIZE);
        assert_eq!(config.columns, DEFAULT_COLUMNS);
        assert_eq!(config.downsample, (50, 50));
        assert_eq!(config.seed, None);
        assert_eq!(config.threads, 0);
        assert_eq!(config.request_delay, Duration::from_millis(100));
        assert_eq!(DEFAULT_COLLECTION_KEY, "releases");
        assert!(config.validate().is_ok());
    }

    // Tests grid constructor only overrides k and columns
    // Verified by resetting the iteration cap
    #[test]
    fn test_with_grid() {
        let config = LayoutConfig::with_grid(6, 8);
        assert_eq!(config.palette_size, 6);
        assert_eq!(config.columns, 8);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    // Tests zero counts are rejected
    // Verified by removing each guard
    #[test]
    fn test_zero_counts_rejected() {
        assert_eq!(
            rejected_parameter(&LayoutConfig::with_grid(0, 5)),
            Some("palette_size")
        );
        assert_eq!(
            rejected_parameter(&LayoutConfig::with_grid(4, 0)),
            Some("columns")
        );
        let config = LayoutConfig {
            max_iterations: 0,
            ..LayoutConfig::default()
        };
        assert_eq!(rejected_parameter(&config), Some("max_iterations"));
    }

    // Tests degenerate downsample sizes are rejected
    // Verified by checking only the width
    #[test]
    fn test_downsample_rejected() {
        let config = LayoutConfig {
            downsample: (50, 0),
            ..LayoutConfig::default()
        };
        assert_eq!(rejected_parameter(&config), Some("downsample"));
    }

    // Tests negative and non-finite thresholds are rejected
    // Verified by accepting NaN
    #[test]
    fn test_threshold_rejected() {
        for threshold in [-1.0, f64::NAN, f64::INFINITY] {
            let config = LayoutConfig {
                convergence_threshold: threshold,
                ..LayoutConfig::default()
            };
            assert_eq!(rejected_parameter(&config), Some("convergence_threshold"));
        }
        let zero = LayoutConfig {
            convergence_threshold: 0.0,
            ..LayoutConfig::default()
        };
        assert!(zero.validate().is_ok());
    }

    // Tests zero timeouts are rejected
    // Verified by accepting zero durations
    #[test]
    fn test_timeout_rejected() {
        let config = LayoutConfig {
            request_timeout: Duration::ZERO,
            ..LayoutConfig::default()
        };
        assert_eq!(rejected_parameter(&config), Some("request_timeout"));
    }
}
