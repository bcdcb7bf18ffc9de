//! Error types for the plugin pipeline

use thiserror::Error;

/// Main error type for plugin operations.
///
/// Only `Configuration` and a `Fetch` raised during shard enumeration are
/// fatal; everything else is logged by the aggregator and the affected
/// metric is skipped.
#[derive(Debug, Clone, Error)]
pub enum PluginError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("fetched no datapoints")]
    NoData,
}

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PluginError::Configuration("stream name is required".to_string());
        assert!(err.to_string().contains("stream name"));

        let err = PluginError::Fetch("DescribeStream failed".to_string());
        assert!(err.to_string().contains("DescribeStream"));

        assert_eq!(PluginError::NoData.to_string(), "fetched no datapoints");
    }
}
