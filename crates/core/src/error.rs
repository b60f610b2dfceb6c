//! Inventory error model.

use thiserror::Error;

/// Result type used across the inventory pipeline.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Pipeline-level error.
///
/// Every variant is fatal for a run: nothing is retried and no partial
/// document is ever emitted. Malformed individual records are *not* errors.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Required settings (credentials) are absent or an optional setting is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The directory service call failed; no inventory was built.
    #[error("failed to fetch servers: {0}")]
    Fetch(String),

    /// The completed inventory could not be rendered as JSON.
    #[error("failed to serialize inventory: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InventoryError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_names_the_problem() {
        let err = InventoryError::configuration("SCALEWAY_TOKEN is not set");
        assert_eq!(err.to_string(), "configuration error: SCALEWAY_TOKEN is not set");
    }

    #[test]
    fn fetch_message_wraps_cause() {
        let err = InventoryError::fetch("api returned 401");
        assert_eq!(err.to_string(), "failed to fetch servers: api returned 401");
    }

    #[test]
    fn serde_errors_convert_into_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: InventoryError = json_err.into();
        assert!(matches!(err, InventoryError::Serialization(_)));
    }
}
