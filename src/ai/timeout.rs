//! Per-call timeouts for collaborator operations.
//!
//! Every enrichment call, image fetch and PDF conversion runs under
//! [`with_timeout`]; an elapsed timer surfaces as [`DeckError::Timeout`],
//! which the error classifier files under the network category.
//!
//! ```ignore
//! let response = with_timeout(
//!     Duration::from_secs(60),
//!     provider.generate(&prompt, &schema),
//!     "slide bullets",
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::types::{DeckError, Result};

/// Execute a fallible async operation with a timeout
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(DeckError::timeout(operation_name, timeout)),
    }
}

/// Execute an infallible async operation with a timeout
pub async fn with_timeout_map<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(timeout, future)
        .await
        .map_err(|_| DeckError::timeout(operation_name, timeout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorCategory, ErrorClassifier};

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, DeckError>(42) },
            "quick operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, DeckError>(42)
            },
            "slow operation",
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, DeckError::Timeout { .. }));
        assert_eq!(
            ErrorClassifier::classify_deck_error(&err, "test").category,
            ErrorCategory::Network
        );
    }

    #[tokio::test]
    async fn test_with_timeout_map_wraps_value() {
        let value = with_timeout_map(Duration::from_secs(1), async { "done" }, "map").await;
        assert_eq!(value.unwrap(), "done");
    }
}
