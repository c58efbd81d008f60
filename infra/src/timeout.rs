//! Store operation bound.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::InfrastructureError;

/// Run `operation` with an upper bound of `limit`
///
/// Elapsing yields `InfrastructureError::Timeout(name)`; the in-flight call is
/// dropped and never retried.
pub async fn with_timeout<T, E, F>(
    limit: Duration,
    name: &str,
    operation: F,
) -> Result<T, InfrastructureError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<InfrastructureError>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            warn!("Store operation '{}' timed out after {:?}", name, limit);
            Err(InfrastructureError::Timeout(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_limit() {
        let value = with_timeout(Duration::from_secs(1), "quick", async {
            Ok::<_, InfrastructureError>(7)
        })
        .await
        .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_elapsed_limit_reports_operation() {
        let result = with_timeout(Duration::from_millis(10), "user.find_one", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, InfrastructureError>(())
        })
        .await;

        match result {
            Err(InfrastructureError::Timeout(name)) => assert_eq!(name, "user.find_one"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_inner_error_is_converted() {
        let result = with_timeout(Duration::from_secs(1), "op", async {
            Err::<(), _>(InfrastructureError::Config("bad".to_string()))
        })
        .await;
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }
}
