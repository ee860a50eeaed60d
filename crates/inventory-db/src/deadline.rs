//! # Per-Call Deadlines
//!
//! Every repository operation creates one [`Deadline`] at call start and
//! passes it into each database call it makes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation                         Limit                                │
//! │  ─────────────────────────────     ─────                                │
//! │  get_by_id, list, insert,          15s   (STANDARD_TIMEOUT)             │
//! │  update, delete, count                                                  │
//! │                                                                         │
//! │  top_ten / top, search             3s    (LIGHT_READ_TIMEOUT)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Limits are fixed per operation kind. They are not derived from, and do
//! not propagate to, any caller cancellation.

use std::future::Future;
use std::time::Duration;

use tokio::time::{timeout_at, Instant};
use tracing::warn;

use crate::error::{DbError, DbResult};

/// Limit for point lookups, full-table reads and mutations.
pub const STANDARD_TIMEOUT: Duration = Duration::from_secs(15);

/// Limit for the lightweight read paths (top-N and search).
pub const LIGHT_READ_TIMEOUT: Duration = Duration::from_secs(3);

/// An absolute point in time by which a database call must finish.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    operation: &'static str,
    limit: Duration,
    expires_at: Instant,
}

impl Deadline {
    /// Starts a deadline `limit` from now.
    pub fn after(operation: &'static str, limit: Duration) -> Self {
        Deadline {
            operation,
            limit,
            expires_at: Instant::now() + limit,
        }
    }

    /// Deadline with [`STANDARD_TIMEOUT`].
    pub fn standard(operation: &'static str) -> Self {
        Self::after(operation, STANDARD_TIMEOUT)
    }

    /// Deadline with [`LIGHT_READ_TIMEOUT`].
    pub fn light_read(operation: &'static str) -> Self {
        Self::after(operation, LIGHT_READ_TIMEOUT)
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Time left before expiry (zero once expired).
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Drives a database call, failing with [`DbError::Timeout`] if it does
    /// not complete before the deadline. The call is dropped on expiry.
    pub async fn run<T, F>(&self, call: F) -> DbResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match timeout_at(self.expires_at, call).await {
            Ok(result) => result.map_err(DbError::from),
            Err(_) => {
                warn!(
                    operation = self.operation,
                    limit_ms = self.limit.as_millis() as u64,
                    "Database call exceeded its deadline"
                );
                Err(DbError::Timeout {
                    operation: self.operation,
                    limit: self.limit,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test(start_paused = true)]
    async fn test_call_within_deadline_returns_value() {
        let deadline = Deadline::light_read("search");
        let value = deadline
            .run(async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, sqlx::Error>(7)
            })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let deadline = Deadline::light_read("search");
        let err = deadline
            .run(async {
                tokio::time::sleep(Duration::from_secs(4)).await;
                Ok::<_, sqlx::Error>(())
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(matches!(
            err,
            DbError::Timeout { operation: "search", limit } if limit == LIGHT_READ_TIMEOUT
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_is_measured_from_creation() {
        let deadline = Deadline::standard("list");
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(deadline.remaining(), Duration::from_secs(5));

        // A 6s call started 10s into a 15s budget must fail.
        let err = deadline
            .run(async {
                tokio::time::sleep(Duration::from_secs(6)).await;
                Ok::<_, sqlx::Error>(())
            })
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(deadline.is_expired());
    }

    #[tokio::test]
    async fn test_driver_errors_pass_through() {
        let err = Deadline::standard("get_by_id")
            .run(async { Err::<(), _>(sqlx::Error::PoolTimedOut) })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Infrastructure);
    }
}
