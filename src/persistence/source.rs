//! Record retrieval seam between display callers and the store.

use std::future::Future;
use std::pin::Pin;

use crate::models::notification::NotificationRecord;
use crate::Result;

/// Anything that can load a notification snapshot by identifier.
///
/// Callers that only render views depend on this trait rather than on a
/// concrete repository, so tests can substitute fixed snapshots.
pub trait RecordSource: Send + Sync {
    /// Load the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no record has that identifier.
    fn fetch_record<'a>(
        &'a self,
        id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<NotificationRecord>> + Send + 'a>>;
}
