#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use self::http::*;

use crate::{LocalityRecord, LookupError, LookupFilter};
use core::future::Future;

/// The outcome of one lookup call.
///
/// - `Ok(Some(records))`: the service answered successfully.
/// - `Ok(None)`: the service answered with a non-success status.
/// - `Err(_)`: no usable answer was received at all.
pub type LookupResult = Result<Option<Vec<LocalityRecord>>, LookupError>;

/// The external lookup collaborator.
///
/// A single operation resolves a [`LookupFilter`] into the matching
/// [`LocalityRecord`]s. Implementations must be cheap to share: the resolver
/// keeps one instance behind an `Arc` and calls it from spawned tasks.
pub trait Lookup: Send + Sync + 'static {
    /// Queries the service with exactly one filter.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] when the call fails before a response could
    /// be interpreted. Non-success responses are `Ok(None)`, not errors.
    fn lookup(&self, filter: LookupFilter) -> impl Future<Output = LookupResult> + Send;
}
