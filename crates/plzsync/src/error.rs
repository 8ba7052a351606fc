//! Error types for the resolution engine.
//!
//! Two families live here:
//!
//! - [`ValidationError`]: the user-facing verdicts a resolution channel can
//!   reach. These are part of the render model and are never propagated with
//!   `?`.
//! - [`LookupError`] and [`Error`]: operational failures of the lookup
//!   collaborator and of the resolver actor itself.

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced by a [`ResolverHandle`](crate::ResolverHandle).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The resolver actor has been torn down and no longer accepts input.
    #[error("resolver has shut down")]
    ResolverClosed,

    /// A lookup performed on behalf of the caller failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Failures of a single [`Lookup`](crate::Lookup) call.
///
/// A non-success HTTP status is deliberately *not* an error: lookups report it
/// as `Ok(None)` and each channel decides what that means.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LookupError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[cfg(feature = "http")]
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base address is not a usable URL.
    #[error("invalid lookup base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The service answered with a body that is not a list of localities.
    #[error("malformed lookup response: {reason}")]
    Decode { reason: String },

    /// The collaborator could not be reached for a reason it describes itself.
    #[error("lookup unavailable: {reason}")]
    Unavailable { reason: String },
}

/// The verdict shown to the user when a resolution attempt is rejected.
///
/// At most one is shown at a time, and it replaces the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationError {
    /// A locality query matched no records.
    #[error("Invalid Locality")]
    InvalidLocality,

    /// A postal code query matched no records, or the lookup itself failed.
    #[error("Invalid Postal Code")]
    InvalidPostalCode,
}
