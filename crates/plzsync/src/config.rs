use crate::DEFAULT_MIN_POSTAL_CODE_DIGITS;
use core::time::Duration;

/// Base address of the public OpenPLZ locality endpoint.
pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://openplzapi.org/de/Localities";

/// Quiet period a field must observe before its lookup fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Per-request timeout applied by the HTTP lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for a [`Resolver`](crate::Resolver).
///
/// The defaults reproduce the behaviour users expect from the address form:
/// a one second debounce and a three digit threshold before postal codes are
/// looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Quiet period before a changed field triggers its lookup.
    pub debounce: Duration,
    /// Postal codes shorter than this never trigger a lookup.
    pub min_postal_code_digits: usize,
    /// Capacity of the resolver's inbox.
    pub inbox_capacity: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_postal_code_digits: DEFAULT_MIN_POSTAL_CODE_DIGITS,
            inbox_capacity: 64,
        }
    }
}

impl ResolverConfig {
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub const fn with_min_postal_code_digits(mut self, digits: usize) -> Self {
        self.min_postal_code_digits = digits;
        self
    }

    #[must_use]
    pub const fn with_inbox_capacity(mut self, capacity: usize) -> Self {
        self.inbox_capacity = capacity;
        self
    }
}
