use super::telemetry::{increment_lookup_failures, increment_lookups, record_lookup_duration};
use plzsync::{Lookup, LookupFilter, LookupResult};
use std::time::Instant;

/// Wraps a [`Lookup`] and records lookup metrics around every call.
#[derive(Debug, Clone)]
pub struct InstrumentedLookup<L> {
    inner: L,
}

impl<L: Lookup> InstrumentedLookup<L> {
    pub const fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<L: Lookup> Lookup for InstrumentedLookup<L> {
    async fn lookup(&self, filter: LookupFilter) -> LookupResult {
        let channel = filter.channel();
        increment_lookups(channel);

        let start = Instant::now();
        let result = self.inner.lookup(filter).await;
        record_lookup_duration(channel, start.elapsed().as_secs_f64() * 1000.0);

        match &result {
            Ok(Some(_)) => {}
            Ok(None) => increment_lookup_failures(channel),
            Err(e) => {
                increment_lookup_failures(channel);
                tracing::debug!(%channel, "lookup failed: {e}");
            }
        }
        result
    }
}
