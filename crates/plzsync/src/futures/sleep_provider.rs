use core::{future::Future, time::Duration};

/// A trait that abstracts over how a debounce timer waits for its quiet
/// period.
///
/// The resolver is generic over this so that hosts (and tests) can decide
/// whether a debounce is a real timer or an immediate yield.
pub trait SleepProvider: Send + Sync + 'static {
    /// We require `Send + 'static` so that the timer can live inside a
    /// spawned task.
    type Sleep: Future<Output = ()> + Send + 'static;

    fn sleep_for(dur: Duration) -> Self::Sleep;
}
