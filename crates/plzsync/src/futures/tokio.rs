use super::SleepProvider;
use core::{future::Future, pin::Pin, time::Duration};

/// An implementation of [`SleepProvider`] using Tokio's timer.
///
/// This is the default provider: debounce timers wait for the full configured
/// quiet period.
pub struct TokioSleep;
impl SleepProvider for TokioSleep {
    type Sleep = tokio::time::Sleep;

    fn sleep_for(dur: Duration) -> Self::Sleep {
        tokio::time::sleep(dur)
    }
}

/// An implementation of [`SleepProvider`] using Tokio's yield.
///
/// Debounce timers elapse as soon as the scheduler gets back to them, so every
/// change fires its lookup on the next turn of the event loop. Useful for
/// scripted hosts and tests that do not care about the quiet period, but
/// note that supersession then depends on edits arriving within the same
/// scheduler turn.
pub struct TokioYield;
impl SleepProvider for TokioYield {
    /// Tokio's `yield_now()` returns a private future type, so we must use a
    /// boxed `dyn Future` to abstract over it.
    type Sleep = Pin<Box<dyn Future<Output = ()> + Send>>;

    fn sleep_for(_dur: Duration) -> Self::Sleep {
        Box::pin(tokio::task::yield_now())
    }
}
