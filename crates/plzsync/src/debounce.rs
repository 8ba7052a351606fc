//! Cancellable quiet-period timers.

use crate::SleepProvider;
use core::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// One restartable timer per channel.
///
/// At most one timer is armed at a time: arming a new one cancels the old.
/// Every timer is a child of `root`, so cancelling the root stops them all.
/// The expiry message goes through a weak sender and is dropped if the
/// receiving actor is already gone.
#[derive(Debug)]
pub(crate) struct Debouncer {
    root: CancellationToken,
    pending: Option<CancellationToken>,
}

impl Debouncer {
    pub(crate) const fn new(root: CancellationToken) -> Self {
        Self {
            root,
            pending: None,
        }
    }

    /// Arms the timer, replacing any timer still running. `message` is
    /// delivered once `delay` passes without another call to `schedule` or
    /// [`cancel`](Self::cancel).
    pub(crate) fn schedule<S, T>(&mut self, delay: Duration, tx: mpsc::WeakSender<T>, message: T)
    where
        S: SleepProvider,
        T: Send + 'static,
    {
        self.cancel();

        let token = self.root.child_token();
        self.pending = Some(token.clone());

        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = S::sleep_for(delay) => {
                    if let Some(tx) = tx.upgrade() {
                        let _ = tx.send(message).await;
                    }
                }
            }
        });
    }

    /// Disarms the timer. A no-op if none is running.
    pub(crate) fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_cancelled())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokioSleep;

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_the_quiet_period() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut debouncer = Debouncer::new(CancellationToken::new());

        debouncer.schedule::<TokioSleep, _>(Duration::from_millis(1000), tx.downgrade(), 1);
        assert!(debouncer.is_armed());

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_restarts_the_period() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut debouncer = Debouncer::new(CancellationToken::new());

        debouncer.schedule::<TokioSleep, _>(Duration::from_millis(1000), tx.downgrade(), 1);
        tokio::time::sleep(Duration::from_millis(600)).await;
        debouncer.schedule::<TokioSleep, _>(Duration::from_millis(1000), tx.downgrade(), 2);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(rx.recv().await, Some(2));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timers_stay_silent() {
        let (tx, mut rx) = mpsc::channel::<u8>(4);
        let root = CancellationToken::new();
        let mut channel_a = Debouncer::new(root.clone());
        let mut channel_b = Debouncer::new(root.clone());

        channel_a.schedule::<TokioSleep, _>(Duration::from_millis(10), tx.downgrade(), 1);
        channel_b.schedule::<TokioSleep, _>(Duration::from_millis(10), tx.downgrade(), 2);
        channel_a.cancel();
        assert!(!channel_a.is_armed());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(rx.recv().await, Some(2));

        channel_b.schedule::<TokioSleep, _>(Duration::from_millis(10), tx.downgrade(), 3);
        root.cancel();
        assert!(!channel_b.is_armed());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
    }
}
