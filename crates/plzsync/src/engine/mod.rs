//! The resolver actor and the handle the host talks to it through.
//!
//! A [`Resolver`] owns one [`FormState`](crate::FormState) on a spawned task
//! and applies every input in arrival order. Hosts hold a cloneable
//! [`ResolverHandle`] to feed user interactions in, and watch
//! [`FormSnapshot`]s come back out.
//!
//! ```no_run
//! use plzsync::{HttpLookup, Resolver, ResolverConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = Resolver::spawn(Arc::new(HttpLookup::openplz()?), ResolverConfig::default());
//! let mut renders = resolver.subscribe()?;
//!
//! resolver.edit_locality("München").await?;
//! renders.wait_for(|form| !form.postal_code.value.is_empty()).await?;
//! println!("{}", renders.borrow().postal_code.value);
//!
//! resolver.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod actor;

use self::actor::{Actor, Message};
use crate::{
    Action, Error, FormSnapshot, Lookup, PointerRegion, ResolverConfig, Result, SleepProvider,
    TokioSleep,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;

/// Entry point for starting resolver actors.
#[derive(Debug, Clone, Copy)]
pub struct Resolver;

impl Resolver {
    /// Starts a resolver whose debounce timers run on Tokio's clock.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn<L: Lookup>(lookup: Arc<L>, config: ResolverConfig) -> ResolverHandle {
        Self::spawn_with::<L, TokioSleep>(lookup, config)
    }

    /// Starts a resolver using `S` to wait out debounce periods.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn_with<L, S>(lookup: Arc<L>, config: ResolverConfig) -> ResolverHandle
    where
        L: Lookup,
        S: SleepProvider,
    {
        let (tx, rx) = mpsc::channel(config.inbox_capacity.max(1));
        let (renders_tx, renders) = watch::channel(FormSnapshot::default());
        let shutdown = CancellationToken::new();

        let actor = Actor::<L, S>::new(
            lookup,
            &config,
            tx.downgrade(),
            shutdown.clone(),
            renders_tx,
        );
        tokio::spawn(actor.run(rx));

        ResolverHandle {
            tx,
            renders,
            shutdown,
        }
    }
}

/// A cloneable handle to a running resolver.
///
/// All clones talk to the same actor. Once [`shutdown`](Self::shutdown) has
/// been called through any of them, every operation on every clone fails with
/// [`Error::ResolverClosed`]. Dropping the last handle also stops the actor.
#[derive(Debug, Clone)]
pub struct ResolverHandle {
    tx: mpsc::Sender<Message>,
    renders: watch::Receiver<FormSnapshot>,
    shutdown: CancellationToken,
}

impl ResolverHandle {
    /// The user typed into the locality input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] if the resolver has shut down.
    pub async fn edit_locality(&self, value: impl Into<String>) -> Result<()> {
        self.send(Message::Action(Action::EditLocality(value.into())))
            .await
    }

    /// The user typed into the postal code input. Non-digits are stripped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] if the resolver has shut down.
    pub async fn edit_postal_code(&self, value: impl Into<String>) -> Result<()> {
        self.send(Message::Action(Action::EditPostalCode(value.into())))
            .await
    }

    /// The user activated the dropdown toggle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] if the resolver has shut down.
    pub async fn toggle_dropdown(&self) -> Result<()> {
        self.send(Message::Action(Action::ToggleDropdown)).await
    }

    /// The user picked `code` from the dropdown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] if the resolver has shut down.
    pub async fn select_candidate(&self, code: impl Into<String>) -> Result<()> {
        self.send(Message::Action(Action::SelectCandidate(code.into())))
            .await
    }

    /// Routes a pointer-down on `target`. Anything outside `region` (the
    /// postal code input and its dropdown) dismisses the dropdown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] if the resolver has shut down.
    pub async fn pointer_down<T, R>(&self, region: &R, target: &T) -> Result<()>
    where
        T: ?Sized,
        R: PointerRegion<T> + ?Sized,
    {
        if region.contains(target) {
            return self.ensure_open();
        }
        self.send(Message::Action(Action::DismissDropdown)).await
    }

    /// The current render, after every input sent so far has been applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] if the resolver has shut down.
    pub async fn snapshot(&self) -> Result<FormSnapshot> {
        let (reply, response) = oneshot::channel();
        self.send(Message::Snapshot(reply)).await?;
        response.await.map_err(|_| Error::ResolverClosed)
    }

    /// A receiver that observes every render the resolver publishes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResolverClosed`] if the resolver has shut down.
    pub fn subscribe(&self) -> Result<watch::Receiver<FormSnapshot>> {
        self.ensure_open()?;
        Ok(self.renders.clone())
    }

    /// Tears the resolver down and waits until the actor has exited.
    ///
    /// Pending debounce timers and in-flight lookups are aborted and will
    /// never write to the form. Subscribers see one last render of the empty
    /// form. Calling this more than once is harmless.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for teardown steps that
    /// can fail.
    pub async fn shutdown(&self) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!("shutting down resolver");

        self.shutdown.cancel();
        self.tx.closed().await;
        Ok(())
    }

    /// Whether the resolver no longer accepts input.
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled() || self.tx.is_closed()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::ResolverClosed);
        }
        Ok(())
    }

    async fn send(&self, message: Message) -> Result<()> {
        self.ensure_open()?;
        self.tx
            .send(message)
            .await
            .map_err(|_| Error::ResolverClosed)
    }
}
