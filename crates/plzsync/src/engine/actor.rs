use crate::{
    Action, Channel, Effect, FormSnapshot, FormState, Lookup, LookupFilter, ResolverConfig,
    SleepProvider, debounce::Debouncer,
};
use core::{marker::PhantomData, time::Duration};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;

/// Inputs processed by the actor, one at a time.
#[derive(Debug)]
pub(crate) enum Message {
    Action(Action),
    Snapshot(oneshot::Sender<FormSnapshot>),
}

/// Single owner of the form state.
///
/// Timers and lookups run on their own tasks and report back through a weak
/// sender, so they never keep the actor alive on their own. All of them hang
/// off `root`; cancelling it stops the actor and everything it started.
pub(crate) struct Actor<L, S> {
    state: FormState,
    lookup: Arc<L>,
    debounce: Duration,
    tx: mpsc::WeakSender<Message>,
    root: CancellationToken,
    locality_timer: Debouncer,
    postal_code_timer: Debouncer,
    renders: watch::Sender<FormSnapshot>,
    _sleep: PhantomData<fn() -> S>,
}

impl<L, S> Actor<L, S>
where
    L: Lookup,
    S: SleepProvider,
{
    pub(crate) fn new(
        lookup: Arc<L>,
        config: &ResolverConfig,
        tx: mpsc::WeakSender<Message>,
        root: CancellationToken,
        renders: watch::Sender<FormSnapshot>,
    ) -> Self {
        Self {
            state: FormState::new(config.min_postal_code_digits),
            lookup,
            debounce: config.debounce,
            tx,
            locality_timer: Debouncer::new(root.clone()),
            postal_code_timer: Debouncer::new(root.clone()),
            root,
            renders,
            _sleep: PhantomData,
        }
    }

    pub(crate) async fn run(mut self, mut rx: mpsc::Receiver<Message>) {
        #[cfg(feature = "tracing")]
        tracing::debug!("resolver started");

        let root = self.root.clone();
        loop {
            tokio::select! {
                biased;
                () = root.cancelled() => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("resolver shutdown via cancellation token");
                    break;
                }
                message = rx.recv() => match message {
                    Some(Message::Action(action)) => self.handle(action),
                    Some(Message::Snapshot(reply)) => {
                        let _ = reply.send(self.state.snapshot());
                    }
                    None => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!("all resolver handles dropped");
                        break;
                    }
                },
            }
        }

        // Nothing started by this actor may outlive it.
        self.root.cancel();
        self.state = FormState::new(self.state.min_postal_code_digits());
        self.render();
        rx.close();

        #[cfg(feature = "tracing")]
        tracing::debug!("resolver stopped");
    }

    fn handle(&mut self, action: Action) {
        #[cfg(feature = "tracing")]
        tracing::trace!(?action, "applying");

        for effect in self.state.apply(action) {
            self.perform(effect);
        }
        self.render();
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Schedule { channel, seq } => {
                let timer = match channel {
                    Channel::Locality => &mut self.locality_timer,
                    Channel::PostalCode => &mut self.postal_code_timer,
                };
                timer.schedule::<S, _>(
                    self.debounce,
                    self.tx.clone(),
                    Message::Action(Action::DebounceElapsed { channel, seq }),
                );
            }
            Effect::Cancel { channel } => match channel {
                Channel::Locality => self.locality_timer.cancel(),
                Channel::PostalCode => self.postal_code_timer.cancel(),
            },
            Effect::Lookup { seq, filter } => self.spawn_lookup(seq, filter),
        }
    }

    fn spawn_lookup(&self, seq: u64, filter: LookupFilter) {
        #[cfg(feature = "tracing")]
        tracing::debug!(%filter, seq, "issuing lookup");

        let channel = filter.channel();
        let lookup = Arc::clone(&self.lookup);
        let tx = self.tx.clone();
        let root = self.root.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = root.cancelled() => {}
                result = lookup.lookup(filter) => {
                    if let Some(tx) = tx.upgrade() {
                        let finished = Action::LookupFinished { channel, seq, result };
                        let _ = tx.send(Message::Action(finished)).await;
                    }
                }
            }
        });
    }

    fn render(&self) {
        let next = self.state.snapshot();
        self.renders.send_if_modified(|render| {
            if *render == next {
                return false;
            }
            *render = next;
            true
        });
    }
}
