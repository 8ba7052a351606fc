//! Resolution channels.
//!
//! Each field drives one channel: a change schedules a debounced lookup, the
//! lookup's records are classified, and the verdict is written back into the
//! form. The two channels are deliberately asymmetric in how they treat
//! failures; see [`locality`] and [`postal_code`].

mod locality;
mod postal_code;

pub use self::locality::*;
pub use self::postal_code::*;

use crate::FieldStatus;

/// The verdict a channel reached for one specific raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Verdict {
    value: String,
    accepted: bool,
}

/// Request bookkeeping for one channel.
///
/// Every change of the field's value bumps `seq`. Timer expiries and lookup
/// completions carry the `seq` they were issued for, and only the latest one
/// may write state. Older ones are stale and are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ChannelState {
    seq: u64,
    pending: bool,
    verdict: Option<Verdict>,
}

impl ChannelState {
    /// Invalidates whatever was scheduled or in flight for older values.
    pub(crate) fn supersede(&mut self) -> u64 {
        self.seq += 1;
        self.pending = false;
        self.seq
    }

    /// Supersedes older requests and marks a new one as pending.
    pub(crate) fn schedule(&mut self) -> u64 {
        let seq = self.supersede();
        self.pending = true;
        seq
    }

    /// Whether `seq` is the request this channel is still waiting on.
    pub(crate) const fn is_current(&self, seq: u64) -> bool {
        self.pending && self.seq == seq
    }

    /// Records a verdict for `value` and ends the pending request.
    pub(crate) fn settle(&mut self, value: &str, accepted: bool) {
        self.pending = false;
        self.verdict = Some(Verdict {
            value: value.to_owned(),
            accepted,
        });
    }

    /// Ends the pending request without reaching a verdict.
    pub(crate) fn abandon(&mut self) {
        self.pending = false;
    }

    /// Derives the field status for the value currently shown.
    pub(crate) fn status(&self, value: &str) -> FieldStatus {
        if self.pending {
            return FieldStatus::Pending;
        }
        match &self.verdict {
            Some(verdict) if verdict.value == value && verdict.accepted => FieldStatus::Resolved,
            Some(verdict) if verdict.value == value => FieldStatus::Invalid,
            _ => FieldStatus::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_request_is_current() {
        let mut channel = ChannelState::default();
        let first = channel.schedule();
        let second = channel.schedule();

        assert!(!channel.is_current(first));
        assert!(channel.is_current(second));

        channel.supersede();
        assert!(!channel.is_current(second));
    }

    #[test]
    fn status_is_tied_to_the_value_that_produced_it() {
        let mut channel = ChannelState::default();
        assert_eq!(channel.status("Berlin"), FieldStatus::Idle);

        channel.schedule();
        assert_eq!(channel.status("Berlin"), FieldStatus::Pending);

        channel.settle("Berlin", true);
        assert_eq!(channel.status("Berlin"), FieldStatus::Resolved);
        assert_eq!(channel.status("Berli"), FieldStatus::Idle);

        channel.schedule();
        channel.settle("Xyz", false);
        assert_eq!(channel.status("Xyz"), FieldStatus::Invalid);
    }

    #[test]
    fn abandon_keeps_previous_verdict() {
        let mut channel = ChannelState::default();
        channel.schedule();
        channel.settle("Berlin", true);

        channel.schedule();
        channel.abandon();
        assert_eq!(channel.status("Berlin"), FieldStatus::Resolved);
    }
}
