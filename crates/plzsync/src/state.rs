//! The form state and its reducer.
//!
//! [`FormState::apply`] is a pure, synchronous transition: it takes one
//! [`Action`], updates the state, and returns the [`Effect`]s the runtime has
//! to carry out (start or stop a debounce timer, issue a lookup). No timer or
//! network call happens in here, which is what lets every transition be
//! asserted without waiting on anything.
//!
//! After every action the reducer compares both field values with what they
//! were before. A changed value restarts its channel, no matter whether the
//! user typed it or the other channel derived it.

use crate::{
    CandidateSet, Channel, DEFAULT_MIN_POSTAL_CODE_DIGITS, DropdownController, FieldStatus,
    LookupFilter, LookupResult, ValidationError, channel::ChannelState,
};

/// Everything that can happen to the form.
#[derive(Debug)]
pub enum Action {
    /// The user typed into the locality input.
    EditLocality(String),
    /// The user typed into the postal code input. Non-digits are stripped.
    EditPostalCode(String),
    /// The user activated the dropdown toggle.
    ToggleDropdown,
    /// The user picked a postal code from the dropdown.
    SelectCandidate(String),
    /// A pointer interaction happened outside the postal code region.
    DismissDropdown,
    /// A channel's quiet period ended for request `seq`.
    DebounceElapsed { channel: Channel, seq: u64 },
    /// A channel's lookup for request `seq` completed.
    LookupFinished {
        channel: Channel,
        seq: u64,
        result: LookupResult,
    },
}

/// Work the runtime must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the channel's debounce timer for request `seq`, replacing any
    /// timer that is still running.
    Schedule { channel: Channel, seq: u64 },
    /// Stop the channel's debounce timer, if one is running.
    Cancel { channel: Channel },
    /// Issue a lookup for request `seq`.
    Lookup { seq: u64, filter: LookupFilter },
}

/// State of the two-field address form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub(crate) locality: String,
    pub(crate) postal_code: String,
    pub(crate) candidates: CandidateSet,
    pub(crate) dropdown: DropdownController,
    pub(crate) error: Option<ValidationError>,
    pub(crate) inflight: usize,
    pub(crate) locality_channel: ChannelState,
    pub(crate) postal_code_channel: ChannelState,
    min_postal_code_digits: usize,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_POSTAL_CODE_DIGITS)
    }
}

impl FormState {
    pub fn new(min_postal_code_digits: usize) -> Self {
        Self {
            locality: String::new(),
            postal_code: String::new(),
            candidates: CandidateSet::default(),
            dropdown: DropdownController::default(),
            error: None,
            inflight: 0,
            locality_channel: ChannelState::default(),
            postal_code_channel: ChannelState::default(),
            min_postal_code_digits,
        }
    }

    pub const fn min_postal_code_digits(&self) -> usize {
        self.min_postal_code_digits
    }

    pub fn locality(&self) -> &str {
        &self.locality
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub const fn dropdown_open(&self) -> bool {
        self.dropdown.is_open()
    }

    pub const fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Whether any lookup is in flight.
    pub const fn loading(&self) -> bool {
        self.inflight > 0
    }

    /// Derived status of the field driving `channel`.
    pub fn status(&self, channel: Channel) -> FieldStatus {
        match channel {
            Channel::Locality => self.locality_channel.status(&self.locality),
            Channel::PostalCode => self.postal_code_channel.status(&self.postal_code),
        }
    }

    /// Applies one action and returns the effects it requires.
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        let before = (self.locality.clone(), self.postal_code.clone());

        match action {
            Action::EditLocality(value) => self.edit_locality(value),
            Action::EditPostalCode(raw) => self.edit_postal_code(&raw),
            Action::ToggleDropdown => self.toggle_dropdown(),
            Action::SelectCandidate(code) => self.select_candidate(&code),
            Action::DismissDropdown => self.dismiss_dropdown(),
            Action::DebounceElapsed { channel, seq } => return self.start_lookup(channel, seq),
            Action::LookupFinished {
                channel,
                seq,
                result,
            } => self.finish_lookup(channel, seq, result),
        }

        self.react(&before.0, &before.1)
    }

    /// Restarts the channels whose field value changed.
    fn react(&mut self, locality_before: &str, postal_code_before: &str) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.locality != locality_before {
            if self.locality.is_empty() {
                // Nothing to look up; whatever the old value offered is gone.
                self.locality_channel.supersede();
                self.clear_candidates();
                effects.push(Effect::Cancel {
                    channel: Channel::Locality,
                });
            } else {
                let seq = self.locality_channel.schedule();
                effects.push(Effect::Schedule {
                    channel: Channel::Locality,
                    seq,
                });
            }
        }

        if self.postal_code != postal_code_before {
            if self.postal_code.len() < self.min_postal_code_digits {
                // Still typing.
                self.postal_code_channel.supersede();
                effects.push(Effect::Cancel {
                    channel: Channel::PostalCode,
                });
            } else {
                let seq = self.postal_code_channel.schedule();
                effects.push(Effect::Schedule {
                    channel: Channel::PostalCode,
                    seq,
                });
            }
        }

        effects
    }

    /// Turns an elapsed debounce into a lookup, unless it was superseded.
    fn start_lookup(&mut self, channel: Channel, seq: u64) -> Vec<Effect> {
        let (state, filter) = match channel {
            Channel::Locality => (
                &self.locality_channel,
                LookupFilter::Name(self.locality.clone()),
            ),
            Channel::PostalCode => (
                &self.postal_code_channel,
                LookupFilter::PostalCode(self.postal_code.clone()),
            ),
        };

        if !state.is_current(seq) {
            #[cfg(feature = "tracing")]
            tracing::trace!("{channel} debounce #{seq} superseded");
            return Vec::new();
        }

        self.inflight += 1;
        self.error = None;
        vec![Effect::Lookup { seq, filter }]
    }

    fn finish_lookup(&mut self, channel: Channel, seq: u64, result: LookupResult) {
        self.inflight = self.inflight.saturating_sub(1);

        let current = match channel {
            Channel::Locality => self.locality_channel.is_current(seq),
            Channel::PostalCode => self.postal_code_channel.is_current(seq),
        };
        if !current {
            #[cfg(feature = "tracing")]
            tracing::debug!("discarding stale {channel} lookup #{seq}");
            return;
        }

        match channel {
            Channel::Locality => self.finish_locality_lookup(result),
            Channel::PostalCode => self.finish_postal_code_lookup(result),
        }
    }
}
