//! Render model for the host UI.

use crate::{CandidateSet, Channel, FieldStatus, ValidationError, state::FormState};
use core::fmt;

/// The single status region below the inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusLine {
    #[default]
    Idle,
    Loading,
    Error(ValidationError),
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => Ok(()),
            Self::Loading => f.write_str("Verifying details..."),
            Self::Error(e) => write!(f, "{e}"),
        }
    }
}

/// One input as the user sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub value: String,
    pub status: FieldStatus,
}

/// A point-in-time copy of everything the host renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub locality: FieldSnapshot,
    pub postal_code: FieldSnapshot,
    pub candidates: CandidateSet,
    pub dropdown_open: bool,
    pub loading: bool,
    pub error: Option<ValidationError>,
}

impl FormSnapshot {
    /// An error replaces the loading indicator; never both.
    pub const fn status_line(&self) -> StatusLine {
        match (self.error, self.loading) {
            (Some(e), _) => StatusLine::Error(e),
            (None, true) => StatusLine::Loading,
            (None, false) => StatusLine::Idle,
        }
    }

    /// Whether the dropdown toggle is shown at all.
    pub fn toggle_visible(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Candidates in display order, each paired with whether it equals the
    /// current postal code.
    pub fn visible_candidates(&self) -> impl Iterator<Item = (&str, bool)> {
        let selected = self.postal_code.value.as_str();
        let open = self.dropdown_open;
        self.candidates
            .iter()
            .filter(move |_| open)
            .map(move |code| (code, code == selected))
    }
}

impl FormState {
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            locality: FieldSnapshot {
                value: self.locality.clone(),
                status: self.status(Channel::Locality),
            },
            postal_code: FieldSnapshot {
                value: self.postal_code.clone(),
                status: self.status(Channel::PostalCode),
            },
            candidates: self.candidates.clone(),
            dropdown_open: self.dropdown_open(),
            loading: self.loading(),
            error: self.error,
        }
    }
}
