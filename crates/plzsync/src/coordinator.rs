//! Mutual exclusion between the two fields.
//!
//! Only one field drives at a time. A direct edit synchronously wipes what the
//! other field had derived, before the reducer schedules anything for the new
//! value, so a stale counterpart can never outlive the edit that invalidated
//! it.

use crate::{sanitize_postal_code, state::FormState};

impl FormState {
    /// Direct edit of the locality input.
    ///
    /// A non-empty value takes over: the postal code, the candidates and the
    /// dropdown are cleared. Clearing the locality leaves the postal code
    /// alone.
    pub(crate) fn edit_locality(&mut self, value: String) {
        self.error = None;
        if !value.is_empty() {
            self.postal_code.clear();
            self.clear_candidates();
        }
        self.locality = value;
    }

    /// Direct edit of the postal code input.
    ///
    /// Non-digits are stripped first. A non-empty value takes over and clears
    /// the locality, which in turn drops any candidates the locality had
    /// produced.
    pub(crate) fn edit_postal_code(&mut self, raw: &str) {
        let value = sanitize_postal_code(raw);
        self.error = None;
        self.dismiss_dropdown();
        if !value.is_empty() {
            self.locality.clear();
        }
        self.postal_code = value;
    }
}
