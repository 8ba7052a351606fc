//! Disambiguation store and dropdown controller.
//!
//! When a locality maps to more than one postal code, the distinct codes are
//! kept in a [`CandidateSet`] and offered through a dropdown. The dropdown's
//! visibility is owned by [`DropdownController`] and is independent of the
//! resolution pipelines: opening, closing or dismissing it never schedules a
//! lookup.

use crate::state::FormState;
use std::collections::BTreeSet;

/// Sorted, deduplicated postal codes offered for disambiguation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CandidateSet {
    codes: Vec<String>,
}

impl CandidateSet {
    /// Builds a set from any sequence of codes, dropping duplicates and
    /// sorting the remainder lexicographically.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: BTreeSet<String> = codes.into_iter().map(Into::into).collect();
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.binary_search_by(|c| c.as_str().cmp(code)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.codes
    }

    pub(crate) fn clear(&mut self) {
        self.codes.clear();
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a String;
    type IntoIter = core::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Visibility of the candidate dropdown.
///
/// The dropdown can only be open while there is something to show; callers
/// must close it whenever the candidate set is emptied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownController {
    open: bool,
}

impl DropdownController {
    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Flips visibility. A no-op while `candidates` is empty, because the
    /// toggle affordance is not shown then.
    pub(crate) fn toggle(&mut self, candidates: &CandidateSet) {
        if candidates.is_empty() {
            self.open = false;
        } else {
            self.open = !self.open;
        }
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }
}

/// The region a dropdown dismissal is measured against.
///
/// The host UI routes every pointer-down to
/// [`ResolverHandle::pointer_down`](crate::ResolverHandle::pointer_down)
/// together with the region describing "the postal code input and its
/// dropdown". Interactions outside that region close the dropdown.
///
/// Any `Fn(&T) -> bool` is a region.
pub trait PointerRegion<T: ?Sized> {
    fn contains(&self, target: &T) -> bool;
}

impl<T: ?Sized, F> PointerRegion<T> for F
where
    F: Fn(&T) -> bool,
{
    fn contains(&self, target: &T) -> bool {
        self(target)
    }
}

impl FormState {
    /// Opens or closes the dropdown.
    pub(crate) fn toggle_dropdown(&mut self) {
        self.dropdown.toggle(&self.candidates);
    }

    /// Closes the dropdown without touching the candidates, so reopening it
    /// shows the same list until a new locality query runs.
    pub(crate) fn dismiss_dropdown(&mut self) {
        self.dropdown.close();
    }

    /// Accepts a user-picked candidate as the postal code.
    ///
    /// Equivalent to the single-match outcome of a locality lookup, except
    /// that the user made the choice. Codes outside the current set are
    /// ignored.
    pub(crate) fn select_candidate(&mut self, code: &str) {
        if !self.candidates.contains(code) {
            #[cfg(feature = "tracing")]
            tracing::warn!("ignoring selection of `{code}`, not among the offered candidates");
            return;
        }

        self.postal_code = code.to_owned();
        self.clear_candidates();
    }

    /// Empties the candidate set. The dropdown always closes with it.
    pub(crate) fn clear_candidates(&mut self) {
        self.candidates.clear();
        self.dropdown.close();
    }

    /// Replaces the candidate set. The dropdown stays closed until the user
    /// opens it.
    pub(crate) fn offer_candidates(&mut self, candidates: CandidateSet) {
        self.candidates = candidates;
        self.dropdown.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_set_sorts_and_dedups() {
        let set = CandidateSet::from_codes(["13353", "10115", "13353", "10117"]);
        assert_eq!(set.as_slice(), ["10115", "10117", "13353"]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("10117"));
        assert!(!set.contains("99999"));
    }

    #[test]
    fn toggle_is_inert_without_candidates() {
        let mut dropdown = DropdownController::default();
        dropdown.toggle(&CandidateSet::default());
        assert!(!dropdown.is_open());

        let candidates = CandidateSet::from_codes(["10115", "13353"]);
        dropdown.toggle(&candidates);
        assert!(dropdown.is_open());
        dropdown.toggle(&candidates);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn closures_are_pointer_regions() {
        let region = |target: &str| matches!(target, "plz" | "dropdown");
        assert!(region.contains("plz"));
        assert!(!PointerRegion::contains(&region, "locality"));
    }

    #[test]
    fn dismiss_keeps_candidates_for_reopening() {
        let mut state = FormState::default();
        state.offer_candidates(CandidateSet::from_codes(["10115", "13353"]));
        state.toggle_dropdown();
        assert!(state.dropdown_open());

        state.dismiss_dropdown();
        assert!(!state.dropdown_open());
        assert_eq!(state.candidates().len(), 2);

        state.toggle_dropdown();
        assert!(state.dropdown_open());
    }

    #[test]
    fn selecting_a_candidate_fills_postal_code_and_clears_list() {
        let mut state = FormState::default();
        state.offer_candidates(CandidateSet::from_codes(["10115", "13353"]));
        state.toggle_dropdown();

        state.select_candidate("13353");
        assert_eq!(state.postal_code(), "13353");
        assert!(state.candidates().is_empty());
        assert!(!state.dropdown_open());
    }

    #[test]
    fn selecting_an_unknown_code_is_ignored() {
        let mut state = FormState::default();
        state.offer_candidates(CandidateSet::from_codes(["10115", "13353"]));

        state.select_candidate("80331");
        assert_eq!(state.postal_code(), "");
        assert_eq!(state.candidates().len(), 2);
    }
}
