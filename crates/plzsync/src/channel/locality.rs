//! Locality → postal code.
//!
//! A locality query can match zero, one or many distinct postal codes. Many
//! is not an error: the codes are offered for disambiguation instead.
//! Failures of the lookup itself are only logged, the form is left as it was.

use crate::{CandidateSet, LocalityRecord, LookupResult, ValidationError, state::FormState};

/// Classification of a locality query's records by distinct postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalityResolution {
    /// No record matched.
    Unknown,
    /// Every record shares one postal code.
    Unique(String),
    /// More than one distinct postal code; sorted and deduplicated.
    Ambiguous(CandidateSet),
}

/// Classifies the records returned for a locality query.
///
/// ```
/// use plzsync::{LocalityRecord, LocalityResolution, classify_locality};
///
/// let records = [
///     LocalityRecord::new("Berlin", "13353"),
///     LocalityRecord::new("Berlin", "10115"),
/// ];
/// match classify_locality(&records) {
///     LocalityResolution::Ambiguous(codes) => assert_eq!(codes.as_slice(), ["10115", "13353"]),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn classify_locality(records: &[LocalityRecord]) -> LocalityResolution {
    let codes = CandidateSet::from_codes(records.iter().map(|r| r.postal_code.as_str()));
    match codes.as_slice() {
        [] => LocalityResolution::Unknown,
        [code] => LocalityResolution::Unique(code.clone()),
        _ => LocalityResolution::Ambiguous(codes),
    }
}

impl FormState {
    /// Writes the outcome of the current locality lookup into the form.
    pub(crate) fn finish_locality_lookup(&mut self, result: LookupResult) {
        let records = match result {
            Ok(Some(records)) => records,
            Ok(None) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    locality = %self.locality,
                    "Locality lookup failed: service answered with a non-success status"
                );
                self.locality_channel.abandon();
                return;
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(locality = %self.locality, "Locality lookup failed: {_e}");
                self.locality_channel.abandon();
                return;
            }
        };

        match classify_locality(&records) {
            LocalityResolution::Unknown => {
                self.error = Some(ValidationError::InvalidLocality);
                self.postal_code.clear();
                self.clear_candidates();
                self.locality_channel.settle(&self.locality, false);
            }
            LocalityResolution::Unique(code) => {
                self.error = None;
                self.postal_code = code;
                self.clear_candidates();
                self.locality_channel.settle(&self.locality, true);
            }
            LocalityResolution::Ambiguous(candidates) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    locality = %self.locality,
                    "{} postal codes match, offering them for disambiguation",
                    candidates.len()
                );
                self.error = None;
                self.offer_candidates(candidates);
                self.locality_channel.settle(&self.locality, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_records_is_unknown() {
        assert_eq!(classify_locality(&[]), LocalityResolution::Unknown);
    }

    #[test]
    fn duplicate_codes_collapse_to_unique() {
        let records = [
            LocalityRecord::new("Hamburg", "20095"),
            LocalityRecord::new("Hamburg Altstadt", "20095"),
        ];
        assert_eq!(
            classify_locality(&records),
            LocalityResolution::Unique("20095".into())
        );
    }

    #[test]
    fn distinct_codes_are_ambiguous_and_sorted() {
        let records = [
            LocalityRecord::new("Berlin", "13353"),
            LocalityRecord::new("Berlin", "10115"),
            LocalityRecord::new("Berlin", "13353"),
        ];
        assert_eq!(
            classify_locality(&records),
            LocalityResolution::Ambiguous(CandidateSet::from_codes(["10115", "13353"]))
        );
    }
}
