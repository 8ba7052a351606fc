//! Postal code → locality.
//!
//! The postal code is the more specific key, so there is no disambiguation in
//! this direction: the first matching record wins. Any failure, including
//! the lookup call itself failing, rejects the postal code. The postal code
//! the user typed is never cleared.

use crate::{LocalityRecord, LookupResult, ValidationError, state::FormState};

/// Classification of a postal code query's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeResolution {
    /// No record matched.
    Unknown,
    /// The name of the first matching record.
    Resolved(String),
}

/// Classifies the records returned for a postal code query (first match).
pub fn classify_postal_code(records: &[LocalityRecord]) -> PostalCodeResolution {
    records
        .first()
        .map_or(PostalCodeResolution::Unknown, |record| {
            PostalCodeResolution::Resolved(record.name.clone())
        })
}

impl FormState {
    /// Writes the outcome of the current postal code lookup into the form.
    pub(crate) fn finish_postal_code_lookup(&mut self, result: LookupResult) {
        let resolution = match result {
            Ok(Some(records)) => classify_postal_code(&records),
            Ok(None) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    postal_code = %self.postal_code,
                    "PLZ lookup failed: service answered with a non-success status"
                );
                PostalCodeResolution::Unknown
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(postal_code = %self.postal_code, "PLZ lookup failed: {_e}");
                PostalCodeResolution::Unknown
            }
        };

        match resolution {
            PostalCodeResolution::Resolved(name) => {
                self.locality = name;
                self.clear_candidates();
                self.postal_code_channel.settle(&self.postal_code, true);
            }
            PostalCodeResolution::Unknown => {
                self.error = Some(ValidationError::InvalidPostalCode);
                self.postal_code_channel.settle(&self.postal_code, false);
            }
        }
    }
}
