use core::fmt;
use serde::{Deserialize, Serialize};

/// One row returned by the lookup service.
///
/// Records are immutable once received. The service returns more fields
/// (municipality, district, federal state); they are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalityRecord {
    pub name: String,
    pub postal_code: String,
}

impl LocalityRecord {
    pub fn new(name: impl Into<String>, postal_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            postal_code: postal_code.into(),
        }
    }
}

/// The single filter a lookup is issued with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupFilter {
    /// Match localities by name.
    Name(String),
    /// Match localities by postal code.
    PostalCode(String),
}

impl LookupFilter {
    /// Returns the query parameter `(key, value)` pair for this filter.
    pub fn query_pair(&self) -> (&'static str, &str) {
        match self {
            Self::Name(name) => ("name", name),
            Self::PostalCode(code) => ("postalCode", code),
        }
    }

    /// The resolution channel this filter belongs to.
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Name(_) => Channel::Locality,
            Self::PostalCode(_) => Channel::PostalCode,
        }
    }
}

impl fmt::Display for LookupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key, value) = self.query_pair();
        write!(f, "{key}={value}")
    }
}

/// One direction of resolution, named after the field that drives it.
///
/// - [`Channel::Locality`] resolves a locality name into postal codes.
/// - [`Channel::PostalCode`] resolves a postal code into a locality name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Locality,
    PostalCode,
}

impl Channel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locality => "locality",
            Self::PostalCode => "postal_code",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived status of one input field.
///
/// Never stored on its own: it is computed from the field's raw value and the
/// last verdict its channel reached for that exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldStatus {
    /// Nothing has been resolved for the current value.
    #[default]
    Idle,
    /// A lookup for the current value is scheduled or in flight.
    Pending,
    /// The current value was confirmed by the lookup service.
    Resolved,
    /// The current value was rejected by the lookup service.
    Invalid,
}
