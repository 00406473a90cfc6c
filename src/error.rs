//! Error types for property-desk
//!
//! All failures here are recoverable: the session loop reports them and
//! keeps running. Empty query results and id lookups that find nothing are
//! not errors and never pass through these types.

use thiserror::Error;

/// Errors raised by [`crate::store::PropertyStore`] operations
///
/// Only `add` can fail; every query is total over any store state.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// A record with this id was already accepted this session
    #[error("property id {0} already exists")]
    DuplicateId(u32),

    /// The candidate record violates a domain invariant
    #[error("invalid property: {0}")]
    InvalidInput(#[from] InputError),
}

/// Errors raised while converting raw form input into a typed record
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    /// A required form field was not supplied
    #[error("missing required field '{field}'")]
    MissingField {
        /// The field that was absent
        field: &'static str,
    },

    /// A required field was supplied but blank
    #[error("field '{field}' must not be empty")]
    EmptyField {
        /// The field that was blank
        field: &'static str,
    },

    /// A numeric field could not be parsed
    #[error("field '{field}' is not a number: '{value}'")]
    NotANumber {
        /// The field that failed to parse
        field: &'static str,
        /// The raw text that was rejected
        value: String,
    },

    /// A numeric field parsed but falls outside its declared domain
    #[error("field '{field}' is out of range: {reason}")]
    OutOfDomain {
        /// The field that failed validation
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The form text itself was malformed (bad quoting, stray token)
    #[error("malformed input: {0}")]
    Malformed(String),
}
