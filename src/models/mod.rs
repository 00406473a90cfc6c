use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Highest rating a property can carry.
pub const MAX_RATING: f32 = 5.0;

/// Core property data model
///
/// Records are immutable once accepted into the store; there is no update
/// or delete path during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Caller-assigned identifier, unique within a session
    pub id: u32,
    /// Display name of the property
    pub name: String,
    /// Free-text location, matched by substring search
    pub location: String,
    /// Asking price in whole dollars
    pub price: i64,
    /// Living area in square feet
    pub size: i32,
    /// Rating on a 0-5 scale
    pub rating: f32,
    /// Absent means "not applicable", not zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    /// Optional free-text description
    #[serde(default)]
    pub description: String,
    /// Opaque image reference (URL or placeholder); never interpreted here
    pub image: String,
}

impl PropertyRecord {
    /// Check the record's domain invariants.
    ///
    /// The form layer runs the same checks while converting raw input, but
    /// the store calls this again so records reaching it through other
    /// paths (e.g. a seed source) cannot violate the invariants.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.name.trim().is_empty() {
            return Err(InputError::EmptyField { field: "name" });
        }
        if self.location.trim().is_empty() {
            return Err(InputError::EmptyField { field: "location" });
        }
        if self.price < 0 {
            return Err(InputError::OutOfDomain {
                field: "price",
                reason: format!("{} is negative", self.price),
            });
        }
        if self.size < 0 {
            return Err(InputError::OutOfDomain {
                field: "size",
                reason: format!("{} is negative", self.size),
            });
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(InputError::OutOfDomain {
                field: "rating",
                reason: format!("{} is outside 0-{}", self.rating, MAX_RATING),
            });
        }
        Ok(())
    }
}
