//! Domain-level command types.
//!
//! These carry raw, unvalidated input from the IO layer into the service.
//! The REST mappers build them from the `shared` DTOs.

/// Scalar contact fields exactly as received.
///
/// A required name that was missing on the wire is an empty string here, and
/// a missing optional field is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
}

/// Child names supplied inline with a create request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewChildren {
    pub hobbies: Vec<String>,
    pub pets: Vec<String>,
}
