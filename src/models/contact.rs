use serde::{Deserialize, Serialize};

/// Autofill directory entry, keyed by email. Populated on first sight of an
/// email in a booking or waitlist submission and never deleted by the core.
/// Not an identity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}
