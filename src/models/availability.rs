use serde::{Deserialize, Serialize};

/// Computed occupancy of a calendar date, derived from ledger contents.
/// Precedence when several records touch a date: approved > pending >
/// waiting > available.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateStatus {
    Available,
    Pending,
    Approved,
    Waiting,
}

impl DateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateStatus::Available => "available",
            DateStatus::Pending => "pending",
            DateStatus::Approved => "approved",
            DateStatus::Waiting => "waiting",
        }
    }

    /// An approved date is exclusively held and cannot be selected for a
    /// direct booking; every other status can (pending dates implicitly
    /// offer the waitlist path).
    pub fn is_exclusive(&self) -> bool {
        matches!(self, DateStatus::Approved)
    }
}
