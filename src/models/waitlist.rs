use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A request to be notified when an occupied date frees up. Entries are
/// created only for dates already held by a pending or approved booking,
/// and are removed automatically when a booking for the same (date, email)
/// is approved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
    pub status: WaitlistStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    Waiting,
}

impl WaitlistStatus {
    pub fn as_str(&self) -> &'static str {
        "waiting"
    }
}
