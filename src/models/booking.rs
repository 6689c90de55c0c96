use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A booking occupying an inclusive date range. A single-day booking has
/// `start_date == end_date`. Rejected or deleted bookings are removed from
/// the ledger entirely rather than tombstoned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// Whether this booking's range covers the given date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether this booking's range overlaps [start, end] (inclusive).
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    /// Display form used in notification templates.
    pub fn date_display(&self) -> String {
        if self.start_date == self.end_date {
            self.start_date.to_string()
        } else {
            format!("From {} To {}", self.start_date, self.end_date)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "approved" => BookingStatus::Approved,
            _ => BookingStatus::Pending,
        }
    }
}
