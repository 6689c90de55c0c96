use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Booking, BookingStatus, Contact, DateStatus, WaitlistEntry, WaitlistStatus};
use crate::storage::{self, StorageAdapter};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("approved bookings can only be changed by the administrator")]
    ImmutableState,

    #[error("email does not match this booking")]
    Authorization,

    #[error("{date} is already exclusively booked")]
    Collision { date: NaiveDate },

    #[error("invalid state transition: booking is already approved")]
    InvalidStateTransition,
}

/// Fields accepted from a client booking submission.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
}

/// Fields accepted from a waitlist submission.
#[derive(Debug, Clone)]
pub struct NewWaitlist {
    pub date: NaiveDate,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
}

/// Contact fields a client may overwrite on an existing booking.
#[derive(Debug, Clone)]
pub struct BookingUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub waitlist: usize,
    pub contacts: usize,
}

/// Full read-only dump of ledger state, shaped for the export download.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub bookings: Vec<Booking>,
    pub waitlist: Vec<WaitlistEntry>,
    pub contacts: Vec<Contact>,
    pub exported_at: NaiveDateTime,
}

/// The authoritative in-memory collection of bookings, waitlist entries and
/// contacts. Loaded from the storage adapter at startup; every mutating
/// operation is followed by an explicit [`Ledger::persist`] call, so a
/// write is a deterministic step of each operation rather than a side
/// effect observed elsewhere.
#[derive(Debug, Default)]
pub struct Ledger {
    bookings: Vec<Booking>,
    waitlist: Vec<WaitlistEntry>,
    contacts: Vec<Contact>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all three collections from the adapter. Absent keys start
    /// empty. A malformed blob is logged and replaced by the default, a
    /// known data-loss risk of the storage format that gets surfaced
    /// rather than hidden.
    pub fn load(store: &dyn StorageAdapter) -> anyhow::Result<Self> {
        Ok(Self {
            bookings: decode_blob(store, storage::KEY_BOOKINGS)?,
            waitlist: decode_blob(store, storage::KEY_WAITLIST)?,
            contacts: decode_blob(store, storage::KEY_CONTACTS)?,
        })
    }

    /// Write all three collections back through the adapter.
    pub fn persist(&self, store: &dyn StorageAdapter) -> anyhow::Result<()> {
        store.save(storage::KEY_BOOKINGS, &serde_json::to_string(&self.bookings)?)?;
        store.save(storage::KEY_WAITLIST, &serde_json::to_string(&self.waitlist)?)?;
        store.save(storage::KEY_CONTACTS, &serde_json::to_string(&self.contacts)?)?;
        Ok(())
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn waitlist(&self) -> &[WaitlistEntry] {
        &self.waitlist
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    // ── Queries ──

    /// Occupancy of a single date. Approved bookings win over pending ones,
    /// which win over waitlist entries. Whether a past date is selectable
    /// is a calendar concern; the status itself depends only on ledger
    /// contents.
    pub fn availability(&self, date: NaiveDate) -> DateStatus {
        if self.booking_covering(date, BookingStatus::Approved).is_some() {
            return DateStatus::Approved;
        }
        if self.booking_covering(date, BookingStatus::Pending).is_some() {
            return DateStatus::Pending;
        }
        if self.waitlist.iter().any(|w| w.date == date) {
            return DateStatus::Waiting;
        }
        DateStatus::Available
    }

    pub fn booking_by_id(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn bookings_for_email(&self, email: &str) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.email == email)
            .cloned()
            .collect()
    }

    pub fn waitlist_for_email(&self, email: &str) -> Vec<WaitlistEntry> {
        self.waitlist
            .iter()
            .filter(|w| w.email == email)
            .cloned()
            .collect()
    }

    pub fn contact_by_email(&self, email: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.email == email)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total: self.bookings.len(),
            pending: self
                .bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count(),
            approved: self
                .bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Approved)
                .count(),
            waitlist: self.waitlist.len(),
            contacts: self.contacts.len(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bookings: self.bookings.clone(),
            waitlist: self.waitlist.clone(),
            contacts: self.contacts.clone(),
            exported_at: Utc::now().naive_utc(),
        }
    }

    // ── Transitions ──

    /// Create a pending booking. Several pending bookings may share a date
    /// (the first admin approval wins); a date exclusively held by an
    /// approved booking cannot be submitted onto and the caller must use
    /// the waitlist path instead.
    pub fn submit_booking(&mut self, req: NewBooking) -> Result<Booking, LedgerError> {
        require_contact_fields(&req.name, &req.email, &req.phone)?;

        let end_date = req.end_date.unwrap_or(req.start_date);
        if end_date < req.start_date {
            return Err(LedgerError::Validation(
                "end date must not precede start date".to_string(),
            ));
        }

        if let Some(held) = self
            .bookings
            .iter()
            .find(|b| b.status == BookingStatus::Approved && b.overlaps(req.start_date, end_date))
        {
            return Err(LedgerError::Collision {
                date: held.start_date.max(req.start_date),
            });
        }

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            start_date: req.start_date,
            end_date,
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            phone: req.phone.trim().to_string(),
            notes: req.notes,
            status: BookingStatus::Pending,
            created_at: Utc::now().naive_utc(),
        };

        self.register_contact(&booking.name, &booking.email, &booking.phone);
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    /// Join the waitlist for a date currently held by a pending or
    /// approved booking. An unoccupied date has nothing to wait for.
    pub fn submit_waitlist(&mut self, req: NewWaitlist) -> Result<WaitlistEntry, LedgerError> {
        require_contact_fields(&req.name, &req.email, &req.phone)?;

        let occupied = self
            .bookings
            .iter()
            .any(|b| b.covers(req.date));
        if !occupied {
            return Err(LedgerError::Validation(format!(
                "{} is open; submit a booking instead of a waitlist request",
                req.date
            )));
        }

        let entry = WaitlistEntry {
            id: Uuid::new_v4().to_string(),
            date: req.date,
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            phone: req.phone.trim().to_string(),
            notes: req.notes,
            status: WaitlistStatus::Waiting,
            created_at: Utc::now().naive_utc(),
        };

        self.register_contact(&entry.name, &entry.email, &entry.phone);
        self.waitlist.push(entry.clone());
        Ok(entry)
    }

    /// Overwrite contact fields on a booking and send it back through the
    /// approval queue. Approved bookings are immutable from the client
    /// side.
    pub fn edit_booking(&mut self, id: &str, update: BookingUpdate) -> Result<Booking, LedgerError> {
        require_contact_fields(&update.name, &update.email, &update.phone)?;

        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("booking {id}")))?;

        if booking.status == BookingStatus::Approved {
            return Err(LedgerError::ImmutableState);
        }

        booking.name = update.name.trim().to_string();
        booking.email = update.email.trim().to_string();
        booking.phone = update.phone.trim().to_string();
        booking.notes = update.notes;
        booking.status = BookingStatus::Pending;
        Ok(booking.clone())
    }

    /// Client-initiated removal, gated by an exact email match. This is a
    /// convenience check, not authentication.
    pub fn cancel_booking(&mut self, id: &str, email: &str) -> Result<Booking, LedgerError> {
        let idx = self.booking_index(id)?;

        if self.bookings[idx].email != email {
            return Err(LedgerError::Authorization);
        }

        Ok(self.bookings.remove(idx))
    }

    /// Admin approval. The approved range becomes exclusive, so approval
    /// fails if any other approved booking overlaps it. Waitlist entries
    /// matching the booking's (start date, email) are promoted out of the
    /// waitlist.
    pub fn approve_booking(&mut self, id: &str) -> Result<Booking, LedgerError> {
        let idx = self.booking_index(id)?;
        if self.bookings[idx].status == BookingStatus::Approved {
            return Err(LedgerError::InvalidStateTransition);
        }
        let (start, end) = (self.bookings[idx].start_date, self.bookings[idx].end_date);

        if let Some(held) = self.bookings.iter().find(|b| {
            b.id != id && b.status == BookingStatus::Approved && b.overlaps(start, end)
        }) {
            return Err(LedgerError::Collision {
                date: held.start_date.max(start),
            });
        }

        let email = self.bookings[idx].email.clone();
        self.waitlist
            .retain(|w| !(w.date == start && w.email == email));

        self.bookings[idx].status = BookingStatus::Approved;
        Ok(self.bookings[idx].clone())
    }

    /// Admin rejection of a pending booking: destructive, no tombstone
    /// kept. An approved booking is removed via client cancel or the
    /// generic delete, not via reject.
    pub fn reject_booking(&mut self, id: &str) -> Result<Booking, LedgerError> {
        let idx = self.booking_index(id)?;

        if self.bookings[idx].status == BookingStatus::Approved {
            return Err(LedgerError::InvalidStateTransition);
        }

        Ok(self.bookings.remove(idx))
    }

    /// Generic admin delete, allowed for any status including approved.
    pub fn delete_booking(&mut self, id: &str) -> Result<Booking, LedgerError> {
        let idx = self.booking_index(id)?;
        Ok(self.bookings.remove(idx))
    }

    fn booking_covering(&self, date: NaiveDate, status: BookingStatus) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.status == status && b.covers(date))
    }

    fn booking_index(&self, id: &str) -> Result<usize, LedgerError> {
        self.bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("booking {id}")))
    }

    /// First sight of an email adds it to the autofill directory. Repeat
    /// submissions never overwrite the stored contact.
    fn register_contact(&mut self, name: &str, email: &str, phone: &str) {
        if self.contacts.iter().any(|c| c.email == email) {
            return;
        }
        self.contacts.push(Contact {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        });
    }
}

fn require_contact_fields(name: &str, email: &str, phone: &str) -> Result<(), LedgerError> {
    for (field, value) in [("name", name), ("email", email), ("phone", phone)] {
        if value.trim().is_empty() {
            return Err(LedgerError::Validation(format!("{field} is required")));
        }
    }
    Ok(())
}

fn decode_blob<T: serde::de::DeserializeOwned>(
    store: &dyn StorageAdapter,
    key: &str,
) -> anyhow::Result<Vec<T>> {
    let Some(raw) = store.load(key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed stored blob, starting empty");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::SqliteStore;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn request(date: &str, email: &str) -> NewBooking {
        NewBooking {
            start_date: d(date),
            end_date: None,
            name: "Alice".to_string(),
            email: email.to_string(),
            phone: "+15551110000".to_string(),
            notes: None,
        }
    }

    fn waitlist_request(date: &str, email: &str) -> NewWaitlist {
        NewWaitlist {
            date: d(date),
            name: "Bob".to_string(),
            email: email.to_string(),
            phone: "+15552220000".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_submit_creates_pending_booking() {
        let mut ledger = Ledger::new();
        let booking = ledger
            .submit_booking(request("2025-03-01", "a@x.com"))
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.start_date, booking.end_date);
        assert_eq!(ledger.availability(d("2025-03-01")), DateStatus::Pending);
    }

    #[test]
    fn test_submit_missing_fields_leaves_ledger_unchanged() {
        let mut ledger = Ledger::new();

        for (name, email, phone) in [
            ("", "a@x.com", "1"),
            ("A", "", "1"),
            ("A", "a@x.com", ""),
            ("   ", "a@x.com", "1"),
        ] {
            let result = ledger.submit_booking(NewBooking {
                start_date: d("2025-03-01"),
                end_date: None,
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                notes: None,
            });
            assert!(matches!(result, Err(LedgerError::Validation(_))));
        }

        assert!(ledger.bookings().is_empty());
        assert!(ledger.contacts().is_empty());
    }

    #[test]
    fn test_submit_rejects_inverted_range() {
        let mut ledger = Ledger::new();
        let result = ledger.submit_booking(NewBooking {
            end_date: Some(d("2025-03-01")),
            ..request("2025-03-05", "a@x.com")
        });
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[test]
    fn test_multiple_pending_bookings_may_share_a_date() {
        let mut ledger = Ledger::new();
        ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.submit_booking(request("2025-03-01", "b@y.com")).unwrap();

        assert_eq!(ledger.bookings().len(), 2);
        assert_eq!(ledger.availability(d("2025-03-01")), DateStatus::Pending);
    }

    #[test]
    fn test_submit_onto_approved_date_collides() {
        let mut ledger = Ledger::new();
        let booking = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.approve_booking(&booking.id).unwrap();

        let result = ledger.submit_booking(request("2025-03-01", "b@y.com"));
        assert!(matches!(result, Err(LedgerError::Collision { .. })));
    }

    #[test]
    fn test_availability_covers_full_range() {
        let mut ledger = Ledger::new();
        let booking = ledger
            .submit_booking(NewBooking {
                end_date: Some(d("2025-03-03")),
                ..request("2025-03-01", "a@x.com")
            })
            .unwrap();
        ledger.approve_booking(&booking.id).unwrap();

        assert_eq!(ledger.availability(d("2025-03-01")), DateStatus::Approved);
        assert_eq!(ledger.availability(d("2025-03-02")), DateStatus::Approved);
        assert_eq!(ledger.availability(d("2025-03-03")), DateStatus::Approved);
        assert_eq!(ledger.availability(d("2025-03-04")), DateStatus::Available);
    }

    #[test]
    fn test_availability_approved_wins_over_pending_and_waiting() {
        let mut ledger = Ledger::new();
        let first = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.submit_booking(request("2025-03-01", "b@y.com")).unwrap();
        ledger
            .submit_waitlist(waitlist_request("2025-03-01", "c@z.com"))
            .unwrap();
        ledger.approve_booking(&first.id).unwrap();

        assert_eq!(ledger.availability(d("2025-03-01")), DateStatus::Approved);
    }

    #[test]
    fn test_availability_waiting_without_bookings() {
        let mut ledger = Ledger::new();
        let booking = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger
            .submit_waitlist(waitlist_request("2025-03-01", "b@y.com"))
            .unwrap();
        ledger.reject_booking(&booking.id).unwrap();

        // Rejection leaves waitlist entries untouched, so the date reads
        // as waiting even though no booking remains.
        assert_eq!(ledger.availability(d("2025-03-01")), DateStatus::Waiting);
    }

    #[test]
    fn test_approve_sets_status_and_is_not_repeatable() {
        let mut ledger = Ledger::new();
        let booking = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();

        let approved = ledger.approve_booking(&booking.id).unwrap();
        assert_eq!(approved.status, BookingStatus::Approved);

        let again = ledger.approve_booking(&booking.id);
        assert!(matches!(again, Err(LedgerError::InvalidStateTransition)));
    }

    #[test]
    fn test_approve_unknown_id() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.approve_booking("nope"),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn test_approve_refuses_overlap_with_approved_booking() {
        let mut ledger = Ledger::new();
        let first = ledger
            .submit_booking(NewBooking {
                end_date: Some(d("2025-03-03")),
                ..request("2025-03-01", "a@x.com")
            })
            .unwrap();
        let second = ledger.submit_booking(request("2025-03-03", "b@y.com")).unwrap();

        ledger.approve_booking(&first.id).unwrap();
        let result = ledger.approve_booking(&second.id);
        assert!(matches!(result, Err(LedgerError::Collision { .. })));

        // Never two approved bookings overlapping the same date.
        assert_eq!(
            ledger
                .bookings()
                .iter()
                .filter(|b| b.status == BookingStatus::Approved && b.covers(d("2025-03-03")))
                .count(),
            1
        );
    }

    #[test]
    fn test_approve_promotes_matching_waitlist_entry() {
        let mut ledger = Ledger::new();
        ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        let second = ledger.submit_booking(request("2025-03-01", "b@y.com")).unwrap();

        ledger
            .submit_waitlist(waitlist_request("2025-03-01", "b@y.com"))
            .unwrap();
        ledger
            .submit_waitlist(waitlist_request("2025-03-01", "c@z.com"))
            .unwrap();

        ledger.approve_booking(&second.id).unwrap();

        // Only the (date, email) match is removed.
        assert_eq!(ledger.waitlist().len(), 1);
        assert_eq!(ledger.waitlist()[0].email, "c@z.com");
    }

    #[test]
    fn test_reject_removes_exactly_the_booking() {
        let mut ledger = Ledger::new();
        let first = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.submit_booking(request("2025-03-02", "b@y.com")).unwrap();
        ledger
            .submit_waitlist(waitlist_request("2025-03-01", "c@z.com"))
            .unwrap();

        let removed = ledger.reject_booking(&first.id).unwrap();
        assert_eq!(removed.id, first.id);
        assert_eq!(ledger.bookings().len(), 1);
        assert_eq!(ledger.waitlist().len(), 1);
        assert!(ledger.booking_by_id(&first.id).is_none());
    }

    #[test]
    fn test_reject_approved_booking_is_invalid() {
        let mut ledger = Ledger::new();
        let booking = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.approve_booking(&booking.id).unwrap();

        assert!(matches!(
            ledger.reject_booking(&booking.id),
            Err(LedgerError::InvalidStateTransition)
        ));
    }

    #[test]
    fn test_delete_removes_any_status() {
        let mut ledger = Ledger::new();
        let booking = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.approve_booking(&booking.id).unwrap();

        ledger.delete_booking(&booking.id).unwrap();
        assert!(ledger.bookings().is_empty());
        assert_eq!(ledger.availability(d("2025-03-01")), DateStatus::Available);
    }

    #[test]
    fn test_edit_approved_booking_is_immutable() {
        let mut ledger = Ledger::new();
        let booking = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.approve_booking(&booking.id).unwrap();

        let result = ledger.edit_booking(
            &booking.id,
            BookingUpdate {
                name: "Eve".to_string(),
                email: "e@x.com".to_string(),
                phone: "2".to_string(),
                notes: None,
            },
        );
        assert!(matches!(result, Err(LedgerError::ImmutableState)));
    }

    #[test]
    fn test_edit_updates_fields_and_resets_to_pending() {
        let mut ledger = Ledger::new();
        let booking = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();

        let edited = ledger
            .edit_booking(
                &booking.id,
                BookingUpdate {
                    name: "Alice B".to_string(),
                    email: "alice@x.com".to_string(),
                    phone: "+15559998888".to_string(),
                    notes: Some("window seat".to_string()),
                },
            )
            .unwrap();

        assert_eq!(edited.name, "Alice B");
        assert_eq!(edited.email, "alice@x.com");
        assert_eq!(edited.notes.as_deref(), Some("window seat"));
        assert_eq!(edited.status, BookingStatus::Pending);
        // Dates and identity are untouched by an edit.
        assert_eq!(edited.id, booking.id);
        assert_eq!(edited.start_date, booking.start_date);
    }

    #[test]
    fn test_cancel_requires_matching_email() {
        let mut ledger = Ledger::new();
        let booking = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();

        for wrong in ["b@y.com", "A@X.COM", ""] {
            let result = ledger.cancel_booking(&booking.id, wrong);
            assert!(matches!(result, Err(LedgerError::Authorization)));
        }
        assert_eq!(ledger.bookings().len(), 1);

        ledger.cancel_booking(&booking.id, "a@x.com").unwrap();
        assert!(ledger.bookings().is_empty());
    }

    #[test]
    fn test_waitlist_requires_occupied_date() {
        let mut ledger = Ledger::new();
        let result = ledger.submit_waitlist(waitlist_request("2025-03-01", "b@y.com"));
        assert!(matches!(result, Err(LedgerError::Validation(_))));

        ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        let entry = ledger
            .submit_waitlist(waitlist_request("2025-03-01", "b@y.com"))
            .unwrap();
        assert_eq!(entry.status, WaitlistStatus::Waiting);
        assert_eq!(ledger.waitlist().len(), 1);
    }

    #[test]
    fn test_contacts_deduplicate_by_email() {
        let mut ledger = Ledger::new();
        ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.submit_booking(request("2025-03-02", "a@x.com")).unwrap();
        ledger
            .submit_waitlist(waitlist_request("2025-03-01", "b@y.com"))
            .unwrap();

        assert_eq!(ledger.contacts().len(), 2);
        assert!(ledger.contact_by_email("a@x.com").is_some());
        assert!(ledger.contact_by_email("b@y.com").is_some());
    }

    #[test]
    fn test_stats_counts() {
        let mut ledger = Ledger::new();
        let first = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.submit_booking(request("2025-03-02", "b@y.com")).unwrap();
        ledger
            .submit_waitlist(waitlist_request("2025-03-01", "c@z.com"))
            .unwrap();
        ledger.approve_booking(&first.id).unwrap();

        let stats = ledger.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.waitlist, 1);
        assert_eq!(stats.contacts, 3);
    }

    #[test]
    fn test_snapshot_reproduces_ledger_state() {
        let mut ledger = Ledger::new();
        let first = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.approve_booking(&first.id).unwrap();
        ledger.submit_booking(request("2025-03-02", "b@y.com")).unwrap();
        ledger
            .submit_waitlist(waitlist_request("2025-03-01", "c@z.com"))
            .unwrap();

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.bookings.len(), 2);
        assert_eq!(snapshot.waitlist.len(), 1);
        assert_eq!(snapshot.contacts.len(), 3);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("exportedAt").is_some());
        assert_eq!(json["bookings"][0]["startDate"], "2025-03-01");
    }

    #[test]
    fn test_persist_and_load_round_trip() {
        let store = SqliteStore::open(":memory:").unwrap();

        let mut ledger = Ledger::new();
        let booking = ledger.submit_booking(request("2025-03-01", "a@x.com")).unwrap();
        ledger.approve_booking(&booking.id).unwrap();
        ledger.persist(&store).unwrap();

        let reloaded = Ledger::load(&store).unwrap();
        assert_eq!(reloaded.bookings().len(), 1);
        assert_eq!(reloaded.bookings()[0].status, BookingStatus::Approved);
        assert_eq!(reloaded.contacts().len(), 1);
        assert_eq!(reloaded.availability(d("2025-03-01")), DateStatus::Approved);
    }

    #[test]
    fn test_load_replaces_malformed_blob_with_default() {
        let store = SqliteStore::open(":memory:").unwrap();
        store.save(storage::KEY_BOOKINGS, "{not json").unwrap();
        store.save(storage::KEY_CONTACTS, "[]").unwrap();

        let ledger = Ledger::load(&store).unwrap();
        assert!(ledger.bookings().is_empty());
        assert!(ledger.waitlist().is_empty());
    }
}
