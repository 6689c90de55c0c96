use super::Audience;
use crate::models::{Booking, WaitlistEntry};

/// The closed set of events a state-changing ledger operation can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    BookingRequested,
    BookingCancelled,
    BookingUpdated,
    WaitlistRequested,
    BookingApproved,
    BookingRejected,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::BookingRequested => "BOOKING_REQUESTED",
            NotificationKind::BookingCancelled => "BOOKING_CANCELLED",
            NotificationKind::BookingUpdated => "BOOKING_UPDATED",
            NotificationKind::WaitlistRequested => "WAITLIST_REQUESTED",
            NotificationKind::BookingApproved => "BOOKING_APPROVED",
            NotificationKind::BookingRejected => "BOOKING_REJECTED",
        }
    }

    /// Fixed kind-to-audience mapping: request/change traffic goes to the
    /// admin, approval outcomes go to the client.
    pub fn audience(&self) -> Audience {
        match self {
            NotificationKind::BookingRequested
            | NotificationKind::BookingCancelled
            | NotificationKind::BookingUpdated
            | NotificationKind::WaitlistRequested => Audience::Admin,
            NotificationKind::BookingApproved | NotificationKind::BookingRejected => {
                Audience::Client
            }
        }
    }
}

/// A rendered notification, ready for the sink.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub audience: Audience,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn for_booking(kind: NotificationKind, booking: &Booking, admin_email: &str) -> Self {
        render(
            kind,
            &booking.date_display(),
            &booking.name,
            &booking.email,
            &booking.phone,
            booking.notes.as_deref(),
            admin_email,
        )
    }

    pub fn for_waitlist(kind: NotificationKind, entry: &WaitlistEntry, admin_email: &str) -> Self {
        render(
            kind,
            &entry.date.to_string(),
            &entry.name,
            &entry.email,
            &entry.phone,
            entry.notes.as_deref(),
            admin_email,
        )
    }
}

fn render(
    kind: NotificationKind,
    date: &str,
    name: &str,
    email: &str,
    phone: &str,
    notes: Option<&str>,
    admin_email: &str,
) -> Notification {
    let details = details_block(date, name, email, phone, notes);

    let (subject, body) = match kind {
        NotificationKind::BookingRequested => (
            format!("New Booking Request - {date}"),
            format!(
                "You have a new booking request!\n\n{details}\n\n\
                 Please review and approve this booking in your admin dashboard."
            ),
        ),
        NotificationKind::BookingCancelled => (
            format!("Booking Cancelled - {date}"),
            format!(
                "A booking has been cancelled.\n\n{details}\n\n\
                 The date is now available for new bookings."
            ),
        ),
        NotificationKind::BookingUpdated => (
            format!("Booking Updated - {date}"),
            format!(
                "A booking has been updated.\n\n{details}\n\n\
                 Please review the updated details."
            ),
        ),
        NotificationKind::WaitlistRequested => (
            format!("New Waitlist Request - {date}"),
            format!(
                "You have a new waitlist request!\n\n{details}\n\n\
                 The client will be notified automatically if this date becomes available."
            ),
        ),
        NotificationKind::BookingApproved => (
            format!("Booking Confirmed - {date}"),
            format!(
                "Your booking has been confirmed!\n\n\
                 Date: {date}\nName: {name}\nPhone: {phone}\n\n\
                 We look forward to serving you! Please arrive on time for your appointment.\n\n\
                 If you need to reschedule or cancel, please contact us at least 24 hours in advance.\n\n\
                 Thank you for choosing our service!"
            ),
        ),
        NotificationKind::BookingRejected => (
            format!("Booking Request Update - {date}"),
            format!(
                "We're sorry, but we are unable to accommodate your booking request for {date} \
                 as the date is no longer available.\n\n\
                 You can view other available dates in the booking calendar and submit a new \
                 request for a different date.\n\n\
                 We appreciate your understanding and hope to serve you another time."
            ),
        ),
    };

    let audience = kind.audience();
    let to = match audience {
        Audience::Admin => admin_email.to_string(),
        Audience::Client => email.to_string(),
    };

    Notification {
        kind,
        audience,
        to,
        subject,
        body,
    }
}

fn details_block(date: &str, name: &str, email: &str, phone: &str, notes: Option<&str>) -> String {
    let mut block = format!("Date: {date}\nClient: {name}\nEmail: {email}\nPhone: {phone}");
    if let Some(notes) = notes {
        block.push_str(&format!("\nNotes: {notes}"));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    use crate::models::{BookingStatus, WaitlistStatus};

    fn booking(start: &str, end: &str) -> Booking {
        Booking {
            id: "b-1".to_string(),
            start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            end_date: NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            phone: "+15551110000".to_string(),
            notes: Some("back entrance".to_string()),
            status: BookingStatus::Pending,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_audience_mapping() {
        for kind in [
            NotificationKind::BookingRequested,
            NotificationKind::BookingCancelled,
            NotificationKind::BookingUpdated,
            NotificationKind::WaitlistRequested,
        ] {
            assert_eq!(kind.audience(), Audience::Admin);
        }
        for kind in [
            NotificationKind::BookingApproved,
            NotificationKind::BookingRejected,
        ] {
            assert_eq!(kind.audience(), Audience::Client);
        }
    }

    #[test]
    fn test_admin_notification_addresses_admin() {
        let note = Notification::for_booking(
            NotificationKind::BookingRequested,
            &booking("2025-03-01", "2025-03-01"),
            "admin@example.com",
        );

        assert_eq!(note.to, "admin@example.com");
        assert_eq!(note.subject, "New Booking Request - 2025-03-01");
        assert!(note.body.contains("Client: Alice"));
        assert!(note.body.contains("Notes: back entrance"));
    }

    #[test]
    fn test_client_notification_addresses_booking_email() {
        let note = Notification::for_booking(
            NotificationKind::BookingApproved,
            &booking("2025-03-01", "2025-03-01"),
            "admin@example.com",
        );

        assert_eq!(note.to, "a@x.com");
        assert!(note.subject.starts_with("Booking Confirmed"));
        assert!(note.body.contains("has been confirmed"));
    }

    #[test]
    fn test_range_uses_from_to_display() {
        let note = Notification::for_booking(
            NotificationKind::BookingRequested,
            &booking("2025-03-01", "2025-03-03"),
            "admin@example.com",
        );

        assert_eq!(
            note.subject,
            "New Booking Request - From 2025-03-01 To 2025-03-03"
        );
    }

    #[test]
    fn test_notes_line_omitted_when_absent() {
        let mut b = booking("2025-03-01", "2025-03-01");
        b.notes = None;
        let note =
            Notification::for_booking(NotificationKind::BookingUpdated, &b, "admin@example.com");
        assert!(!note.body.contains("Notes:"));
    }

    #[test]
    fn test_waitlist_notification() {
        let entry = WaitlistEntry {
            id: "w-1".to_string(),
            date: NaiveDate::parse_from_str("2025-03-05", "%Y-%m-%d").unwrap(),
            name: "Bob".to_string(),
            email: "b@y.com".to_string(),
            phone: "+15552220000".to_string(),
            notes: None,
            status: WaitlistStatus::Waiting,
            created_at: Utc::now().naive_utc(),
        };

        let note = Notification::for_waitlist(
            NotificationKind::WaitlistRequested,
            &entry,
            "admin@example.com",
        );

        assert_eq!(note.audience, Audience::Admin);
        assert_eq!(note.subject, "New Waitlist Request - 2025-03-05");
        assert!(note.body.contains("Client: Bob"));
    }
}
