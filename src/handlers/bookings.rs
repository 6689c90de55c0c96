use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::ledger::{BookingUpdate, LedgerError, NewBooking, NewWaitlist};
use crate::models::{Booking, Contact, WaitlistEntry};
use crate::notify::{self, Notification, NotificationKind};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBookingRequest {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub ok: bool,
    pub booking: Booking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// POST /api/bookings
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let (booking, note) = {
        let mut ledger = state.ledger.lock().unwrap();
        let booking = ledger.submit_booking(NewBooking {
            start_date: body.start_date,
            end_date: body.end_date,
            name: body.name,
            email: body.email,
            phone: body.phone,
            notes: body.notes,
        })?;
        ledger.persist(state.store.as_ref())?;
        let note = Notification::for_booking(
            NotificationKind::BookingRequested,
            &booking,
            &state.config.admin_email,
        );
        (booking, note)
    };

    let warning = notify::dispatch(state.notifier.as_ref(), note).await;
    Ok(Json(BookingResponse {
        ok: true,
        booking,
        warning,
    }))
}

#[derive(Deserialize)]
pub struct SubmitWaitlistRequest {
    pub date: NaiveDate,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct WaitlistResponse {
    pub ok: bool,
    pub entry: WaitlistEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// POST /api/waitlist
pub async fn submit_waitlist(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitWaitlistRequest>,
) -> Result<Json<WaitlistResponse>, AppError> {
    let (entry, note) = {
        let mut ledger = state.ledger.lock().unwrap();
        let entry = ledger.submit_waitlist(NewWaitlist {
            date: body.date,
            name: body.name,
            email: body.email,
            phone: body.phone,
            notes: body.notes,
        })?;
        ledger.persist(state.store.as_ref())?;
        let note = Notification::for_waitlist(
            NotificationKind::WaitlistRequested,
            &entry,
            &state.config.admin_email,
        );
        (entry, note)
    };

    let warning = notify::dispatch(state.notifier.as_ref(), note).await;
    Ok(Json(WaitlistResponse {
        ok: true,
        entry,
        warning,
    }))
}

#[derive(Deserialize)]
pub struct EditBookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
}

// PUT /api/bookings/:id
pub async fn edit_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<EditBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let (booking, note) = {
        let mut ledger = state.ledger.lock().unwrap();
        let booking = ledger.edit_booking(
            &id,
            BookingUpdate {
                name: body.name,
                email: body.email,
                phone: body.phone,
                notes: body.notes,
            },
        )?;
        ledger.persist(state.store.as_ref())?;
        let note = Notification::for_booking(
            NotificationKind::BookingUpdated,
            &booking,
            &state.config.admin_email,
        );
        (booking, note)
    };

    let warning = notify::dispatch(state.notifier.as_ref(), note).await;
    Ok(Json(BookingResponse {
        ok: true,
        booking,
        warning,
    }))
}

#[derive(Deserialize)]
pub struct CancelBookingRequest {
    pub email: String,
}

// POST /api/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<CancelBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let (booking, note) = {
        let mut ledger = state.ledger.lock().unwrap();
        let booking = ledger.cancel_booking(&id, &body.email)?;
        ledger.persist(state.store.as_ref())?;
        let note = Notification::for_booking(
            NotificationKind::BookingCancelled,
            &booking,
            &state.config.admin_email,
        );
        (booking, note)
    };

    let warning = notify::dispatch(state.notifier.as_ref(), note).await;
    Ok(Json(BookingResponse {
        ok: true,
        booking,
        warning,
    }))
}

#[derive(Deserialize)]
pub struct MyBookingsQuery {
    pub email: String,
}

#[derive(Serialize)]
pub struct MyBookingsResponse {
    pub bookings: Vec<Booking>,
    pub waitlist: Vec<WaitlistEntry>,
}

// GET /api/bookings?email=
pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MyBookingsQuery>,
) -> Json<MyBookingsResponse> {
    let ledger = state.ledger.lock().unwrap();
    Json(MyBookingsResponse {
        bookings: ledger.bookings_for_email(&query.email),
        waitlist: ledger.waitlist_for_email(&query.email),
    })
}

// GET /api/contacts/:email (autofill convenience lookup)
pub async fn contact_lookup(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Contact>, AppError> {
    let ledger = state.ledger.lock().unwrap();
    let contact = ledger
        .contact_by_email(&email)
        .cloned()
        .ok_or_else(|| LedgerError::NotFound(format!("contact {email}")))?;
    Ok(Json(contact))
}
