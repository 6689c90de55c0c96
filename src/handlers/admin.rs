use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::ledger::Stats;
use crate::models::{Booking, BookingStatus, Contact, WaitlistEntry};
use crate::notify::{self, Notification, NotificationKind};
use crate::state::AppState;

use super::bookings::BookingResponse;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Stats>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let ledger = state.ledger.lock().unwrap();
    Ok(Json(ledger.stats()))
}

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
    pub limit: Option<usize>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);
    let status_filter = query.status.as_deref().map(BookingStatus::parse);

    let ledger = state.ledger.lock().unwrap();
    let mut bookings: Vec<Booking> = ledger
        .bookings()
        .iter()
        .filter(|b| status_filter.map_or(true, |s| b.status == s))
        .cloned()
        .collect();
    bookings.sort_by_key(|b| b.start_date);
    bookings.truncate(limit);

    Ok(Json(bookings))
}

// GET /api/admin/waitlist
pub async fn get_waitlist(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<WaitlistEntry>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let ledger = state.ledger.lock().unwrap();
    Ok(Json(ledger.waitlist().to_vec()))
}

// GET /api/admin/contacts
pub async fn get_contacts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Contact>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let ledger = state.ledger.lock().unwrap();
    Ok(Json(ledger.contacts().to_vec()))
}

// POST /api/admin/bookings/:id/approve
pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let (booking, note) = {
        let mut ledger = state.ledger.lock().unwrap();
        let booking = ledger.approve_booking(&id)?;
        ledger.persist(state.store.as_ref())?;
        let note = Notification::for_booking(
            NotificationKind::BookingApproved,
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

// POST /api/admin/bookings/:id/reject
pub async fn reject_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let (booking, note) = {
        let mut ledger = state.ledger.lock().unwrap();
        let booking = ledger.reject_booking(&id)?;
        ledger.persist(state.store.as_ref())?;
        let note = Notification::for_booking(
            NotificationKind::BookingRejected,
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

// POST /api/admin/bookings/:id/delete
//
// Generic removal for any status, including approved. Reported to the
// admin sink as a cancellation so the operation still emits exactly one
// event from the closed set.
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let (booking, note) = {
        let mut ledger = state.ledger.lock().unwrap();
        let booking = ledger.delete_booking(&id)?;
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

// GET /api/admin/export
pub async fn export_ledger(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let snapshot = {
        let ledger = state.ledger.lock().unwrap();
        ledger.snapshot()
    };

    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| AppError::Storage(e.into()))?;
    let filename = format!("bookings-export-{}.json", snapshot.exported_at.date());

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/json; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        json,
    )
        .into_response())
}
