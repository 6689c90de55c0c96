use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::ledger::Ledger;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub month: String,
}

#[derive(Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub status: &'static str,
    pub selectable: bool,
}

// GET /api/calendar?month=YYYY-MM
pub async fn month_grid(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<DayAvailability>>, AppError> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", query.month), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid month: {}", query.month)))?;

    let today = Utc::now().date_naive();
    let ledger = state.ledger.lock().unwrap();

    let mut days = Vec::with_capacity(31);
    let mut date = first;
    while date.month() == first.month() {
        days.push(day_availability(&ledger, date, today));
        let Some(next) = date.succ_opt() else { break };
        date = next;
    }

    Ok(Json(days))
}

// GET /api/availability/:date
pub async fn date_availability(
    State(state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> Json<DayAvailability> {
    let today = Utc::now().date_naive();
    let ledger = state.ledger.lock().unwrap();
    Json(day_availability(&ledger, date, today))
}

fn day_availability(ledger: &Ledger, date: NaiveDate, today: NaiveDate) -> DayAvailability {
    let status = ledger.availability(date);
    DayAvailability {
        date,
        status: status.as_str(),
        // Past dates are never selectable; approved dates are exclusively
        // held. A pending date stays selectable: submitting there is the
        // implicit offer of the waitlist path.
        selectable: date >= today && !status.is_exclusive(),
    }
}
