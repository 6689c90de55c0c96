use std::sync::{Arc, Mutex};

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use datebook::config::AppConfig;
use datebook::handlers;
use datebook::ledger::Ledger;
use datebook::notify::console::ConsoleSink;
use datebook::state::AppState;
use datebook::storage::sqlite::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store = SqliteStore::open(&config.database_url)?;
    let ledger = Ledger::load(&store)?;
    tracing::info!(
        bookings = ledger.bookings().len(),
        waitlist = ledger.waitlist().len(),
        contacts = ledger.contacts().len(),
        "ledger loaded"
    );

    let state = Arc::new(AppState {
        ledger: Mutex::new(ledger),
        store: Box::new(store),
        config: config.clone(),
        notifier: Box::new(ConsoleSink),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/calendar", get(handlers::calendar::month_grid))
        .route(
            "/api/availability/:date",
            get(handlers::calendar::date_availability),
        )
        .route(
            "/api/bookings",
            get(handlers::bookings::my_bookings).post(handlers::bookings::submit_booking),
        )
        .route("/api/bookings/:id", put(handlers::bookings::edit_booking))
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::bookings::cancel_booking),
        )
        .route("/api/waitlist", post(handlers::bookings::submit_waitlist))
        .route(
            "/api/contacts/:email",
            get(handlers::bookings::contact_lookup),
        )
        .route("/api/admin/stats", get(handlers::admin::get_stats))
        .route("/api/admin/bookings", get(handlers::admin::get_bookings))
        .route("/api/admin/waitlist", get(handlers::admin::get_waitlist))
        .route("/api/admin/contacts", get(handlers::admin::get_contacts))
        .route(
            "/api/admin/bookings/:id/approve",
            post(handlers::admin::approve_booking),
        )
        .route(
            "/api/admin/bookings/:id/reject",
            post(handlers::admin::reject_booking),
        )
        .route(
            "/api/admin/bookings/:id/delete",
            post(handlers::admin::delete_booking),
        )
        .route("/api/admin/export", get(handlers::admin::export_ledger))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&state));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Explicit save at the process boundary, mirroring the load at startup.
    {
        let ledger = state.ledger.lock().unwrap();
        ledger.persist(state.store.as_ref())?;
    }
    tracing::info!("ledger saved, shutting down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
