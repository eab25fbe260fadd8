//! # Room Booking API
//!
//! Web server for the room booking service: slot listing, booking creation
//! and the administrative booking endpoints.
//!
//! ## Architecture
//!
//! - **Routes**: URL structure, one module per resource
//! - **Handlers**: request parsing and response shaping around `roombook-core`
//! - **Middleware**: error to HTTP response mapping
//! - **Config**: environment configuration
//! - **Notify**: HTTP delivery of booking confirmations

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod notify;
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use eyre::Result;
use roombook_core::{
    committer::BookingCommitter,
    notify::{LogNotifier, Notifier},
    slots::SlotPolicy,
    store::BookingStore,
};
use roombook_db::{DbPool, PgBookingStore};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, info, level_filters::LevelFilter, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::notify::WebhookNotifier;

/// Shared application state that is accessible to all request handlers.
pub struct ApiState {
    pub store: Arc<dyn BookingStore>,
    pub committer: BookingCommitter,
    pub policy: SlotPolicy,
    /// Zone in which "today" and "now" are evaluated.
    pub timezone: Tz,
}

impl ApiState {
    pub fn new(
        store: Arc<dyn BookingStore>,
        notifier: Arc<dyn Notifier>,
        policy: SlotPolicy,
        timezone: Tz,
    ) -> Self {
        Self {
            committer: BookingCommitter::new(store.clone(), notifier),
            store,
            policy,
            timezone,
        }
    }

    /// Current wall-clock time at the site.
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides `level`.
pub fn init_tracing(level: Level) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the router with every endpoint and request tracing.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Rooms, slots and per-day availability
        .merge(routes::rooms::routes())
        // Booking creation and administration
        .merge(routes::bookings::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Picks the confirmation channel: the webhook when one is configured,
/// otherwise the log.
pub fn notifier_from_config(config: &config::ApiConfig) -> Result<Arc<dyn Notifier>> {
    match &config.notify_webhook_url {
        Some(url) => {
            info!("Booking confirmations will be posted to {}", url);
            let notifier = WebhookNotifier::new(
                url.clone(),
                config.admin_email.clone(),
                Duration::from_secs(config.request_timeout),
            )?;
            Ok(Arc::new(notifier))
        }
        None => Ok(Arc::new(LogNotifier)),
    }
}

/// Starts the API server backed by PostgreSQL.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = roombook_api::config::ApiConfig::from_env()?;
/// let db_pool = roombook_db::create_pool(&config.database_url).await?;
/// roombook_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    let store: Arc<dyn BookingStore> = Arc::new(PgBookingStore::new(db_pool));
    let notifier = notifier_from_config(&config)?;

    let state = Arc::new(ApiState::new(
        store,
        notifier,
        config.slot_policy.clone(),
        config.site_timezone,
    ));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {:?}", origin);
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Requests running past the timeout get a 408; a retried booking goes
    // through the full commit path again.
    let app = app.layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)));

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
