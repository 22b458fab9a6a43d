//! Health endpoints: liveness and readiness probes for orchestration and
//! load balancers.
//!
//! Readiness is tied to the record store: the service reports ready only
//! once a store has been wired, and the probe body names which one.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, HttpResponseBuilder, get, http::header, web};
use serde::Serialize;
use tracing::debug;

/// Record store backing the employee endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStore {
    /// Seeded process-local store; records are lost on restart.
    Memory,
    /// PostgreSQL via the Diesel repository.
    Postgres,
}

impl RecordStore {
    /// Lowercase label used in logs and probe bodies.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

#[derive(Serialize)]
struct ReadinessBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<RecordStore>,
}

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    store: OnceLock<RecordStore>,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            store: OnceLock::new(),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the wired store and mark the service ready. Later calls keep
    /// the first store.
    pub fn mark_ready(&self, store: RecordStore) {
        if let Err(duplicate) = self.store.set(store) {
            debug!(store = duplicate.as_str(), "record store already wired");
        }
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Store wired at startup, if any.
    pub fn store(&self) -> Option<RecordStore> {
        self.store.get().copied()
    }

    pub fn is_ready(&self) -> bool {
        self.store().is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe_builder(probe_ok: bool) -> HttpResponseBuilder {
    let mut response = if probe_ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response.insert_header((header::CACHE_CONTROL, "no-store"));
    response
}

/// Readiness probe. Returns 200 with the wired store once the listener is
/// bound, 503 with `{"status":"starting"}` before that.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let store = state.store();
    let body = ReadinessBody {
        status: if store.is_some() { "ready" } else { "starting" },
        store,
    };
    probe_builder(store.is_some()).json(body)
}

/// Liveness probe. Returns 503 once the process starts draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_builder(state.is_alive()).finish()
}
