//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::EmployeeRecordsService;
use crate::inbound::http::employees::{
    create_employee, delete_employee, list_employees, update_employee,
};
use crate::inbound::http::health::{HealthState, RecordStore, live, ready};
use crate::inbound::http::json_config;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DieselEmployeeRepository, InMemoryEmployeeRepository};

/// Listener returned by [`create_server`].
pub struct BoundServer {
    /// Server future; await it to drive the listener.
    pub server: Server,
    /// Addresses the listener actually bound, with ephemeral ports resolved.
    pub addrs: Vec<SocketAddr>,
}

/// Wire the employee ports to PostgreSQL when a pool is configured,
/// otherwise to a seeded in-memory store.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            let service = Arc::new(EmployeeRecordsService::new(Arc::new(
                DieselEmployeeRepository::new(pool.clone()),
            )));
            HttpState::new(service.clone(), service)
        }
        None => {
            let service = Arc::new(EmployeeRecordsService::new(Arc::new(
                InMemoryEmployeeRepository::seeded(),
            )));
            HttpState::new(service.clone(), service)
        }
    }
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("employee_records")
        .registry(prometheus::Registry::new())
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}

/// Assemble the application with the employee API, health probes and, in
/// debug builds, Swagger UI.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(list_employees)
        .service(create_employee)
        .service(update_employee)
        .service(delete_employee);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Readiness is marked once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails or metrics
/// cannot be configured.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<BoundServer> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let store = if config.uses_database() {
        RecordStore::Postgres
    } else {
        RecordStore::Memory
    };

    #[cfg(feature = "metrics")]
    let prometheus = make_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(config.bind_addr)?;

    let addrs = server.addrs();
    let server = server.run();

    info!(?addrs, store = store.as_str(), "employee records server listening");
    health_state.mark_ready(store);
    Ok(BoundServer { server, addrs })
}
