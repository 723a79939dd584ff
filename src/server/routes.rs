//! # Tabla de Rutas
//! src/server/routes.rs
//!
//! Registra todos los endpoints del servidor. El orden importa:
//! `/api/datajobs/status/{status}` va antes que `/api/datajobs/{id}`
//! para que `status` no se interprete como un ID.

use crate::http::{Method, Request, Response, StatusCode};
use crate::jobs::handlers;
use crate::router::{Params, Router};
use crate::server::AppState;

/// Construye el router con todos los endpoints
pub fn build_router() -> Router<AppState> {
    let mut router = Router::new();

    router.register(Method::GET, "/api/datajobs", handlers::list_handler);
    router.register(Method::POST, "/api/datajobs", handlers::create_handler);
    router.register(Method::PUT, "/api/datajobs", handlers::update_handler);
    router.register(
        Method::GET,
        "/api/datajobs/status/{status}",
        handlers::list_by_status_handler,
    );
    router.register(Method::GET, "/api/datajobs/{id}", handlers::get_handler);
    router.register(Method::DELETE, "/api/datajobs/{id}", handlers::delete_handler);
    router.register(
        Method::POST,
        "/api/datajobs/{id}/startprocess",
        handlers::start_handler,
    );
    router.register(Method::GET, "/api/datajobs/{id}/status", handlers::status_handler);
    router.register(Method::GET, "/api/datajobs/{id}/results", handlers::results_handler);

    router.register(Method::GET, "/metrics", metrics_handler);

    router
}

/// `GET /metrics`
///
/// Combina las métricas del servidor con el conteo de jobs por estado.
pub fn metrics_handler(_req: &Request, _params: &Params, state: &AppState) -> Response {
    let body = serde_json::json!({
        "server": state.metrics.snapshot(),
        "jobs": state.jobs.stats(),
    });

    Response::json_with_status(StatusCode::Ok, &body.to_string())
}
