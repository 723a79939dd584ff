//! # Handlers HTTP para Data Jobs
//! src/jobs/handlers.rs
//!
//! Traducen requests a llamadas al `JobManager` y sus resultados a códigos
//! HTTP. No contienen lógica de negocio.
//!
//! - `GET    /api/datajobs`
//! - `GET    /api/datajobs/{id}`
//! - `GET    /api/datajobs/status/{status}`
//! - `POST   /api/datajobs`
//! - `PUT    /api/datajobs`
//! - `DELETE /api/datajobs/{id}`
//! - `POST   /api/datajobs/{id}/startprocess`
//! - `GET    /api/datajobs/{id}/status`
//! - `GET    /api/datajobs/{id}/results`

use crate::http::{Request, Response, StatusCode};
use crate::jobs::error::JobError;
use crate::jobs::manager::StartOutcome;
use crate::jobs::types::{DataJob, DataJobStatus};
use crate::router::Params;
use crate::server::AppState;
use uuid::Uuid;

/// Prefijo común de las rutas de jobs
pub const BASE_PATH: &str = "/api/datajobs";

const NO_JOBS_FOUND: &str = "No data jobs found.";
const NO_JOBS_WITH_STATUS: &str = "No data jobs found with the specified status.";
const ALREADY_STARTED: &str = "Data job already started or finished.";

/// Extrae y valida el `{id}` del path
fn job_id(params: &Params) -> Result<Uuid, Response> {
    let raw = params.get("id").unwrap_or_default();
    Uuid::parse_str(raw).map_err(|_| {
        Response::error(StatusCode::BadRequest, &format!("Invalid data job id: {}", raw))
    })
}

/// Deserializa el body como `DataJob`
fn job_body(req: &Request) -> Result<DataJob, Response> {
    serde_json::from_slice(req.body()).map_err(|e| {
        Response::error(StatusCode::BadRequest, &format!("Invalid data job body: {}", e))
    })
}

fn not_found(err: JobError) -> Response {
    tracing::debug!(error = %err, "data job lookup failed");
    Response::error(StatusCode::NotFound, NO_JOBS_FOUND)
}

/// `GET /api/datajobs`
pub fn list_handler(_req: &Request, _params: &Params, state: &AppState) -> Response {
    Response::serialized(StatusCode::Ok, &state.jobs.list_all())
}

/// `GET /api/datajobs/{id}`
pub fn get_handler(_req: &Request, params: &Params, state: &AppState) -> Response {
    let id = match job_id(params) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.jobs.get(id) {
        Some(job) => Response::serialized(StatusCode::Ok, &job),
        None => Response::error(StatusCode::NotFound, &JobError::NotFound(id).to_string()),
    }
}

/// `GET /api/datajobs/status/{status}`
///
/// Acepta el valor numérico (`2`) o el nombre (`New`). Una lista vacía se
/// responde con 404.
pub fn list_by_status_handler(_req: &Request, params: &Params, state: &AppState) -> Response {
    let raw = params.get("status").unwrap_or_default();
    let status: DataJobStatus = match raw.parse() {
        Ok(status) => status,
        Err(e) => return Response::error(StatusCode::BadRequest, &format!("{}", e)),
    };

    let jobs = state.jobs.list_by_status(status);
    if jobs.is_empty() {
        return Response::error(StatusCode::NotFound, NO_JOBS_WITH_STATUS);
    }

    Response::serialized(StatusCode::Ok, &jobs)
}

/// `POST /api/datajobs`
///
/// Registra el job tal como lo envía el cliente (incluidos `id` y `status`).
pub fn create_handler(req: &Request, _params: &Params, state: &AppState) -> Response {
    let job = match job_body(req) {
        Ok(job) => job,
        Err(response) => return response,
    };

    let created = state.jobs.create(job);
    let location = format!("{}/{}", BASE_PATH, created.id);

    let mut response = Response::serialized(StatusCode::Created, &created);
    response.add_header("Location", &location);
    response
}

/// `PUT /api/datajobs`
pub fn update_handler(req: &Request, _params: &Params, state: &AppState) -> Response {
    let job = match job_body(req) {
        Ok(job) => job,
        Err(response) => return response,
    };
    let id = job.id;

    match state.jobs.update(job) {
        Some(updated) => Response::serialized(StatusCode::Ok, &updated),
        None => Response::error(StatusCode::NotFound, &JobError::NotFound(id).to_string()),
    }
}

/// `DELETE /api/datajobs/{id}`
pub fn delete_handler(_req: &Request, params: &Params, state: &AppState) -> Response {
    let id = match job_id(params) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.jobs.delete(id) {
        Ok(()) => Response::new(StatusCode::NoContent),
        Err(e) => not_found(e),
    }
}

/// `POST /api/datajobs/{id}/startprocess`
///
/// # Ejemplo de response
/// ```json
/// {"message": "Background process started for data job 6f1c…"}
/// ```
pub fn start_handler(_req: &Request, params: &Params, state: &AppState) -> Response {
    let id = match job_id(params) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.jobs.start(id) {
        Ok(StartOutcome::Started) => {
            let body = serde_json::json!({
                "message": format!("Background process started for data job {}", id)
            });
            Response::json(&body.to_string())
        }
        Ok(StartOutcome::Rejected(_)) => Response::error(StatusCode::BadRequest, ALREADY_STARTED),
        Err(e) => not_found(e),
    }
}

/// `GET /api/datajobs/{id}/status` → entero del estado
pub fn status_handler(_req: &Request, params: &Params, state: &AppState) -> Response {
    let id = match job_id(params) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.jobs.get_status(id) {
        Ok(status) => Response::serialized(StatusCode::Ok, &status),
        Err(e) => not_found(e),
    }
}

/// `GET /api/datajobs/{id}/results`
pub fn results_handler(_req: &Request, params: &Params, state: &AppState) -> Response {
    let id = match job_id(params) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.jobs.get_results(id) {
        Ok(results) => Response::serialized(StatusCode::Ok, &results),
        Err(e) => not_found(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::build_router;

    fn call(state: &AppState, raw: &str) -> Response {
        let request = Request::parse(raw.as_bytes()).unwrap();
        build_router().route(&request, state).response
    }

    fn json(response: &Response) -> serde_json::Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    fn post_job(state: &AppState, id: Uuid, status: u8) -> Response {
        let body = format!(
            r#"{{"id":"{}","name":"job","filePathToProcess":"/in.csv","status":{}}}"#,
            id, status
        );
        call(
            state,
            &format!(
                "POST /api/datajobs HTTP/1.1\r\nContent-Length: {}\r\n\r\n{}",
                body.len(),
                body
            ),
        )
    }

    #[test]
    fn test_create_returns_created_with_location() {
        let state = AppState::default();
        let id = Uuid::new_v4();

        let response = post_job(&state, id, 2);

        assert_eq!(response.status(), StatusCode::Created);
        assert_eq!(
            response.header("Location"),
            Some(format!("/api/datajobs/{}", id).as_str())
        );
        assert_eq!(json(&response)["status"], 2);
    }

    #[test]
    fn test_create_malformed_body() {
        let state = AppState::default();
        let response = call(&state, "POST /api/datajobs HTTP/1.1\r\n\r\n{not json");
        assert_eq!(response.status(), StatusCode::BadRequest);
        assert!(state.jobs.list_all().is_empty());
    }

    #[test]
    fn test_get_invalid_id() {
        let state = AppState::default();
        let response = call(&state, "GET /api/datajobs/not-a-uuid HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_get_unknown_id() {
        let state = AppState::default();
        let raw = format!("GET /api/datajobs/{} HTTP/1.1\r\n\r\n", Uuid::new_v4());
        assert_eq!(call(&state, &raw).status(), StatusCode::NotFound);
    }

    #[test]
    fn test_start_flow() {
        let state = AppState::default();
        let id = Uuid::new_v4();
        post_job(&state, id, 2);

        let start = format!("POST /api/datajobs/{}/startprocess HTTP/1.1\r\n\r\n", id);
        let first = call(&state, &start);
        assert_eq!(first.status(), StatusCode::Ok);
        assert!(json(&first)["message"].as_str().unwrap().contains(&id.to_string()));

        let second = call(&state, &start);
        assert_eq!(second.status(), StatusCode::BadRequest);
        assert_eq!(json(&second)["error"], ALREADY_STARTED);

        let status = call(&state, &format!("GET /api/datajobs/{}/status HTTP/1.1\r\n\r\n", id));
        assert_eq!(status.body(), b"1");
    }

    #[test]
    fn test_start_unknown_is_not_found() {
        let state = AppState::default();
        let raw = format!("POST /api/datajobs/{}/startprocess HTTP/1.1\r\n\r\n", Uuid::new_v4());
        let response = call(&state, &raw);

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(json(&response)["error"], NO_JOBS_FOUND);
    }

    #[test]
    fn test_list_by_status_empty_is_not_found() {
        let state = AppState::default();
        let response = call(&state, "GET /api/datajobs/status/Completed HTTP/1.1\r\n\r\n");

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(json(&response)["error"], NO_JOBS_WITH_STATUS);
    }

    #[test]
    fn test_list_by_status_invalid() {
        let state = AppState::default();
        let response = call(&state, "GET /api/datajobs/status/9 HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let state = AppState::default();
        let body = format!(r#"{{"id":"{}","status":2}}"#, Uuid::new_v4());
        let raw = format!(
            "PUT /api/datajobs HTTP/1.1\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );

        assert_eq!(call(&state, &raw).status(), StatusCode::NotFound);
        assert!(state.jobs.list_all().is_empty());
    }

    #[test]
    fn test_delete_flow() {
        let state = AppState::default();
        let id = Uuid::new_v4();
        post_job(&state, id, 2);

        let delete = format!("DELETE /api/datajobs/{} HTTP/1.1\r\n\r\n", id);
        let first = call(&state, &delete);
        assert_eq!(first.status(), StatusCode::NoContent);
        assert!(first.body().is_empty());

        assert_eq!(call(&state, &delete).status(), StatusCode::NotFound);
    }
}
