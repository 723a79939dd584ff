//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Servidor que maneja múltiples conexiones simultáneas usando threads.
//! Cada conexión se procesa en su propio thread y atiende un único request
//! (HTTP/1.0, `Connection: close`).

use crate::config::Config;
use crate::http::request::{content_length, find_subsequence, HEADER_TERMINATOR};
use crate::http::{Method, Request, Response, StatusCode};
use crate::jobs::JobManager;
use crate::router::Router;
use crate::server::routes::build_router;
use crate::server::AppState;
use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Tamaño máximo de la cabecera de un request
pub const MAX_HEADER_BYTES: usize = 16 * 1024;

const READ_CHUNK: usize = 4096;
const SERVER_NAME: &str = concat!("datajobs_server/", env!("CARGO_PKG_VERSION"));

/// Etiqueta de métricas para requests rechazados antes de rutear
const REJECTED_ROUTE: &str = "rejected";

/// Límites aplicados a cada conexión
#[derive(Debug, Clone, Copy)]
struct Limits {
    max_body_bytes: usize,
    read_timeout: Duration,
}

/// Resultado de leer un request del socket
enum ReadOutcome {
    /// El cliente cerró sin enviar nada
    Closed,
    Complete(Vec<u8>),
    Rejected(Response),
}

/// Servidor HTTP/1.0 concurrente
pub struct Server {
    config: Config,
    state: Arc<AppState>,
    router: Arc<Router<AppState>>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self::with_manager(config, JobManager::default())
    }

    /// Crea el servidor sobre un `JobManager` existente
    pub fn with_manager(config: Config, jobs: JobManager) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(jobs)),
            router: Arc::new(build_router()),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Hace bind en la dirección configurada y atiende conexiones
    ///
    /// Bloquea el thread actual.
    pub fn run(&self) -> io::Result<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        self.serve(listener)
    }

    /// Atiende conexiones de un listener ya creado
    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        let local = listener.local_addr()?;
        tracing::info!(address = %local, "server listening (one thread per connection)");

        let limits = Limits {
            max_body_bytes: self.config.max_body_bytes,
            read_timeout: self.config.read_timeout(),
        };

        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to accept connection");
                    continue;
                }
            };

            let state = Arc::clone(&self.state);
            let router = Arc::clone(&self.router);
            let peer = stream
                .peer_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| "unknown".to_string());

            tracing::debug!(%peer, "connection accepted");
            state.metrics.increment_active_threads();

            let spawned = thread::Builder::new()
                .name("connection".to_string())
                .spawn({
                    let state = Arc::clone(&state);
                    move || {
                        if let Err(e) = handle_connection(stream, &state, &router, limits) {
                            tracing::warn!(%peer, error = %e, "connection error");
                        }
                        state.metrics.decrement_active_threads();
                    }
                });

            if let Err(e) = spawned {
                tracing::error!(error = %e, "failed to spawn connection thread");
                state.metrics.decrement_active_threads();
            }
        }

        Ok(())
    }
}

/// Lee la cabecera completa y luego el body según `Content-Length`
fn read_request(stream: &mut TcpStream, max_body_bytes: usize) -> io::Result<ReadOutcome> {
    let mut buffer = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    let header_end = loop {
        if let Some(pos) = find_subsequence(&buffer, HEADER_TERMINATOR) {
            break pos + HEADER_TERMINATOR.len();
        }
        if buffer.len() > MAX_HEADER_BYTES {
            return Ok(ReadOutcome::Rejected(Response::error(
                StatusCode::BadRequest,
                "Invalid: request header too large",
            )));
        }

        let n = stream.read(&mut chunk)?;
        if n == 0 {
            if buffer.is_empty() {
                return Ok(ReadOutcome::Closed);
            }
            // Sin terminador: el parser decide si es válido
            return Ok(ReadOutcome::Complete(buffer));
        }
        buffer.extend_from_slice(&chunk[..n]);
    };

    let expected = content_length(&buffer[..header_end]).unwrap_or(0);
    if expected > max_body_bytes {
        return Ok(ReadOutcome::Rejected(Response::error(
            StatusCode::PayloadTooLarge,
            &format!("Request body exceeds {} bytes", max_body_bytes),
        )));
    }

    let total = header_end + expected;
    while buffer.len() < total {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
    buffer.truncate(total);

    Ok(ReadOutcome::Complete(buffer))
}

/// Atiende un request completo en la conexión
fn handle_connection(
    mut stream: TcpStream,
    state: &AppState,
    router: &Router<AppState>,
    limits: Limits,
) -> io::Result<()> {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let span = tracing::info_span!(
        "request",
        %request_id,
        method = tracing::field::Empty,
        path = tracing::field::Empty,
    );
    let _enter = span.enter();

    stream.set_read_timeout(Some(limits.read_timeout))?;

    let (mut response, route, include_body) = match read_request(&mut stream, limits.max_body_bytes)? {
        ReadOutcome::Closed => {
            tracing::debug!("connection closed before request");
            return Ok(());
        }
        ReadOutcome::Rejected(response) => (response, REJECTED_ROUTE.to_string(), true),
        ReadOutcome::Complete(bytes) => match Request::parse(&bytes) {
            Ok(request) => {
                span.record("method", request.method().as_str());
                span.record("path", request.path());

                let routed = router.route(&request, state);
                (routed.response, routed.route, request.method() != Method::HEAD)
            }
            Err(e) => {
                tracing::debug!(error = %e, "malformed request");
                (
                    Response::error(StatusCode::BadRequest, &format!("Invalid: {}", e)),
                    REJECTED_ROUTE.to_string(),
                    true,
                )
            }
        },
    };

    response.add_header("Server", SERVER_NAME);
    response.add_header("Connection", "close");
    response.add_header("X-Request-Id", &request_id.to_string());

    stream.write_all(&response.to_bytes_with_body(include_body))?;
    stream.flush()?;

    let latency = start.elapsed();
    let status = response.status().as_u16();
    state.metrics.record_request(&route, status, latency);

    tracing::info!(status, %route, latency_us = latency.as_micros() as u64, "request completed");

    Ok(())
}
