//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea (método, path) a handlers.
//!
//! ```text
//! Request → Router → Handler(request, params, state) → Response
//! ```
//!
//! Los patrones se comparan segmento a segmento; un segmento `{nombre}`
//! captura cualquier valor y queda disponible en `Params`. Gana la primera
//! ruta registrada que coincida. Si el path coincide con alguna ruta pero
//! no con el método, se responde 405; si no coincide con ninguna, 404.

use crate::http::{Method, Request, Response, StatusCode};

/// Etiqueta que se reporta cuando ninguna ruta coincide
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Parámetros capturados del path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Tipo de función handler
///
/// Recibe el request, los parámetros del path y el estado compartido.
pub type Handler<S> = fn(&Request, &Params, &S) -> Response;

struct Route<S> {
    method: Method,
    pattern: String,
    segments: Vec<Segment>,
    handler: Handler<S>,
}

#[derive(Debug)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Resultado de despachar un request
pub struct Routed {
    pub response: Response,

    /// Patrón de la ruta que atendió el request (o `UNMATCHED_ROUTE`)
    pub route: String,
}

/// Router que mapea métodos y paths a handlers
pub struct Router<S> {
    routes: Vec<Route<S>>,
}

impl<S> Router<S> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use datajobs_server::router::{Params, Router};
    /// use datajobs_server::http::{Method, Request, Response};
    ///
    /// fn hello_handler(_req: &Request, params: &Params, _state: &()) -> Response {
    ///     Response::json(&format!(r#"{{"hello": "{}"}}"#, params.get("name").unwrap_or("")))
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register(Method::GET, "/hello/{name}", hello_handler);
    /// ```
    pub fn register(&mut self, method: Method, pattern: &str, handler: Handler<S>) {
        let segments = split_path(pattern)
            .map(|segment| {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => Segment::Param(name.to_string()),
                    None => Segment::Literal(segment.to_string()),
                }
            })
            .collect();

        self.routes.push(Route {
            method,
            pattern: pattern.to_string(),
            segments,
            handler,
        });
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Los requests HEAD se atienden con la ruta GET equivalente.
    pub fn route(&self, request: &Request, state: &S) -> Routed {
        let path = request.path();
        let method = match request.method() {
            Method::HEAD => Method::GET,
            other => other,
        };

        let mut path_matched = false;

        for route in &self.routes {
            let Some(params) = match_segments(&route.segments, path) else {
                continue;
            };

            if route.method != method {
                path_matched = true;
                continue;
            }

            return Routed {
                response: (route.handler)(request, &params, state),
                route: route.pattern.clone(),
            };
        }

        let response = if path_matched {
            Response::error(
                StatusCode::MethodNotAllowed,
                &format!("Method {} not allowed for {}", request.method().as_str(), path),
            )
        } else {
            Response::error(StatusCode::NotFound, &format!("Route not found: {}", path))
        };

        Routed {
            response,
            route: UNMATCHED_ROUTE.to_string(),
        }
    }
}

impl<S> Default for Router<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn match_segments(segments: &[Segment], path: &str) -> Option<Params> {
    let parts: Vec<&str> = split_path(path).collect();
    if parts.len() != segments.len() {
        return None;
    }

    let mut params = Vec::new();
    for (segment, part) in segments.iter().zip(parts) {
        match segment {
            Segment::Literal(literal) if literal == part => {}
            Segment::Literal(_) => return None,
            Segment::Param(name) => params.push((name.clone(), part.to_string())),
        }
    }

    Some(Params(params))
}
