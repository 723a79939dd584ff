//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser de requests HTTP/1.0 y HTTP/1.1 (una request por conexión).
//!
//! ## Formato de un Request
//!
//! ```text
//! PUT /api/datajobs HTTP/1.1\r\n
//! Content-Type: application/json\r\n
//! Content-Length: 58\r\n
//! \r\n
//! {"id": "…", "status": 2}
//! ```

use std::collections::HashMap;
use thiserror::Error;

/// Separador entre headers y body
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
}

impl Method {
    fn parse(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty request")]
    EmptyRequest,

    #[error("Request is not valid UTF-8")]
    InvalidEncoding,

    #[error("Invalid request line format")]
    InvalidRequestLine,

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("Invalid HTTP version: {0}")]
    InvalidHttpVersion(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,

    /// Path sin query string (ej: "/api/datajobs")
    path: String,

    /// Headers con el nombre en minúsculas
    headers: HashMap<String, String>,

    version: String,

    body: Vec<u8>,
}

impl Request {
    /// Parsea un request desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use datajobs_server::http::Request;
    ///
    /// let raw = b"GET /api/datajobs?page=1 HTTP/1.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/api/datajobs");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        if buffer.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ParseError::EmptyRequest);
        }

        // Separar cabecera y body; el body puede ser binario
        let (head, body) = match find_subsequence(buffer, HEADER_TERMINATOR) {
            Some(pos) => (&buffer[..pos], &buffer[pos + HEADER_TERMINATOR.len()..]),
            None => (buffer, &buffer[buffer.len()..]),
        };

        let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidEncoding)?;
        let mut lines = head.split("\r\n");

        let request_line = lines.next().ok_or(ParseError::InvalidRequestLine)?;
        let (method, path, version) = Self::parse_request_line(request_line)?;
        let headers = Self::parse_headers(lines)?;

        // Respetar Content-Length si viene; ignorar bytes extra
        let body_len = headers
            .get("content-length")
            .and_then(|v| v.parse::<usize>().ok())
            .map_or(body.len(), |len| len.min(body.len()));

        Ok(Request {
            method,
            path,
            headers,
            version,
            body: body[..body_len].to_vec(),
        })
    }

    /// Formato: `METHOD /path?query HTTP/1.x`
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::parse(parts[0])?;

        // La API no usa query parameters: se descartan
        let path = parts[1].split('?').next().unwrap_or_default().to_string();
        if !path.starts_with('/') {
            return Err(ParseError::InvalidRequestLine);
        }

        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        Ok((method, path, version))
    }

    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.trim().is_empty() {
                break;
            }

            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }

        Ok(headers)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene un header sin distinguir mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Posición de `needle` dentro de `haystack`
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Lee `Content-Length` de una cabecera cruda (sin el terminador)
pub fn content_length(head: &[u8]) -> Option<usize> {
    let head = std::str::from_utf8(head).ok()?;
    head.split("\r\n").skip(1).find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let raw = b"GET /api/datajobs HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/api/datajobs");
        assert_eq!(request.version(), "HTTP/1.0");
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_parse_strips_query() {
        let raw = b"GET /api/datajobs?x=1 HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.path(), "/api/datajobs");
    }

    #[test]
    fn test_parse_all_methods() {
        for method in ["GET", "HEAD", "POST", "PUT", "DELETE"] {
            let raw = format!("{} / HTTP/1.1\r\n\r\n", method);
            let request = Request::parse(raw.as_bytes()).unwrap();
            assert_eq!(request.method().as_str(), method);
        }
    }

    #[test]
    fn test_headers_case_insensitive() {
        let raw = b"GET / HTTP/1.0\r\nContent-Type: application/json\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_parse_body_with_content_length() {
        let raw = b"PUT /api/datajobs HTTP/1.1\r\nContent-Length: 4\r\n\r\n{}{}extra";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.body(), b"{}{}");
    }

    #[test]
    fn test_parse_body_without_content_length() {
        let raw = b"POST /api/datajobs HTTP/1.0\r\n\r\n{\"a\":1}";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.body(), b"{\"a\":1}");
    }

    #[test]
    fn test_unsupported_method() {
        let raw = b"PATCH / HTTP/1.1\r\n\r\n";
        assert_eq!(
            Request::parse(raw).unwrap_err(),
            ParseError::UnsupportedMethod("PATCH".to_string())
        );
    }

    #[test]
    fn test_invalid_version() {
        let raw = b"GET / HTTP/2.0\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidHttpVersion(_))));
    }

    #[test]
    fn test_empty_request() {
        assert_eq!(Request::parse(b"").unwrap_err(), ParseError::EmptyRequest);
        assert_eq!(Request::parse(b"\r\n").unwrap_err(), ParseError::EmptyRequest);
    }

    #[test]
    fn test_invalid_request_line() {
        let raw = b"GET\r\n\r\n";
        assert_eq!(Request::parse(raw).unwrap_err(), ParseError::InvalidRequestLine);
    }

    #[test]
    fn test_invalid_header() {
        let raw = b"GET / HTTP/1.0\r\nno-colon-here\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidHeader(_))));
    }

    #[test]
    fn test_content_length_helper() {
        let head = b"POST / HTTP/1.1\r\nHost: x\r\ncontent-length: 12";
        assert_eq!(content_length(head), Some(12));
        assert_eq!(content_length(b"GET / HTTP/1.1\r\nHost: x"), None);
    }
}
