//! # Módulo HTTP
//!
//! Implementación propia del protocolo HTTP, sin librerías de alto nivel:
//!
//! - Parsing de requests HTTP/1.0 y HTTP/1.1 (con body por `Content-Length`)
//! - Construcción de responses HTTP/1.0
//! - Códigos de estado
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 201 Created\r\n
//! Content-Type: application/json\r\n
//! Content-Length: 13\r\n
//! \r\n
//! {"ok": true}
//! ```

pub mod request;
pub mod response;
pub mod status;

pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
