//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! 1. Escucha en un puerto
//! 2. Acepta conexiones y lanza un thread por cada una
//! 3. Lee y parsea el request
//! 4. Lo despacha con el router y envía la respuesta

pub mod routes;
pub mod state;
pub mod tcp;

pub use routes::build_router;
pub use state::AppState;
pub use tcp::Server;
