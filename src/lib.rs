//! # Data Jobs Server
//! src/lib.rs
//!
//! Servidor HTTP/1.0 concurrente que expone una API REST para registrar
//! data jobs, consultarlos y arrancar su procesamiento (simulado).
//!
//! ## Arquitectura
//!
//! - `http`: Parsing y serialización del protocolo HTTP/1.0
//! - `router`: Enrutamiento por método y patrón de path
//! - `jobs`: Modelo, almacenamiento en memoria, lógica y handlers
//! - `server`: Servidor TCP, estado compartido y tabla de rutas
//! - `metrics`: Recolección de métricas y observabilidad
//! - `config`: Configuración por CLI y variables de entorno
//! - `logging`: Inicialización de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use datajobs_server::config::Config;
//! use datajobs_server::server::Server;
//!
//! let server = Server::new(Config::default());
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod router;
pub mod server;
