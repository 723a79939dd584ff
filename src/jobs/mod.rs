//! # Sistema de Data Jobs
//!
//! Registro en memoria de data jobs y su ciclo de vida
//! (`New → Processing`). El procesamiento es simulado.
//!
//! ## Endpoints
//!
//! Ver [`handlers`]; todas las rutas cuelgan de `/api/datajobs`.

pub mod error;
pub mod handlers;
pub mod manager;
pub mod store;
pub mod types;

pub use error::JobError;
pub use manager::{JobManager, JobStats, StartOutcome};
pub use store::JobStore;
pub use types::{DataJob, DataJobStatus, ParseStatusError};
