//! # Errores del Sistema de Jobs
//! src/jobs/error.rs

use thiserror::Error;
use uuid::Uuid;

/// Errores que pueden devolver el store y el manager
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    /// No existe ningún job con ese ID
    #[error("Data job not found: {0}")]
    NotFound(Uuid),
}
