//! # Gestor del Ciclo de Vida de Jobs
//! src/jobs/manager.rs
//!
//! Envuelve el `JobStore` con la máquina de estados:
//!
//! ```text
//! New ──start──▶ Processing        Completed (ninguna operación llega aquí)
//! ```
//!
//! El "procesamiento" es simulado: `start` cambia el estado y deja un
//! resultado fijo en el mismo instante; no se lanza trabajo en segundo plano.

use crate::jobs::error::JobError;
use crate::jobs::store::JobStore;
use crate::jobs::types::{DataJob, DataJobStatus};
use serde::Serialize;
use uuid::Uuid;

/// Resultado que `start` deja en el job
pub const PROCESSING_STARTED: &str = "Processing started";

/// Resultado de intentar iniciar un job existente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// El job pasó de `New` a `Processing`
    Started,

    /// El job ya había iniciado o terminado; no se modificó
    Rejected(DataJobStatus),
}

/// Conteo de jobs por estado (para /metrics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobStats {
    pub total: usize,
    pub new: usize,
    pub processing: usize,
    pub completed: usize,
}

/// Gestor central de data jobs
#[derive(Debug, Clone, Default)]
pub struct JobManager {
    store: JobStore,
}

impl JobManager {
    /// Crea un manager sobre un store existente
    pub fn new(store: JobStore) -> Self {
        Self { store }
    }

    pub fn list_all(&self) -> Vec<DataJob> {
        self.store.list_all()
    }

    pub fn list_by_status(&self, status: DataJobStatus) -> Vec<DataJob> {
        self.store.list_by_status(status)
    }

    pub fn get(&self, id: Uuid) -> Option<DataJob> {
        self.store.get(id)
    }

    /// Registra un job con los datos que envió el cliente
    pub fn create(&self, job: DataJob) -> DataJob {
        let created = self.store.create(job);
        tracing::info!(job_id = %created.id, status = %created.status, "data job created");
        created
    }

    /// Reemplaza un job existente; `None` si no existe
    pub fn update(&self, job: DataJob) -> Option<DataJob> {
        let id = job.id;
        let updated = self.store.update(job);
        match &updated {
            Some(job) => tracing::info!(job_id = %id, status = %job.status, "data job updated"),
            None => tracing::debug!(job_id = %id, "update of unknown data job"),
        }
        updated
    }

    pub fn delete(&self, id: Uuid) -> Result<(), JobError> {
        self.store.delete(id)?;
        tracing::info!(job_id = %id, "data job deleted");
        Ok(())
    }

    /// Inicia el procesamiento (simulado) de un job
    ///
    /// La comprobación del estado y el cambio ocurren bajo el mismo lock,
    /// así que de dos llamadas simultáneas sobre el mismo ID solo una
    /// obtiene `Started`.
    pub fn start(&self, id: Uuid) -> Result<StartOutcome, JobError> {
        let outcome = self
            .store
            .modify(id, |job| {
                if job.status != DataJobStatus::New {
                    return StartOutcome::Rejected(job.status);
                }
                job.status = DataJobStatus::Processing;
                job.results = vec![PROCESSING_STARTED.to_string()];
                StartOutcome::Started
            })
            .ok_or(JobError::NotFound(id))?;

        match outcome {
            StartOutcome::Started => tracing::info!(job_id = %id, "data job started"),
            StartOutcome::Rejected(status) => {
                tracing::debug!(job_id = %id, %status, "data job start rejected")
            }
        }

        Ok(outcome)
    }

    /// Estado actual de un job
    pub fn get_status(&self, id: Uuid) -> Result<DataJobStatus, JobError> {
        self.store
            .get(id)
            .map(|job| job.status)
            .ok_or(JobError::NotFound(id))
    }

    /// Copia de los resultados de un job
    pub fn get_results(&self, id: Uuid) -> Result<Vec<String>, JobError> {
        self.store
            .modify(id, |job| job.results.clone())
            .ok_or(JobError::NotFound(id))
    }

    /// Conteo de jobs por estado
    pub fn stats(&self) -> JobStats {
        JobStats {
            total: self.store.count(),
            new: self.store.count_by_status(DataJobStatus::New),
            processing: self.store.count_by_status(DataJobStatus::Processing),
            completed: self.store.count_by_status(DataJobStatus::Completed),
        }
    }
}
