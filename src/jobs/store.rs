//! # Store en Memoria de Data Jobs
//! src/jobs/store.rs
//!
//! Colección compartida de jobs en orden de inserción. Todo acceso pasa por
//! un único `Mutex`, de modo que cada operación ve un estado consistente
//! aunque varias conexiones la llamen a la vez. No hay persistencia: el
//! contenido se pierde al reiniciar el proceso.

use crate::jobs::error::JobError;
use crate::jobs::types::{DataJob, DataJobStatus};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Store de jobs compartido entre threads
///
/// Clonar el store comparte la misma colección (igual que un `Arc`).
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    jobs: Arc<Mutex<Vec<DataJob>>>,
}

impl JobStore {
    /// Crea un store vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Toma el lock; si un thread entró en pánico con el lock tomado,
    /// los datos siguen siendo válidos porque ninguna operación los deja a medias.
    fn lock(&self) -> MutexGuard<'_, Vec<DataJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Todos los jobs en orden de inserción
    pub fn list_all(&self) -> Vec<DataJob> {
        self.lock().clone()
    }

    /// Jobs cuyo estado coincide (puede ser vacío)
    pub fn list_by_status(&self, status: DataJobStatus) -> Vec<DataJob> {
        self.lock()
            .iter()
            .filter(|job| job.status == status)
            .cloned()
            .collect()
    }

    /// Obtiene un job por ID (el primero si hay IDs duplicados)
    pub fn get(&self, id: Uuid) -> Option<DataJob> {
        self.lock().iter().find(|job| job.id == id).cloned()
    }

    /// Inserta el job tal cual, sin comprobar si el ID ya existe
    pub fn create(&self, job: DataJob) -> DataJob {
        self.lock().push(job.clone());
        job
    }

    /// Reemplaza todos los campos salvo el ID de un job existente
    ///
    /// Retorna `None` sin insertar nada si el ID no existe.
    pub fn update(&self, job: DataJob) -> Option<DataJob> {
        let mut jobs = self.lock();
        let existing = jobs.iter_mut().find(|existing| existing.id == job.id)?;

        existing.name = job.name;
        existing.file_path_to_process = job.file_path_to_process;
        existing.status = job.status;
        existing.results = job.results;
        existing.links = job.links;

        Some(existing.clone())
    }

    /// Elimina un job y lo retorna
    pub fn delete(&self, id: Uuid) -> Result<DataJob, JobError> {
        let mut jobs = self.lock();
        let index = jobs
            .iter()
            .position(|job| job.id == id)
            .ok_or(JobError::NotFound(id))?;

        Ok(jobs.remove(index))
    }

    /// Aplica `f` al job con ese ID mientras se mantiene el lock
    ///
    /// Permite leer y modificar un job en un solo paso atómico.
    pub fn modify<R>(&self, id: Uuid, f: impl FnOnce(&mut DataJob) -> R) -> Option<R> {
        let mut jobs = self.lock();
        jobs.iter_mut().find(|job| job.id == id).map(f)
    }

    /// Número de jobs almacenados
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Número de jobs en un estado dado
    pub fn count_by_status(&self, status: DataJobStatus) -> usize {
        self.lock().iter().filter(|job| job.status == status).count()
    }
}
