//! # Tipos del Sistema de Data Jobs
//! src/jobs/types.rs
//!
//! Define el registro `DataJob` y su estado. El formato JSON es el mismo que
//! consumen los clientes existentes: campos en camelCase y el estado como
//! entero (`New = 2`, `Processing = 1`, `Completed = 0`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Estado de un data job
///
/// Los valores numéricos son parte del contrato con los clientes y no deben
/// cambiarse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DataJobStatus {
    /// Job terminado (ninguna operación lo alcanza todavía)
    Completed = 0,

    /// Job en procesamiento
    Processing = 1,

    /// Job recién registrado
    New = 2,
}

/// Error al interpretar un estado recibido por el cliente
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown data job status: {0}")]
pub struct ParseStatusError(pub String);

impl DataJobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataJobStatus::New => "New",
            DataJobStatus::Processing => "Processing",
            DataJobStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for DataJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DataJobStatus> for u8 {
    fn from(status: DataJobStatus) -> Self {
        status as u8
    }
}

impl TryFrom<u8> for DataJobStatus {
    type Error = ParseStatusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DataJobStatus::Completed),
            1 => Ok(DataJobStatus::Processing),
            2 => Ok(DataJobStatus::New),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl FromStr for DataJobStatus {
    type Err = ParseStatusError;

    /// Acepta el valor numérico (`"2"`) o el nombre sin distinguir
    /// mayúsculas (`"new"`, `"Processing"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<u8>() {
            return DataJobStatus::try_from(n);
        }

        match s.to_lowercase().as_str() {
            "new" => Ok(DataJobStatus::New),
            "processing" => Ok(DataJobStatus::Processing),
            "completed" => Ok(DataJobStatus::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Un data job registrado por un cliente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataJob {
    /// ID elegido por el cliente; no se valida unicidad
    pub id: Uuid,

    /// Nombre descriptivo
    #[serde(default)]
    pub name: String,

    /// Archivo a procesar (nunca se abre, el procesamiento es simulado)
    #[serde(default)]
    pub file_path_to_process: String,

    /// Estado actual
    pub status: DataJobStatus,

    /// Resultados acumulados
    #[serde(default)]
    pub results: Vec<String>,

    /// Metadatos auxiliares (hipervínculos), se devuelven tal cual
    #[serde(default)]
    pub links: Vec<serde_json::Value>,
}

impl DataJob {
    /// Crea un job en estado `New` sin resultados ni links
    pub fn new(id: Uuid, name: &str, file_path_to_process: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            file_path_to_process: file_path_to_process.to_string(),
            status: DataJobStatus::New,
            results: Vec::new(),
            links: Vec::new(),
        }
    }
}
