//! Errores del mapper y su traducción a códigos de salida del proceso.

use std::io;
use thiserror::Error;

/// Código de salida para fallos reportados (sin `Metadata` o `error` de rclone).
pub const EXIT_REPORTED: u8 = 1;
/// Código de salida para fallos irrecuperables de entrada/salida o de forma.
pub const EXIT_FATAL: u8 = 2;

#[derive(Debug, Error)]
pub enum MapperError {
    #[error("entrada JSON inválida: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("entrada vacía: no se recibió ningún documento JSON")]
    EmptyInput,

    #[error("Metadata key not found")]
    MissingMetadata,

    /// Error que rclone ya detectó y nos pasa en la clave `error`.
    #[error("Error: {0}")]
    Upstream(String),

    #[error("`Metadata` debe ser un objeto JSON, se recibió {0}")]
    InvalidMetadataShape(&'static str),

    #[error("no se pudo serializar la respuesta: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("error de E/S: {0}")]
    Io(#[from] io::Error),
}

impl MapperError {
    pub fn exit_code(&self) -> u8 {
        match self {
            MapperError::MissingMetadata | MapperError::Upstream(_) => EXIT_REPORTED,
            _ => EXIT_FATAL,
        }
    }
}
