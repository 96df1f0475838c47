//! Documentos JSON que rclone intercambia con el metadata mapper.

use crate::error::MapperError;
use serde::{Deserialize, Serialize};
use serde_json::{Deserializer, Map, Value};
use std::collections::BTreeMap;
use std::io::{Read, Write};

pub const METADATA_KEY: &str = "Metadata";

/// Documento de entrada. Además de `Metadata` rclone envía otros campos
/// (`Remote`, `Size`, `MimeType`...) que se conservan pero no se interpretan.
#[derive(Debug, Clone)]
pub struct MapperRequest {
    fields: Map<String, Value>,
}

impl MapperRequest {
    /// Lee sólo el primer documento JSON; lo que venga después se ignora.
    /// Un documento `null` equivale a un objeto vacío.
    pub fn from_reader(reader: impl Read) -> Result<Self, MapperError> {
        let first = Deserializer::from_reader(reader)
            .into_iter::<Option<Map<String, Value>>>()
            .next();

        match first {
            None => Err(MapperError::EmptyInput),
            Some(Err(error)) => Err(MapperError::InvalidJson(error)),
            Some(Ok(fields)) => Ok(Self {
                fields: fields.unwrap_or_default(),
            }),
        }
    }

    #[cfg(test)]
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MapperError> {
        Self::from_reader(bytes)
    }

    /// Mapa `Metadata` del documento. Distingue la clave ausente de un valor
    /// que no es objeto (incluido `null`).
    pub fn metadata(&self) -> Result<&Map<String, Value>, MapperError> {
        match self.fields.get(METADATA_KEY) {
            None => Err(MapperError::MissingMetadata),
            Some(Value::Object(map)) => Ok(map),
            Some(other) => Err(MapperError::InvalidMetadataShape(json_kind(other))),
        }
    }
}

/// Documento de salida: sólo `Metadata`, con valores de texto.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperResponse {
    #[serde(rename = "Metadata")]
    pub metadata: BTreeMap<String, String>,
}

impl MapperResponse {
    /// Escribe la respuesta como una sola línea JSON terminada en `\n`.
    pub fn write_to(&self, mut writer: impl Write) -> Result<(), MapperError> {
        if let Err(error) = serde_json::to_writer(&mut writer, self) {
            return Err(MapperError::Encode(error));
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "un booleano",
        Value::Number(_) => "un número",
        Value::String(_) => "un texto",
        Value::Array(_) => "un arreglo",
        Value::Object(_) => "un objeto",
    }
}
