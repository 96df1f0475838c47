//! Configuración del mapper leída de variables de entorno.
//!
//! rclone lanza el mapper sin argumentos, así que todas las opciones son
//! variables de entorno y ninguna es obligatoria.

use crate::mapper::PlatformBands;
use crate::mapper::ownership::{DEFAULT_LINUX_MIN, DEFAULT_MAC_MIN};
use crate::trace::{DEFAULT_TRACE_FILE, TraceSink};
use std::env;
use std::path::{Path, PathBuf};

pub const DEBUG_VAR: &str = "RCLONE_PERMISSIONS_MAPPER_DEBUG";
pub const DEBUG_FILE_VAR: &str = "RCLONE_PERMISSIONS_MAPPER_DEBUG_FILE";
pub const MAC_MIN_VAR: &str = "RCLONE_PERMISSIONS_MAPPER_MAC_MIN";
pub const LINUX_MIN_VAR: &str = "RCLONE_PERMISSIONS_MAPPER_LINUX_MIN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// Ruta del archivo de trazas; `None` deja las trazas desactivadas.
    pub trace_file: Option<PathBuf>,
    pub bands: PlatformBands,
    /// Avisos de configuración para stderr.
    pub warnings: Vec<String>,
}

impl MapperConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();

        let debug = lookup(DEBUG_VAR).is_some_and(|value| is_truthy(&value));
        let trace_file = debug.then(|| trace_path(&lookup));

        let mac_min = read_bound(&lookup, MAC_MIN_VAR, DEFAULT_MAC_MIN, &mut warnings);
        let linux_min = read_bound(&lookup, LINUX_MIN_VAR, DEFAULT_LINUX_MIN, &mut warnings);
        let bands = match PlatformBands::new(mac_min, linux_min) {
            Some(bands) => bands,
            None => {
                let message = format!("{MAC_MIN_VAR} debe ser menor que {LINUX_MIN_VAR}");
                warnings.push(format!("{message}; se usan los valores por defecto"));
                PlatformBands::default()
            }
        };

        Self {
            trace_file,
            bands,
            warnings,
        }
    }

    /// Abre el sumidero de trazas. Si el archivo no se puede crear se
    /// devuelve uno desactivado junto con el aviso.
    pub fn open_trace(&self) -> (TraceSink, Option<String>) {
        let Some(path) = self.trace_file.as_deref() else {
            return (TraceSink::disabled(), None);
        };

        match TraceSink::to_file(path) {
            Ok(sink) => (sink, None),
            Err(error) => {
                let shown = path.display();
                let warning = format!("No se pudo crear la traza `{shown}`: {error}");
                (TraceSink::disabled(), Some(warning))
            }
        }
    }
}

fn trace_path(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    match lookup(DEBUG_FILE_VAR) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => default_trace_path(lookup("HOME").as_deref()),
    }
}

fn default_trace_path(home: Option<&str>) -> PathBuf {
    let dir = home.filter(|home| !home.is_empty()).unwrap_or("/");
    Path::new(dir).join(DEFAULT_TRACE_FILE)
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    matches!(value.as_str(), "1" | "true" | "yes" | "on")
}

fn read_bound(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: i64,
    warnings: &mut Vec<String>,
) -> i64 {
    let Some(raw) = lookup(name) else {
        return default;
    };

    match raw.trim().parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            warnings.push(format!("{name} no es un entero válido ({raw}); se usa {default}"));
            default
        }
    }
}
