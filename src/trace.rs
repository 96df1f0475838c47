//! Trazas opcionales de depuración hacia un archivo.
//!
//! Por defecto el sumidero no hace nada. Cuando se habilita, cada línea se
//! escribe con marca de tiempo local y el archivo se vacía y cierra al soltar
//! el `TraceSink`, incluso si el proceso termina por un error reportado.

use chrono::Local;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const DEFAULT_TRACE_FILE: &str = "rclone-permissions-mapper-debug.txt";

#[derive(Default)]
pub struct TraceSink {
    writer: Option<Box<dyn Write>>,
}

impl TraceSink {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Crea (o trunca) el archivo de trazas en `path`.
    pub fn to_file(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    pub fn from_writer(writer: impl Write + 'static) -> Self {
        Self {
            writer: Some(Box::new(writer)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        if let Err(error) = writeln!(writer, "{timestamp} {args}") {
            tracing::warn!(%error, "no se pudo escribir la traza; se desactiva");
            self.writer = None;
        }
    }

    /// Vuelca `value` indentado con tabuladores al final de la traza.
    pub fn dump_json(&mut self, label: &str, value: &impl Serialize) {
        if !self.is_enabled() {
            return;
        }

        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        match value.serialize(&mut serializer) {
            Ok(()) => {
                let rendered = String::from_utf8_lossy(&buffer);
                self.line(format_args!("{label}:\n{rendered}"));
            }
            Err(error) => self.line(format_args!("json err: {error}")),
        }
    }
}

impl Drop for TraceSink {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            let _ = writer.flush();
        }
    }
}

impl fmt::Debug for TraceSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceSink")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
