//! Metadata mapper para `rclone sync --metadata-mapper` que descarta uid/gid
//! cuando no tienen sentido en el sistema destino (macOS ↔ Linux).
//!
//! Sólo Unix: la identidad del host se lee con el crate `users`.

#[cfg(not(unix))]
compile_error!("rclone-permissions-mapper sólo funciona en sistemas Unix");

pub mod config;
pub mod error;
pub mod host;
pub mod mapper;
pub mod trace;

use error::MapperError;
use mapper::{MapperRequest, MetadataFilter};
use std::io::{Read, Write};

/// Lee un documento de `input`, lo filtra y escribe la respuesta en `output`.
/// Los avisos no fatales se escriben en `diagnostics`, uno por línea.
pub fn run(
    input: impl Read,
    output: impl Write,
    mut diagnostics: impl Write,
    filter: &mut MetadataFilter,
) -> Result<(), MapperError> {
    let request = MapperRequest::from_reader(input)?;
    let outcome = filter.filter(request.metadata()?)?;

    for line in &outcome.diagnostics {
        writeln!(diagnostics, "{line}")?;
    }

    outcome.response.write_to(output)
}
