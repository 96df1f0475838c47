use rclone_permissions_mapper::config::MapperConfig;
use rclone_permissions_mapper::host::HostIdentity;
use rclone_permissions_mapper::mapper::MetadataFilter;
use std::io;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();

    let config = MapperConfig::from_env();
    let (trace, trace_warning) = config.open_trace();
    for warning in config.warnings.iter().chain(&trace_warning) {
        warn!("{warning}");
    }

    let host = HostIdentity::current();
    debug!(uid = host.uid, gid = host.gid, "identidad del host");

    let mut filter = MetadataFilter::new(host, config.bands, trace);
    let result = rclone_permissions_mapper::run(
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
        &mut filter,
    );
    // Cierra el archivo de trazas antes de salir.
    drop(filter);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::from(error.exit_code())
        }
    }
}

/// Sólo stderr: stdout está reservado para el documento JSON.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
}
