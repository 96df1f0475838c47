use super::ownership::{PlatformBands, parse_owner_id};
use super::request::{MapperResponse, json_kind};
use crate::error::MapperError;
use crate::host::HostIdentity;
use crate::trace::TraceSink;
use serde_json::{Map, Value};
use tracing::debug;

pub const ERROR_KEY: &str = "error";
pub const UID_KEY: &str = "uid";
pub const GID_KEY: &str = "gid";

macro_rules! trace_line {
    ($sink:expr, $($arg:tt)*) => {
        $sink.line(format_args!($($arg)*))
    };
}

/// Resultado de filtrar un mapa de metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub response: MapperResponse,
    /// Avisos no fatales para stderr, uno por línea.
    pub diagnostics: Vec<String>,
}

enum Decision {
    Keep(String),
    Drop,
}

#[derive(Clone, Copy)]
enum Owner {
    User,
    Group,
}

/// Decide, clave por clave, qué metadata de propietario tiene sentido en el
/// sistema destino.
#[derive(Debug)]
pub struct MetadataFilter {
    host: HostIdentity,
    bands: PlatformBands,
    trace: TraceSink,
}

impl MetadataFilter {
    pub fn new(host: HostIdentity, bands: PlatformBands, trace: TraceSink) -> Self {
        Self { host, bands, trace }
    }

    pub fn filter(&mut self, metadata: &Map<String, Value>) -> Result<FilterOutcome, MapperError> {
        if let Some(value) = metadata.get(ERROR_KEY) {
            let message = value_text(value);
            trace_line!(self.trace, "error recibido de rclone: {message}");
            return Err(MapperError::Upstream(message));
        }

        if self.trace.is_enabled() {
            let (uid, gid) = (self.host.describe_uid(), self.host.describe_gid());
            trace_line!(self.trace, "host uid: {uid}, gid: {gid}");
        }

        let mut outcome = FilterOutcome::default();
        for (key, value) in metadata {
            match self.decide(key, value, &mut outcome.diagnostics) {
                Decision::Keep(text) => {
                    outcome.response.metadata.insert(key.clone(), text);
                }
                Decision::Drop => {}
            }
        }

        self.trace.dump_json("final", &outcome.response);
        Ok(outcome)
    }

    fn decide(&mut self, key: &str, value: &Value, diagnostics: &mut Vec<String>) -> Decision {
        let shown = value_text(value);
        match key {
            UID_KEY => {
                trace_line!(self.trace, "uid detected! key: {key}, val: {shown}");
                trace_line!(self.trace, "osuid: {}", self.host.uid);
                self.decide_owner(Owner::User, key, value, diagnostics)
            }
            GID_KEY => {
                trace_line!(self.trace, "gid detected! key: {key}, val: {shown}");
                trace_line!(self.trace, "osgid: {}", self.host.gid);
                self.decide_owner(Owner::Group, key, value, diagnostics)
            }
            _ => {
                trace_line!(self.trace, "skipping -- key: {key}, val: {shown}");
                match value.as_str() {
                    Some(text) => Decision::Keep(text.to_string()),
                    None => {
                        diagnostics.push(non_string_diagnostic(key, value));
                        let kind = json_kind(value);
                        debug!(key, kind, "clave descartada: valor no textual");
                        Decision::Drop
                    }
                }
            }
        }
    }

    /// Si el valor no se puede interpretar como id se conserva tal cual con un
    /// aviso.
    fn decide_owner(
        &mut self,
        owner: Owner,
        key: &str,
        value: &Value,
        diagnostics: &mut Vec<String>,
    ) -> Decision {
        let Some(raw) = value.as_str() else {
            diagnostics.push(non_string_diagnostic(key, value));
            let kind = json_kind(value);
            debug!(key, kind, "id descartado: valor no textual");
            return Decision::Drop;
        };

        let Some(id) = parse_owner_id(raw) else {
            let note = format!("Error converting string to int: {raw}");
            diagnostics.push(note);
            debug!(key, value = raw, "id no numérico; se conserva");
            return Decision::Keep(raw.to_string());
        };

        if self.is_foreign(owner, id) {
            trace_line!(self.trace, "unsetting. key: {key}, val: {raw}");
            let HostIdentity { uid, gid } = self.host;
            debug!(key, id, uid, gid, "id descartado");
            Decision::Drop
        } else {
            debug!(key, id, "id conservado");
            Decision::Keep(raw.to_string())
        }
    }

    /// Un uid es ajeno si cae en la banda opuesta a la del host; un gid, si no
    /// coincide con el del host.
    fn is_foreign(&self, owner: Owner, id: i64) -> bool {
        match owner {
            Owner::User => self.bands.straddles(id, i64::from(self.host.uid)),
            Owner::Group => id != i64::from(self.host.gid),
        }
    }
}

/// Texto plano de un valor: las cadenas sin comillas, el resto como JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn non_string_diagnostic(key: &str, value: &Value) -> String {
    let kind = json_kind(value);
    format!("Valor no textual para `{key}` ({kind}); se descarta la clave")
}
