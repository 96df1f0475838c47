//! Identidad (uid/gid efectivos) del proceso que ejecuta el mapper.

use users::{get_effective_gid, get_effective_uid, get_group_by_gid, get_user_by_uid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostIdentity {
    pub uid: u32,
    pub gid: u32,
}

impl HostIdentity {
    /// Lee el uid y gid efectivos del proceso actual.
    pub fn current() -> Self {
        Self {
            uid: get_effective_uid(),
            gid: get_effective_gid(),
        }
    }

    pub fn user_name(&self) -> Option<String> {
        get_user_by_uid(self.uid).map(|user| user.name().to_string_lossy().into_owned())
    }

    pub fn group_name(&self) -> Option<String> {
        get_group_by_gid(self.gid).map(|group| group.name().to_string_lossy().into_owned())
    }

    /// Descripción legible para las trazas, p. ej. `501 (nick)`.
    pub fn describe_uid(&self) -> String {
        describe(self.uid, self.user_name())
    }

    pub fn describe_gid(&self) -> String {
        describe(self.gid, self.group_name())
    }
}

fn describe(id: u32, name: Option<String>) -> String {
    match name {
        Some(name) => format!("{id} ({name})"),
        None => format!("{id} (desconocido)"),
    }
}
