use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const ETC_MACHINE_ID_PATH: &str = "/etc/machine-id";
pub const DBUS_MACHINE_ID_PATH: &str = "/var/lib/dbus/machine-id";

/// First readable, non-empty id file wins.
pub fn machine_id_from(paths: &[PathBuf]) -> Option<String> {
    for path in paths {
        if !path.is_file() {
            continue;
        }
        match fs::read_to_string(path) {
            Ok(content) if !content.trim().is_empty() => return Some(content.trim().to_string()),
            Ok(_) => debug!("Empty machine id at {}", path.display()),
            Err(e) => debug!("Unable to read machine id at {}: {}", path.display(), e),
        }
    }
    None
}

pub fn machine_id_v3() -> String {
    let paths = [
        Path::new(ETC_MACHINE_ID_PATH).to_path_buf(),
        Path::new(DBUS_MACHINE_ID_PATH).to_path_buf(),
    ];
    machine_id_from(&paths).unwrap_or_else(|| {
        // Not stable across processes.
        let generated = Uuid::new_v4().simple().to_string();
        debug!("No machine id file found, using generated id");
        generated
    })
}

/// Anonymous identity of this installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    pub installation_id_v3: Uuid,
}

impl Installation {
    pub fn new() -> Self {
        Self::from_machine_id(&machine_id_v3())
    }

    pub fn from_machine_id(machine_id: &str) -> Self {
        Self {
            installation_id_v3: Uuid::new_v5(&Uuid::NAMESPACE_DNS, machine_id.as_bytes()),
        }
    }
}

impl Default for Installation {
    fn default() -> Self {
        Self::new()
    }
}
