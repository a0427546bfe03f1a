use super::table::InMemoryZoneTable;
use geomx_dns_application::ports::{ZoneAuthority, ZoneCatalog};
use geomx_dns_domain::{DomainError, LocationCode};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Builds the location -> zone-table catalog from a directory of zone
/// files at startup. A missing or unreadable directory, an unparseable
/// zone file, or the absence of a default-location zone are all fatal.
pub struct ZoneDirectoryLoader {
    glob: bool,
}

impl ZoneDirectoryLoader {
    pub fn new(glob: bool) -> Self {
        Self { glob }
    }

    pub fn load(&self, directory: &Path) -> Result<ZoneCatalog, DomainError> {
        let entries = fs::read_dir(directory).map_err(|e| {
            DomainError::ZoneLoad(format!(
                "cannot read zone directory {}: {}",
                directory.display(),
                e
            ))
        })?;

        let mut zones: HashMap<LocationCode, Arc<dyn ZoneAuthority>> = HashMap::new();

        for entry in entries {
            let entry = entry.map_err(|e| DomainError::ZoneLoad(e.to_string()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_string();
            let location = location_from_filename(&file_name);

            let contents = fs::read_to_string(&path).map_err(|e| {
                DomainError::ZoneLoad(format!("cannot read zone file {}: {}", path.display(), e))
            })?;
            let table = InMemoryZoneTable::parse(&contents, self.glob)
                .map_err(|e| DomainError::ZoneLoad(format!("{}: {}", path.display(), e)))?;

            info!(
                zone_file = %file_name,
                location = %location,
                records = table.record_count(),
                "Zone file loaded"
            );

            zones.insert(location, Arc::new(table));
        }

        ZoneCatalog::new(zones)
    }
}

/// The location code is the filename suffix after the last `-`, recognized
/// only when it is exactly two ASCII letters (e.g. `oversea.example.com-CN`).
/// Files without a recognizable suffix belong to the reserved default
/// location.
pub fn location_from_filename(name: &str) -> LocationCode {
    match name.rsplit_once('-') {
        Some((_, suffix)) if suffix.len() == 2 && suffix.chars().all(|c| c.is_ascii_alphabetic()) => {
            LocationCode::new(suffix)
        }
        _ => LocationCode::reserved_default(),
    }
}
