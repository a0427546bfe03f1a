mod loader;
mod table;

pub use loader::{location_from_filename, ZoneDirectoryLoader};
pub use table::InMemoryZoneTable;
