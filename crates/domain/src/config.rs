mod cache;
mod errors;
mod geo;
mod intercept;
mod logging;
mod root;
mod server;
mod upstream;
mod zones;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use geo::GeoConfig;
pub use intercept::InterceptConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
pub use zones::ZonesConfig;
