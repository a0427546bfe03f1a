//! geomx-dns Application Layer
//!
//! Ports (traits over external collaborators) and the use cases that drive
//! them: MX interception, query routing, and geo zone selection.
pub mod ports;
pub mod use_cases;

pub use ports::{AnswerCache, CacheKey, GeoLookup, UpstreamResolver, ZoneAuthority, ZoneCatalog};
pub use use_cases::{InterceptMxUseCase, RouteQueryUseCase, SelectZoneUseCase};
