mod answer_cache;
mod geo_lookup;
mod upstream_resolver;
mod zone_authority;

pub use answer_cache::{AnswerCache, CacheKey};
pub use geo_lookup::GeoLookup;
pub use upstream_resolver::{AnswerView, UpstreamReply, UpstreamResolver};
pub use zone_authority::{ZoneAuthority, ZoneCatalog, ZoneLookup};
