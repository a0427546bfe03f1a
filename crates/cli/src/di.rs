use geomx_dns_application::use_cases::{
    InterceptMxUseCase, RouteQueryUseCase, SelectZoneUseCase,
};
use geomx_dns_domain::Config;
use geomx_dns_infrastructure::cache::RedisAnswerCache;
use geomx_dns_infrastructure::dns::forwarding::UpstreamForwarder;
use geomx_dns_infrastructure::geo::MaxmindGeoLookup;
use geomx_dns_infrastructure::zone::ZoneDirectoryLoader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Adapter construction and use-case wiring. Everything built here is
/// immutable for the process lifetime and shared by reference across the
/// listeners.
pub struct Services {
    pub router: Option<Arc<RouteQueryUseCase>>,
    pub zone_selector: Option<Arc<SelectZoneUseCase>>,
}

impl Services {
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        let geo = Arc::new(MaxmindGeoLookup::open(
            &config.geo.database,
            config.geo.default_location_code(),
        )?);

        let router = if config.intercept.enabled {
            let upstream = Arc::new(UpstreamForwarder::new(
                config.upstream.socket_addr()?,
                Duration::from_millis(config.upstream.timeout_ms),
            ));
            let cache = Arc::new(RedisAnswerCache::connect(&config.cache.server).await?);
            let gateways = Arc::new(config.intercept.build_gateway_table()?);
            let skip = Arc::new(config.intercept.build_skip_list());

            info!(
                gateways = gateways.len(),
                default_gateway = %gateways.default_gateway(),
                skip_patterns = config.intercept.skip.len(),
                "Intercept pipeline wired"
            );

            let intercept = Arc::new(InterceptMxUseCase::new(
                upstream.clone(),
                geo.clone(),
                cache,
                gateways,
            ));
            Some(Arc::new(RouteQueryUseCase::new(intercept, upstream, skip)))
        } else {
            None
        };

        let zone_selector = if config.zones.enabled {
            let catalog = Arc::new(
                ZoneDirectoryLoader::new(config.zones.glob)
                    .load(Path::new(&config.zones.directory))?,
            );
            info!(tables = catalog.table_count(), "Zone catalog loaded");
            Some(Arc::new(SelectZoneUseCase::new(geo.clone(), catalog)))
        } else {
            None
        };

        Ok(Self {
            router,
            zone_selector,
        })
    }
}
