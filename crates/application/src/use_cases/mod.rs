mod intercept_mx;
mod route_query;
mod select_zone;

pub use intercept_mx::{InterceptMxUseCase, MxResolution};
pub use route_query::{RouteQueryUseCase, RoutedReply};
pub use select_zone::SelectZoneUseCase;
