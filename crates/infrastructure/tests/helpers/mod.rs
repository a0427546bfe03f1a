mod upstream_mock;

pub use upstream_mock::{MockAnswer, MockUpstream};
