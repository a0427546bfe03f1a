//! geomx-dns Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_request;
pub mod errors;
pub mod gateway;
pub mod location;
pub mod matcher;
pub mod response_status;

pub use config::{CliOverrides, Config};
pub use dns_query::DnsQuery;
pub use dns_record::{MxAnswer, MxExchange, RecordClass, RecordType};
pub use dns_request::{DnsRequest, TransportClass};
pub use errors::DomainError;
pub use gateway::GatewayTable;
pub use location::LocationCode;
pub use matcher::{DomainMatcher, SkipList};
pub use response_status::ResponseStatus;
