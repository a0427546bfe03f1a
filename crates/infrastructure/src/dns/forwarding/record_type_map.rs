//! Centralized mapping between `geomx_dns_domain::RecordType` and
//! `hickory_proto::rr::RecordType`.
//!
//! The mapping is total in both directions: anything without a named
//! variant travels as its numeric type code so it can still be proxied.

use geomx_dns_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::SRV => HickoryRecordType::SRV,
            RecordType::SOA => HickoryRecordType::SOA,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::Other(code) => HickoryRecordType::from(code),
        }
    }

    /// Convert hickory RecordType → domain RecordType (for incoming queries)
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        match hickory_type {
            HickoryRecordType::A => RecordType::A,
            HickoryRecordType::AAAA => RecordType::AAAA,
            HickoryRecordType::CNAME => RecordType::CNAME,
            HickoryRecordType::MX => RecordType::MX,
            HickoryRecordType::TXT => RecordType::TXT,
            HickoryRecordType::PTR => RecordType::PTR,
            HickoryRecordType::SRV => RecordType::SRV,
            HickoryRecordType::SOA => RecordType::SOA,
            HickoryRecordType::NS => RecordType::NS,
            other => RecordType::Other(u16::from(other)),
        }
    }
}
