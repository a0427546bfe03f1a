use crate::dns::forwarding::RecordTypeMapper;
use geomx_dns_application::ports::{ZoneAuthority, ZoneLookup};
use geomx_dns_domain::{DnsQuery, DomainError, DomainMatcher, ResponseStatus};
use hickory_proto::rr::{Name, Record, RecordType as HickoryRecordType};
use hickory_proto::serialize::txt::Parser;

/// One parsed zone file held in memory for the process lifetime.
///
/// Lookups walk the record list: the owner name must match the query name
/// (equality, or glob when the zone was loaded in glob mode) and the record
/// type must match the query type. CNAME records always match, and an ANY
/// query matches every type. No match at all answers NXDOMAIN.
pub struct InMemoryZoneTable {
    records: Vec<ZoneRecord>,
}

struct ZoneRecord {
    matcher: DomainMatcher,
    record: Record,
}

impl InMemoryZoneTable {
    pub fn parse(input: &str, glob: bool) -> Result<Self, DomainError> {
        let parser = Parser::new(input, None, Some(Name::root()));
        let (_origin, record_sets) = parser
            .parse()
            .map_err(|e| DomainError::ZoneLoad(format!("zone parse error: {}", e)))?;

        let mut records = Vec::new();
        for (_key, set) in record_sets {
            for record in set.records_without_rrsigs() {
                let owner = record.name().to_utf8();
                let matcher = if glob {
                    DomainMatcher::compile(&owner)
                } else {
                    DomainMatcher::exact(&owner)
                };
                records.push(ZoneRecord {
                    matcher,
                    record: record.clone(),
                });
            }
        }

        Ok(Self { records })
    }
}

impl ZoneAuthority for InMemoryZoneTable {
    fn lookup(&self, query: &DnsQuery) -> ZoneLookup {
        let qtype = RecordTypeMapper::to_hickory(query.record_type);

        let records: Vec<Record> = self
            .records
            .iter()
            .filter(|zone_record| zone_record.matcher.matches(&query.domain))
            .filter(|zone_record| {
                let rtype = zone_record.record.record_type();
                rtype == qtype
                    || rtype == HickoryRecordType::CNAME
                    || qtype == HickoryRecordType::ANY
            })
            .map(|zone_record| zone_record.record.clone())
            .collect();

        if records.is_empty() {
            return ZoneLookup::nxdomain();
        }
        ZoneLookup {
            status: ResponseStatus::NoError,
            records,
        }
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }
}
