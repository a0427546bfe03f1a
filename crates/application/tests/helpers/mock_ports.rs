#![allow(dead_code)]

use async_trait::async_trait;
use geomx_dns_application::ports::{
    AnswerCache, AnswerView, CacheKey, GeoLookup, UpstreamReply, UpstreamResolver, ZoneAuthority,
    ZoneLookup,
};
use geomx_dns_domain::{
    DnsQuery, DomainError, LocationCode, MxAnswer, RecordClass, RecordType, ResponseStatus,
    TransportClass,
};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::{A, MX};
use hickory_proto::rr::{Name, RData, Record};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Build a NOERROR reply carrying one MX answer.
pub fn mx_reply(domain: &str, preference: u16, exchange: &str, ttl: u32) -> UpstreamReply {
    let owner = Name::from_str(&format!("{}.", domain.trim_end_matches('.'))).unwrap();
    let target = Name::from_str(&format!("{}.", exchange.trim_end_matches('.'))).unwrap();
    let record = Record::from_rdata(owner, ttl, RData::MX(MX::new(preference, target)));
    UpstreamReply {
        status: ResponseStatus::NoError,
        rcode: ResponseCode::NoError,
        answers: vec![record],
        authorities: vec![],
        additionals: vec![],
        first_answer: Some(AnswerView {
            rdata: format!("{} {}", preference, exchange.trim_end_matches('.')),
            ttl,
            class: RecordClass::In,
        }),
        protocol_used: "UDP",
    }
}

/// Build a NOERROR reply carrying one A answer.
pub fn a_reply(domain: &str, address: Ipv4Addr, ttl: u32) -> UpstreamReply {
    let owner = Name::from_str(&format!("{}.", domain.trim_end_matches('.'))).unwrap();
    let record = Record::from_rdata(owner, ttl, RData::A(A(address)));
    UpstreamReply {
        status: ResponseStatus::NoError,
        rcode: ResponseCode::NoError,
        answers: vec![record],
        authorities: vec![],
        additionals: vec![],
        first_answer: Some(AnswerView {
            rdata: address.to_string(),
            ttl,
            class: RecordClass::In,
        }),
        protocol_used: "UDP",
    }
}

/// Build a reply with an error status and no answers.
pub fn error_reply(status: ResponseStatus, rcode: ResponseCode) -> UpstreamReply {
    UpstreamReply {
        status,
        rcode,
        answers: vec![],
        authorities: vec![],
        additionals: vec![],
        first_answer: None,
        protocol_used: "UDP",
    }
}

/// Build a NOERROR reply with no answers (NODATA).
pub fn nodata_reply() -> UpstreamReply {
    error_reply(ResponseStatus::NoError, ResponseCode::NoError)
}

pub struct MockUpstreamResolver {
    replies: Mutex<HashMap<(String, RecordType), UpstreamReply>>,
    calls: Mutex<Vec<(String, RecordType, TransportClass)>>,
    call_count: AtomicU64,
    fail_all: Mutex<bool>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            call_count: AtomicU64::new(0),
            fail_all: Mutex::new(false),
        }
    }

    pub fn set_reply(&self, domain: &str, record_type: RecordType, reply: UpstreamReply) {
        self.replies
            .lock()
            .unwrap()
            .insert((domain.to_string(), record_type), reply);
    }

    pub fn set_fail_all(&self, fail: bool) {
        *self.fail_all.lock().unwrap() = fail;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn calls(&self) -> Vec<(String, RecordType, TransportClass)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn forward(
        &self,
        query: &DnsQuery,
        transport: TransportClass,
    ) -> Result<UpstreamReply, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.calls
            .lock()
            .unwrap()
            .push((query.domain.to_string(), query.record_type, transport));

        if *self.fail_all.lock().unwrap() {
            return Err(DomainError::UpstreamTimeout {
                server: "mock:53".to_string(),
                timeout_ms: 5000,
            });
        }

        self.replies
            .lock()
            .unwrap()
            .get(&(query.domain.to_string(), query.record_type))
            .cloned()
            .ok_or_else(|| DomainError::UpstreamTransport {
                server: "mock:53".to_string(),
                reason: format!("no scripted reply for {} {}", query.domain, query.record_type),
            })
    }
}

pub struct MockGeoLookup {
    locations: Mutex<HashMap<String, LocationCode>>,
    default_location: LocationCode,
    call_count: AtomicU64,
    lookups: Mutex<Vec<String>>,
}

impl MockGeoLookup {
    pub fn new() -> Self {
        Self {
            locations: Mutex::new(HashMap::new()),
            default_location: LocationCode::reserved_default(),
            call_count: AtomicU64::new(0),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn set_location(&self, address: &str, location: LocationCode) {
        self.locations
            .lock()
            .unwrap()
            .insert(address.to_string(), location);
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl GeoLookup for MockGeoLookup {
    fn locate(&self, address: &str) -> LocationCode {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.lookups.lock().unwrap().push(address.to_string());
        self.locations
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_else(|| self.default_location.clone())
    }
}

pub struct MockAnswerCache {
    entries: Mutex<HashMap<String, MxAnswer>>,
    get_count: AtomicU64,
    set_count: AtomicU64,
    fail_gets: Mutex<bool>,
    fail_sets: Mutex<bool>,
    last_set_ttl: Mutex<Option<u32>>,
}

impl MockAnswerCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            get_count: AtomicU64::new(0),
            set_count: AtomicU64::new(0),
            fail_gets: Mutex::new(false),
            fail_sets: Mutex::new(false),
            last_set_ttl: Mutex::new(None),
        }
    }

    pub fn preload(&self, key: &CacheKey, answer: MxAnswer) {
        self.entries.lock().unwrap().insert(key.to_string(), answer);
    }

    pub fn stored(&self, key: &CacheKey) -> Option<MxAnswer> {
        self.entries.lock().unwrap().get(&key.to_string()).cloned()
    }

    pub fn set_fail_gets(&self, fail: bool) {
        *self.fail_gets.lock().unwrap() = fail;
    }

    pub fn set_fail_sets(&self, fail: bool) {
        *self.fail_sets.lock().unwrap() = fail;
    }

    pub fn get_count(&self) -> u64 {
        self.get_count.load(Ordering::Relaxed)
    }

    pub fn set_count(&self) -> u64 {
        self.set_count.load(Ordering::Relaxed)
    }

    pub fn last_set_ttl(&self) -> Option<u32> {
        *self.last_set_ttl.lock().unwrap()
    }
}

#[async_trait]
impl AnswerCache for MockAnswerCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<MxAnswer>, DomainError> {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        if *self.fail_gets.lock().unwrap() {
            return Err(DomainError::CacheUnavailable("mock get failure".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(&key.to_string()).cloned())
    }

    async fn set(
        &self,
        key: &CacheKey,
        answer: &MxAnswer,
        ttl_seconds: u32,
    ) -> Result<(), DomainError> {
        self.set_count.fetch_add(1, Ordering::Relaxed);
        if *self.fail_sets.lock().unwrap() {
            return Err(DomainError::CacheUnavailable("mock set failure".to_string()));
        }
        *self.last_set_ttl.lock().unwrap() = Some(ttl_seconds);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), answer.clone());
        Ok(())
    }
}

pub struct MockZoneAuthority {
    label: String,
    lookup_count: AtomicU64,
}

impl MockZoneAuthority {
    pub fn new(label: &str) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            lookup_count: AtomicU64::new(0),
        })
    }

    pub fn lookup_count(&self) -> u64 {
        self.lookup_count.load(Ordering::Relaxed)
    }
}

impl ZoneAuthority for MockZoneAuthority {
    fn lookup(&self, _query: &DnsQuery) -> ZoneLookup {
        self.lookup_count.fetch_add(1, Ordering::Relaxed);
        let owner = Name::from_str(&format!("{}.zone.test.", self.label)).unwrap();
        let record = Record::from_rdata(owner, 60, RData::A(A(Ipv4Addr::new(127, 0, 0, 1))));
        ZoneLookup {
            status: ResponseStatus::NoError,
            records: vec![record],
        }
    }

    fn record_count(&self) -> usize {
        1
    }
}
