mod data;
mod record_type;

pub use data::RecordData;
pub use record_type::{QueryType, RecordType};

use crate::fqdn::Fqdn;
use std::net::IpAddr;

/// Canonical answer unit. Constructed fresh on every lookup cycle (dynamic
/// source) or file reload (static source), never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub fqdn: Fqdn,
    pub ttl: u32,
    pub data: RecordData,
}

impl Record {
    pub fn new(fqdn: Fqdn, ttl: u32, data: RecordData) -> Self {
        Self { fqdn, ttl, data }
    }

    /// Address record with the type picked by the IP family.
    pub fn address(fqdn: Fqdn, ip: IpAddr, ttl: u32) -> Self {
        let data = match ip {
            IpAddr::V4(v4) => RecordData::A(v4),
            IpAddr::V6(v6) => RecordData::Aaaa(v6),
        };
        Self { fqdn, ttl, data }
    }

    pub fn cname(fqdn: Fqdn, target: Fqdn, ttl: u32) -> Self {
        Self {
            fqdn,
            ttl,
            data: RecordData::Cname(target),
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }
}
