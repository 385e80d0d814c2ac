use super::RecordType;
use crate::fqdn::Fqdn;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Record payload, one variant per record kind. Carrying only the fields a
/// kind needs makes impossible combinations (an A record with an SRV target)
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(Fqdn),
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: Fqdn,
    },
    Txt(String),
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::Aaaa(_) => RecordType::AAAA,
            RecordData::Cname(_) => RecordType::CNAME,
            RecordData::Srv { .. } => RecordType::SRV,
            RecordData::Txt(_) => RecordType::TXT,
        }
    }
}
