use async_trait::async_trait;
use fabric_dns_domain::{DomainError, Fqdn, QueryType, Record};

/// Result of a name/type lookup against one record source.
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    pub records: Vec<Record>,
    /// True when any record matched the name regardless of type. Lets the
    /// caller tell NXDOMAIN (name absent) from NODATA (name present, no
    /// record of the requested type).
    pub name_exists: bool,
}

impl Lookup {
    pub fn new(records: Vec<Record>, name_exists: bool) -> Self {
        Self {
            records,
            name_exists,
        }
    }
}

/// A record source serving one authoritative zone.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn lookup_records(&self, name: &Fqdn, qtype: QueryType) -> Result<Lookup, DomainError>;
}
