use async_trait::async_trait;
use fabric_dns_application::match_records;
use fabric_dns_application::ports::{Lookup, RecordSource, RefreshOutcome, SnapshotRefresh};
use fabric_dns_domain::{BootstrapSnapshot, DomainError, Fqdn, QueryType, Record};
use std::fs::File;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::SystemTime;
use tracing::{debug, info, warn};

const FALLBACK_TTL: u32 = 10;

/// File-backed record source for the bootstrap zone. The file is re-read by
/// a background job; change detection is an optimistic (size, mtime) pair,
/// not a content hash — the file writer is trusted to bump both together
/// with the content.
pub struct BootstrapFileSource {
    path: PathBuf,
    zone: Fqdn,
    ttl: u32,
    cache: RwLock<SnapshotCache>,
}

#[derive(Default)]
struct SnapshotCache {
    size: u64,
    mtime: Option<SystemTime>,
    records: Vec<Record>,
}

impl BootstrapFileSource {
    pub fn new(path: impl Into<PathBuf>, zone: Fqdn, ttl: u32) -> Self {
        let ttl = if ttl == 0 {
            warn!("bootstrap: TTL of 0 configured, defaulting to {FALLBACK_TTL} seconds");
            FALLBACK_TTL
        } else {
            ttl
        };
        Self {
            path: path.into(),
            zone,
            ttl,
            cache: RwLock::new(SnapshotCache::default()),
        }
    }

    /// One refresh pass. A transient open failure keeps the previous cache
    /// serving (stale-but-available); an unchanged (size, mtime) pair skips
    /// the decode entirely.
    fn refresh_now(&self) -> Result<RefreshOutcome, DomainError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "bootstrap: failed to open file");
                return Ok(RefreshOutcome::Unchanged);
            }
        };

        let meta = file
            .metadata()
            .map_err(|e| DomainError::IoError(e.to_string()))?;
        let size = meta.len();
        let mtime = meta.modified().ok();

        {
            let cache = self.cache.read().expect("bootstrap cache lock poisoned");
            if cache.size == size && cache.mtime == mtime && cache.mtime.is_some() {
                return Ok(RefreshOutcome::Unchanged);
            }
        }

        let snapshot: BootstrapSnapshot =
            serde_json::from_reader(file).map_err(|e| DomainError::ParseError(e.to_string()))?;
        let records = self.build_records(&snapshot);
        let count = records.len();

        let mut cache = self.cache.write().expect("bootstrap cache lock poisoned");
        cache.records = records;
        cache.size = size;
        cache.mtime = mtime;
        drop(cache);

        info!(
            records = count,
            version = %snapshot.version,
            cluster = %snapshot.cluster_id,
            joining = snapshot.joining_to_cluster,
            path = %self.path.display(),
            "bootstrap: refreshed record cache"
        );
        Ok(RefreshOutcome::Reloaded { records: count })
    }

    fn build_records(&self, snapshot: &BootstrapSnapshot) -> Vec<Record> {
        let mut records = Vec::with_capacity(snapshot.nodes.len());
        for (node_id, ip_str) in &snapshot.nodes {
            let Ok(ip) = ip_str.parse::<IpAddr>() else {
                warn!(node = %node_id, ip = %ip_str, "bootstrap: skipping node with invalid IP");
                continue;
            };
            let fqdn = match self.zone.prepend_label(node_id) {
                Ok(fqdn) => fqdn,
                Err(_) => {
                    warn!(node = %node_id, "bootstrap: skipping node with invalid id");
                    continue;
                }
            };
            records.push(Record::address(fqdn, ip, self.ttl));
        }
        records
    }
}

#[async_trait]
impl SnapshotRefresh for BootstrapFileSource {
    async fn refresh(&self) -> Result<RefreshOutcome, DomainError> {
        self.refresh_now()
    }
}

#[async_trait]
impl RecordSource for BootstrapFileSource {
    async fn lookup_records(&self, name: &Fqdn, qtype: QueryType) -> Result<Lookup, DomainError> {
        let cache = self.cache.read().expect("bootstrap cache lock poisoned");
        Ok(match_records(&cache.records, name, qtype))
    }
}
