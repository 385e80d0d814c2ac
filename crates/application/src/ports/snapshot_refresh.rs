use async_trait::async_trait;
use fabric_dns_domain::DomainError;

/// Outcome of one refresh pass over the bootstrap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// File unreadable or (size, mtime) unchanged; cache untouched.
    Unchanged,
    /// Cache replaced with this many records.
    Reloaded { records: usize },
}

/// Capability consumed by the background refresh job.
#[async_trait]
pub trait SnapshotRefresh: Send + Sync {
    async fn refresh(&self) -> Result<RefreshOutcome, DomainError>;
}
