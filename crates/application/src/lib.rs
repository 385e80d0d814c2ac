//! Fabric DNS Application Layer
pub mod matcher;
pub mod ports;
pub mod use_cases;

pub use matcher::match_records;
pub use ports::{Lookup, RecordSource, RefreshOutcome, SnapshotRefresh};
pub use use_cases::{Resolution, ResolveQueryUseCase};
