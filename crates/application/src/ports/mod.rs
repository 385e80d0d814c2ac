mod record_source;
mod snapshot_refresh;

pub use record_source::{Lookup, RecordSource};
pub use snapshot_refresh::{RefreshOutcome, SnapshotRefresh};
