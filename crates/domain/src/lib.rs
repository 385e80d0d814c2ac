//! Fabric DNS Domain Layer
pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod fqdn;
pub mod record;
pub mod topology;
pub mod zone;

pub use bootstrap::BootstrapSnapshot;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use fqdn::Fqdn;
pub use record::{QueryType, Record, RecordData, RecordType};
pub use topology::{ClusterMemberRow, NodeAddressRow, RoleCatalog};
pub use zone::{FallthroughZones, Zone, ZoneKind, ZoneSet};
