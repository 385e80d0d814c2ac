use crate::topology::RoleCatalog;
use serde::{Deserialize, Serialize};

/// Topology database settings. The datasource is a Postgres connection
/// string; everything else tunes the pool and the synthesized records.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopologyConfig {
    #[serde(default)]
    pub datasource: String,

    /// TTL stamped on dynamic records. Short, matching the 60-second node
    /// liveness window.
    #[serde(default = "default_record_ttl")]
    pub record_ttl: u32,

    /// Bound on the liveness probe during connect. A hung store must never
    /// stall the serving path.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Minimum gap between reconnect attempts while the store is down.
    #[serde(default = "default_reconnect_cooldown_secs")]
    pub reconnect_cooldown_secs: u64,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,

    /// Well-known role names; roles not explicitly assigned to a node fall
    /// back to its default address.
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            datasource: String::new(),
            record_ttl: default_record_ttl(),
            connect_timeout_secs: default_connect_timeout_secs(),
            reconnect_cooldown_secs: default_reconnect_cooldown_secs(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            max_lifetime_secs: default_max_lifetime_secs(),
            roles: default_roles(),
        }
    }
}

impl TopologyConfig {
    pub fn role_catalog(&self) -> RoleCatalog {
        RoleCatalog::new(self.roles.clone())
    }
}

fn default_record_ttl() -> u32 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    2
}

fn default_reconnect_cooldown_secs() -> u64 {
    2
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    5
}

fn default_max_lifetime_secs() -> u64 {
    60
}

fn default_roles() -> Vec<String> {
    RoleCatalog::default().iter().map(String::from).collect()
}
