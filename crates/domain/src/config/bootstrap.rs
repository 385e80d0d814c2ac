use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BootstrapConfig {
    /// Path to the static bootstrap file.
    #[serde(default = "default_path")]
    pub path: String,

    /// Seconds between file refreshes. Zero disables the background loop;
    /// the file is read exactly once at startup.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// TTL stamped on bootstrap records.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            refresh_interval_secs: default_refresh_interval_secs(),
            ttl: default_ttl(),
        }
    }
}

fn default_path() -> String {
    "/var/lib/fabric/bootstrap.json".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    5
}

fn default_ttl() -> u32 {
    10
}
