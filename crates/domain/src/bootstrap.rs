use serde::Deserialize;
use std::collections::BTreeMap;

/// The static bootstrap file written out-of-band before a node joins a
/// cluster. Only `nodes` drives record synthesis; the remaining fields are
/// logged at refresh for operator visibility. `version`, `cluster_id` and
/// `datacenter_id` are expected to change together with the file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BootstrapSnapshot {
    #[serde(default)]
    pub version: String,

    /// node id → IP address string.
    #[serde(default)]
    pub nodes: BTreeMap<String, String>,

    #[serde(default)]
    pub cluster_id: String,

    #[serde(default)]
    pub datacenter_id: String,

    #[serde(default)]
    pub joining_to_cluster: bool,
}
