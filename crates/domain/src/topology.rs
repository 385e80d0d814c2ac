/// One row per (node, address) pair from the topology store. `family` and
/// `address` arrive as text; they are validated during record synthesis, not
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAddressRow {
    pub node_id: String,
    pub address: String,
    /// Address family code as reported by the store: "4" or "6".
    pub family: String,
    pub is_default: bool,
    pub roles: Vec<String>,
}

/// One row per live cluster member's default address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterMemberRow {
    pub cluster_id: String,
    pub leader_id: String,
    pub node_id: String,
    pub address: String,
    pub family: String,
}

/// Well-known role names. Roles not explicitly assigned on any of a node's
/// addresses fall back to the node's default address, so every catalog role
/// resolves for every node that has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCatalog {
    roles: Vec<String>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<String>) -> Self {
        Self { roles }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self {
            roles: ["mgmt", "storage", "migration", "backup"]
                .map(String::from)
                .to_vec(),
        }
    }
}
