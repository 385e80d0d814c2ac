use crate::fqdn::Fqdn;
use crate::zone::{FallthroughZones, Zone, ZoneKind, ZoneSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZonesConfig {
    /// Apex of the zone served from the topology database.
    #[serde(default = "default_dynamic_zone")]
    pub dynamic: String,

    /// Apex of the zone served from the static bootstrap file.
    #[serde(default = "default_bootstrap_zone")]
    pub bootstrap: String,

    /// Zones for which an unanswered query is delegated to the next handler
    /// instead of returning NXDOMAIN. An explicitly-empty list in config
    /// means no fallthrough; `["."]` means fallthrough everywhere.
    #[serde(default)]
    pub fallthrough: Vec<String>,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            dynamic: default_dynamic_zone(),
            bootstrap: default_bootstrap_zone(),
            fallthrough: Vec::new(),
        }
    }
}

impl ZonesConfig {
    pub fn dynamic_apex(&self) -> Fqdn {
        Fqdn::from_name(&self.dynamic)
    }

    pub fn bootstrap_apex(&self) -> Fqdn {
        Fqdn::from_name(&self.bootstrap)
    }

    /// The authoritative zones, bootstrap first so the longer apex wins ties
    /// by specificity rather than ordering.
    pub fn zone_set(&self) -> ZoneSet {
        ZoneSet::new(vec![
            Zone::new(ZoneKind::Dynamic, self.dynamic_apex()),
            Zone::new(ZoneKind::Bootstrap, self.bootstrap_apex()),
        ])
    }

    pub fn fallthrough_set(&self) -> FallthroughZones {
        FallthroughZones::new(self.fallthrough.iter().map(|z| Fqdn::from_name(z)).collect())
    }
}

fn default_dynamic_zone() -> String {
    "fabric.internal".to_string()
}

fn default_bootstrap_zone() -> String {
    "bootstrap.fabric.internal".to_string()
}
