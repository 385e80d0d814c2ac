use crate::fqdn::Fqdn;

/// The two record sources this server is authoritative for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    /// Served from the live topology database.
    Dynamic,
    /// Served from the static bootstrap file.
    Bootstrap,
}

impl ZoneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneKind::Dynamic => "dynamic",
            ZoneKind::Bootstrap => "bootstrap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub kind: ZoneKind,
    pub apex: Fqdn,
}

impl Zone {
    pub fn new(kind: ZoneKind, apex: Fqdn) -> Self {
        Self { kind, apex }
    }
}

/// Ordered set of authoritative zones with most-specific suffix matching.
#[derive(Debug, Clone, Default)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// Returns the zone with the longest apex that is a suffix of `name`,
    /// never a shorter apex when a longer one also matches.
    pub fn match_zone(&self, name: &Fqdn) -> Option<&Zone> {
        self.zones
            .iter()
            .filter(|zone| zone.apex.is_suffix_of(name))
            .max_by_key(|zone| zone.apex.label_count())
    }

}

/// Suffixes for which an unanswered query is delegated to the next handler
/// instead of answering NXDOMAIN.
#[derive(Debug, Clone, Default)]
pub struct FallthroughZones {
    suffixes: Vec<Fqdn>,
}

impl FallthroughZones {
    pub fn new(suffixes: Vec<Fqdn>) -> Self {
        Self { suffixes }
    }

    pub fn matches(&self, name: &Fqdn) -> bool {
        self.suffixes.iter().any(|suffix| suffix.is_suffix_of(name))
    }
}
