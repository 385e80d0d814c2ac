use crate::ports::RecordSource;
use fabric_dns_domain::{DomainError, FallthroughZones, Fqdn, QueryType, Record, ZoneKind, ZoneSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// What the serving layer should do with a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Authoritative answer with these records.
    Answer(Vec<Record>),
    /// Name exists in the zone, no record of the requested type: NOERROR
    /// with an empty answer section.
    NoData,
    /// Name absent from an authoritative zone with fallthrough disabled.
    NxDomain,
    /// Not authoritative for the name (or fallthrough permitted): hand the
    /// query to the next handler in the chain.
    Delegate,
}

/// Zone router and response assembler. Maps each authoritative zone to its
/// record source and turns lookup results into a serving decision.
///
/// Policy: zone-exclusive dispatch. Exactly one source is consulted per
/// query, so a name-exists-with-wrong-type lookup can surface as NODATA
/// instead of being folded into NXDOMAIN.
pub struct ResolveQueryUseCase {
    zones: ZoneSet,
    fallthrough: FallthroughZones,
    dynamic: Arc<dyn RecordSource>,
    bootstrap: Arc<dyn RecordSource>,
}

impl ResolveQueryUseCase {
    pub fn new(
        zones: ZoneSet,
        fallthrough: FallthroughZones,
        dynamic: Arc<dyn RecordSource>,
        bootstrap: Arc<dyn RecordSource>,
    ) -> Self {
        Self {
            zones,
            fallthrough,
            dynamic,
            bootstrap,
        }
    }

    fn source_for(&self, kind: ZoneKind) -> &Arc<dyn RecordSource> {
        match kind {
            ZoneKind::Dynamic => &self.dynamic,
            ZoneKind::Bootstrap => &self.bootstrap,
        }
    }

    #[instrument(skip(self), fields(name = %name, qtype = %qtype))]
    pub async fn execute(
        &self,
        name: &Fqdn,
        qtype: QueryType,
    ) -> Result<Resolution, DomainError> {
        let Some(zone) = self.zones.match_zone(name) else {
            debug!("no authoritative zone, delegating");
            return Ok(Resolution::Delegate);
        };

        let lookup = self
            .source_for(zone.kind)
            .lookup_records(name, qtype)
            .await?;

        if !lookup.records.is_empty() {
            debug!(zone = zone.kind.as_str(), answers = lookup.records.len(), "answering");
            return Ok(Resolution::Answer(lookup.records));
        }
        if lookup.name_exists {
            debug!(zone = zone.kind.as_str(), "name exists without requested type (NODATA)");
            return Ok(Resolution::NoData);
        }

        if self.fallthrough.matches(name) {
            debug!(zone = zone.kind.as_str(), "name absent, fallthrough permitted");
            return Ok(Resolution::Delegate);
        }
        debug!(zone = zone.kind.as_str(), "name absent (NXDOMAIN)");
        Ok(Resolution::NxDomain)
    }
}
