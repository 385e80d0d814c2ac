mod synthesis;

pub use synthesis::{build_cluster_records, build_node_records};

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use fabric_dns_application::match_records;
use fabric_dns_application::ports::{Lookup, RecordSource};
use fabric_dns_domain::config::TopologyConfig;
use fabric_dns_domain::{
    ClusterMemberRow, DomainError, Fqdn, NodeAddressRow, QueryType, Record, RoleCatalog,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Live nodes are those with a heartbeat inside the last 60 seconds; the
/// short record TTL mirrors this window.
const NODE_RECORDS_QUERY: &str = r#"SELECT
    node_addresses.node_id,
    HOST(node_addresses.address) AS address,
    FAMILY(node_addresses.address)::text AS address_family,
    node_addresses.is_default,
    COALESCE(ARRAY_REMOVE(ARRAY_AGG(node_address_roles.role), NULL), ARRAY[]::text[]) AS roles
FROM node_addresses
    INNER JOIN nodes ON nodes.id = node_addresses.node_id
    LEFT JOIN node_address_roles ON node_addresses.id = node_address_roles.node_address_id
WHERE
    nodes.alive = true
    AND nodes.last_seen >= NOW() - INTERVAL '60 seconds'
GROUP BY
    node_addresses.node_id,
    address,
    address_family,
    node_addresses.is_default"#;

const CLUSTER_RECORDS_QUERY: &str = r#"SELECT
    clusters.id AS cluster_id,
    clusters.leader_id,
    nodes.id AS node_id,
    HOST(node_addresses.address) AS address,
    FAMILY(node_addresses.address)::text AS address_family
FROM nodes
    INNER JOIN clusters ON nodes.cluster_id = clusters.id
    INNER JOIN node_addresses
        ON node_addresses.node_id = nodes.id AND node_addresses.is_default
WHERE
    nodes.alive = true
    AND nodes.last_seen >= NOW() - INTERVAL '60 seconds'"#;

/// Database-backed record source for the dynamic zone. Holds no record
/// cache: every lookup reloads from the store, trading query latency for
/// correctness over the liveness window.
pub struct PgTopologySource {
    config: TopologyConfig,
    zone: Fqdn,
    catalog: RoleCatalog,
    pool: ArcSwapOption<PgPool>,
    /// Throttles reconnect attempts while the store is down.
    last_connect_attempt: Mutex<Option<Instant>>,
}

impl PgTopologySource {
    pub fn new(config: TopologyConfig, zone: Fqdn) -> Self {
        let catalog = config.role_catalog();
        Self {
            config,
            zone,
            catalog,
            pool: ArcSwapOption::const_empty(),
            last_connect_attempt: Mutex::new(None),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.pool.load().is_some()
    }

    /// Establish the connection pool. Idempotent; a repeat call inside the
    /// cooldown window is a no-op so a down store cannot trigger reconnect
    /// storms. Only a pool that passes a bounded liveness probe is
    /// installed.
    pub async fn connect(&self) {
        if self.is_connected() {
            return;
        }
        {
            let mut last = self
                .last_connect_attempt
                .lock()
                .expect("connect throttle lock poisoned");
            let cooldown = Duration::from_secs(self.config.reconnect_cooldown_secs);
            if let Some(at) = *last {
                if at.elapsed() < cooldown {
                    return;
                }
            }
            *last = Some(Instant::now());
        }

        if self.config.datasource.is_empty() {
            warn!("topology: no datasource configured, skipping database connection");
            return;
        }

        debug!("topology: opening connection pool");
        let pool = match PgPoolOptions::new()
            .max_connections(self.config.max_connections)
            .min_connections(self.config.min_connections)
            .max_lifetime(Duration::from_secs(self.config.max_lifetime_secs))
            .connect_lazy(&self.config.datasource)
        {
            Ok(pool) => pool,
            Err(e) => {
                error!(error = %e, "topology: failed to open connection pool");
                return;
            }
        };

        // Bounded probe: a hung store must never stall the serving path.
        let probe_timeout = Duration::from_secs(self.config.connect_timeout_secs);
        match timeout(probe_timeout, sqlx::query("SELECT 1").execute(&pool)).await {
            Ok(Ok(_)) => {
                self.pool.store(Some(Arc::new(pool)));
                info!("topology: database connection established");
            }
            Ok(Err(e)) => {
                warn!(error = %e, "topology: liveness probe failed");
                pool.close().await;
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.config.connect_timeout_secs,
                    "topology: liveness probe timed out"
                );
                pool.close().await;
            }
        }
    }

    /// Release the pool. Safe to call when never connected.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.swap(None) {
            info!("topology: closing database connection");
            pool.close().await;
        }
    }

    async fn load_records(&self) -> Result<Vec<Record>, DomainError> {
        let Some(pool) = self.pool.load_full() else {
            return Err(DomainError::NotInitialized);
        };

        let node_rows = self.fetch_node_rows(&pool).await?;
        let mut records =
            build_node_records(&node_rows, &self.catalog, &self.zone, self.config.record_ttl)?;

        let cluster_rows = self.fetch_cluster_rows(&pool).await?;
        records.extend(build_cluster_records(
            &cluster_rows,
            &self.zone,
            self.config.record_ttl,
        )?);

        debug!(records = records.len(), "topology: loaded records");
        Ok(records)
    }

    async fn fetch_node_rows(&self, pool: &PgPool) -> Result<Vec<NodeAddressRow>, DomainError> {
        let rows: Vec<(String, String, String, bool, Vec<String>)> =
            sqlx::query_as(NODE_RECORDS_QUERY)
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    error!(error = %e, "topology: failed to query node records");
                    DomainError::QueryFailed(e.to_string())
                })?;

        Ok(rows
            .into_iter()
            .map(|(node_id, address, family, is_default, roles)| NodeAddressRow {
                node_id,
                address,
                family,
                is_default,
                roles,
            })
            .collect())
    }

    async fn fetch_cluster_rows(
        &self,
        pool: &PgPool,
    ) -> Result<Vec<ClusterMemberRow>, DomainError> {
        let rows: Vec<(String, Option<String>, String, String, String)> =
            sqlx::query_as(CLUSTER_RECORDS_QUERY)
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    error!(error = %e, "topology: failed to query cluster records");
                    DomainError::QueryFailed(e.to_string())
                })?;

        Ok(rows
            .into_iter()
            .map(
                |(cluster_id, leader_id, node_id, address, family)| ClusterMemberRow {
                    cluster_id,
                    leader_id: leader_id.unwrap_or_default(),
                    node_id,
                    address,
                    family,
                },
            )
            .collect())
    }
}

#[async_trait]
impl RecordSource for PgTopologySource {
    async fn lookup_records(&self, name: &Fqdn, qtype: QueryType) -> Result<Lookup, DomainError> {
        if !self.is_connected() {
            self.connect().await;
        }

        let records = self.load_records().await.map_err(|e| {
            warn!(name = %name, error = %e, "topology: lookup failed");
            e
        })?;
        Ok(match_records(&records, name, qtype))
    }
}
