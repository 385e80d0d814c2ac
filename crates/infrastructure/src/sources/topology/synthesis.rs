use fabric_dns_domain::{
    ClusterMemberRow, DomainError, Fqdn, NodeAddressRow, Record, RoleCatalog,
};
use std::collections::{BTreeMap, HashSet};
use std::net::IpAddr;
use tracing::warn;

/// Default address of one node, used as the fallback target for catalog
/// roles without an explicit assignment and for the bare per-node name.
#[derive(Debug, Clone)]
struct DefaultAddress {
    address: String,
    family: String,
}

/// Expand raw topology rows into canonical records for the dynamic zone.
///
/// Per node: one `<node>-<role>.<zone>` record per assigned role, a
/// synthesized `<node>-<role>.<zone>` record on the default address for
/// every catalog role left unassigned, and the bare `<node>.<zone>` name for
/// the default address itself. Rows with unparseable IPs are skipped with a
/// warning; an unrecognized address family aborts the whole load, since it
/// signals a broken data contract rather than a transient glitch.
pub fn build_node_records(
    rows: &[NodeAddressRow],
    catalog: &RoleCatalog,
    zone: &Fqdn,
    ttl: u32,
) -> Result<Vec<Record>, DomainError> {
    let mut by_node: BTreeMap<&str, Vec<&NodeAddressRow>> = BTreeMap::new();
    let mut defaults: BTreeMap<&str, DefaultAddress> = BTreeMap::new();

    for row in rows {
        by_node.entry(&row.node_id).or_default().push(row);
        // At most one default per node; last-seen wins if the store ever
        // violates that.
        if row.is_default {
            defaults.insert(
                &row.node_id,
                DefaultAddress {
                    address: row.address.clone(),
                    family: row.family.clone(),
                },
            );
        }
    }

    let mut records = Vec::new();
    for (node_id, node_rows) in &by_node {
        let assigned: HashSet<&str> = node_rows
            .iter()
            .flat_map(|row| row.roles.iter().map(String::as_str))
            .collect();

        for row in node_rows {
            emit_role_records(
                &mut records,
                node_id,
                &row.address,
                &row.family,
                row.roles.iter().map(String::as_str),
                zone,
                ttl,
            )?;
        }

        if let Some(default) = defaults.get(node_id) {
            // Fallback: unassigned catalog roles resolve to the default
            // address.
            let missing = catalog.iter().filter(|role| !assigned.contains(role));
            emit_role_records(
                &mut records,
                node_id,
                &default.address,
                &default.family,
                missing,
                zone,
                ttl,
            )?;

            // Bare per-node name for the default address.
            if let Some(ip) = parse_row_ip(node_id, &default.address, &default.family)? {
                if let Ok(fqdn) = zone.prepend_label(node_id) {
                    records.push(Record::address(fqdn, ip, ttl));
                }
            }
        }
    }
    Ok(records)
}

fn emit_role_records<'a>(
    records: &mut Vec<Record>,
    node_id: &str,
    address: &str,
    family: &str,
    roles: impl Iterator<Item = &'a str>,
    zone: &Fqdn,
    ttl: u32,
) -> Result<(), DomainError> {
    let mut roles = roles.peekable();
    if roles.peek().is_none() {
        return Ok(());
    }
    let Some(ip) = parse_row_ip(node_id, address, family)? else {
        return Ok(());
    };

    for role in roles {
        let label = format!("{}-{}", node_id, role);
        match zone.prepend_label(&label) {
            Ok(fqdn) => records.push(Record::address(fqdn, ip, ttl)),
            Err(_) => {
                warn!(node = %node_id, role = %role, "topology: skipping invalid record name");
            }
        }
    }
    Ok(())
}

/// Expand cluster membership rows: per live member an address record at
/// `<cluster>.<zone>`, and for the leader a `leader.<cluster>.<zone>` CNAME
/// pointing at the leader's bare node name.
pub fn build_cluster_records(
    rows: &[ClusterMemberRow],
    zone: &Fqdn,
    ttl: u32,
) -> Result<Vec<Record>, DomainError> {
    let mut records = Vec::new();
    for row in rows {
        let Some(ip) = parse_row_ip(&row.node_id, &row.address, &row.family)? else {
            continue;
        };
        let cluster_fqdn = match zone.prepend_label(&row.cluster_id) {
            Ok(fqdn) => fqdn,
            Err(_) => {
                warn!(cluster = %row.cluster_id, "topology: skipping invalid cluster name");
                continue;
            }
        };
        records.push(Record::address(cluster_fqdn.clone(), ip, ttl));

        if row.node_id == row.leader_id {
            let leader_fqdn = match cluster_fqdn.prepend_label("leader") {
                Ok(fqdn) => fqdn,
                Err(_) => continue,
            };
            if let Ok(target) = zone.prepend_label(&row.node_id) {
                records.push(Record::cname(leader_fqdn, target, ttl));
            }
        }
    }
    Ok(records)
}

/// Validate one row's address against its declared family. An invalid IP
/// skips the row (`Ok(None)`); a family other than "4"/"6" is fatal for the
/// whole load.
fn parse_row_ip(
    node_id: &str,
    address: &str,
    family: &str,
) -> Result<Option<IpAddr>, DomainError> {
    let expect_v4 = match family {
        "4" => true,
        "6" => false,
        _ => {
            return Err(DomainError::UnknownAddressFamily {
                family: family.to_string(),
                node_id: node_id.to_string(),
            })
        }
    };

    match address.parse::<IpAddr>() {
        Ok(ip) if ip.is_ipv4() == expect_v4 => Ok(Some(ip)),
        Ok(_) => {
            warn!(node = %node_id, ip = %address, family = %family,
                "topology: skipping address not matching its family");
            Ok(None)
        }
        Err(_) => {
            warn!(node = %node_id, ip = %address, "topology: skipping node with invalid IP");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabric_dns_domain::{RecordData, RecordType};

    fn zone() -> Fqdn {
        Fqdn::from_name("fabric.internal")
    }

    fn row(node: &str, address: &str, family: &str, default: bool, roles: &[&str]) -> NodeAddressRow {
        NodeAddressRow {
            node_id: node.to_string(),
            address: address.to_string(),
            family: family.to_string(),
            is_default: default,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn fqdns(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.fqdn.as_str()).collect()
    }

    #[test]
    fn explicit_roles_and_catalog_fallback() {
        let rows = vec![row("n1", "10.0.0.1", "4", true, &["api"])];
        let catalog = RoleCatalog::new(vec!["api".to_string(), "web".to_string()]);

        let records = build_node_records(&rows, &catalog, &zone(), 30).unwrap();
        let names = fqdns(&records);

        // Explicit role keeps its own address; the missing catalog role
        // falls back to the default address.
        assert!(names.contains(&"n1-api.fabric.internal."));
        assert!(names.contains(&"n1-web.fabric.internal."));
        // Bare name comes from the default address record.
        assert!(names.contains(&"n1.fabric.internal."));
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn fallback_uses_default_address_not_role_address() {
        let rows = vec![
            row("n1", "10.0.0.1", "4", true, &[]),
            row("n1", "10.0.0.2", "4", false, &["api"]),
        ];
        let catalog = RoleCatalog::new(vec!["api".to_string(), "web".to_string()]);

        let records = build_node_records(&rows, &catalog, &zone(), 30).unwrap();

        let api = records
            .iter()
            .find(|r| r.fqdn.as_str() == "n1-api.fabric.internal.")
            .unwrap();
        assert_eq!(api.data, RecordData::A("10.0.0.2".parse().unwrap()));

        let web = records
            .iter()
            .find(|r| r.fqdn.as_str() == "n1-web.fabric.internal.")
            .unwrap();
        assert_eq!(web.data, RecordData::A("10.0.0.1".parse().unwrap()));
    }

    #[test]
    fn no_default_address_means_no_fallback_and_no_bare_name() {
        let rows = vec![row("n1", "10.0.0.2", "4", false, &["api"])];
        let catalog = RoleCatalog::new(vec!["api".to_string(), "web".to_string()]);

        let records = build_node_records(&rows, &catalog, &zone(), 30).unwrap();
        let names = fqdns(&records);

        assert_eq!(names, vec!["n1-api.fabric.internal."]);
    }

    #[test]
    fn ipv6_family_yields_aaaa() {
        let rows = vec![row("n1", "fd00::1", "6", true, &["api"])];
        let records =
            build_node_records(&rows, &RoleCatalog::new(vec!["api".into()]), &zone(), 30).unwrap();

        assert!(records
            .iter()
            .all(|r| r.record_type() == RecordType::AAAA));
    }

    #[test]
    fn invalid_ip_skips_row_only() {
        let rows = vec![
            row("n1", "not-an-ip", "4", false, &["api"]),
            row("n2", "10.0.0.2", "4", false, &["api"]),
        ];
        let records = build_node_records(&rows, &RoleCatalog::new(vec![]), &zone(), 30).unwrap();
        assert_eq!(fqdns(&records), vec!["n2-api.fabric.internal."]);
    }

    #[test]
    fn family_ip_mismatch_skips_row() {
        let rows = vec![row("n1", "fd00::1", "4", false, &["api"])];
        let records = build_node_records(&rows, &RoleCatalog::new(vec![]), &zone(), 30).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn unknown_family_aborts_load() {
        let rows = vec![
            row("n1", "10.0.0.1", "4", false, &["api"]),
            row("n2", "10.0.0.2", "5", false, &["api"]),
        ];
        let err = build_node_records(&rows, &RoleCatalog::new(vec![]), &zone(), 30).unwrap_err();
        assert!(matches!(err, DomainError::UnknownAddressFamily { .. }));
    }

    #[test]
    fn records_carry_configured_ttl() {
        let rows = vec![row("n1", "10.0.0.1", "4", true, &[])];
        let records = build_node_records(&rows, &RoleCatalog::default(), &zone(), 17).unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| r.ttl == 17));
    }

    fn member(cluster: &str, leader: &str, node: &str, address: &str) -> ClusterMemberRow {
        ClusterMemberRow {
            cluster_id: cluster.to_string(),
            leader_id: leader.to_string(),
            node_id: node.to_string(),
            address: address.to_string(),
            family: "4".to_string(),
        }
    }

    #[test]
    fn cluster_members_share_the_cluster_name() {
        let rows = vec![
            member("c1", "n1", "n1", "10.0.0.1"),
            member("c1", "n1", "n2", "10.0.0.2"),
        ];
        let records = build_cluster_records(&rows, &zone(), 30).unwrap();

        let cluster_addrs: Vec<_> = records
            .iter()
            .filter(|r| r.fqdn.as_str() == "c1.fabric.internal.")
            .collect();
        assert_eq!(cluster_addrs.len(), 2);
    }

    #[test]
    fn leader_gets_a_cname_to_its_node_name() {
        let rows = vec![
            member("c1", "n1", "n1", "10.0.0.1"),
            member("c1", "n1", "n2", "10.0.0.2"),
        ];
        let records = build_cluster_records(&rows, &zone(), 30).unwrap();

        let leader = records
            .iter()
            .find(|r| r.fqdn.as_str() == "leader.c1.fabric.internal.")
            .unwrap();
        assert_eq!(
            leader.data,
            RecordData::Cname(Fqdn::from_name("n1.fabric.internal"))
        );
        // Exactly one leader alias per cluster.
        assert_eq!(
            records
                .iter()
                .filter(|r| r.record_type() == RecordType::CNAME)
                .count(),
            1
        );
    }
}
