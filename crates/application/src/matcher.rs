use crate::ports::Lookup;
use fabric_dns_domain::{Fqdn, QueryType, Record, RecordType};

/// Select the records that answer a query. Pure function over a record
/// collection; both adapters run their candidate sets through it.
///
/// A record is included when its canonical name equals the query name and
/// either the query type is ANY, the types match exactly, or the query asked
/// for an address (A/AAAA) and the record is a CNAME. Returning the CNAME
/// alongside address queries matches conventional CNAME-following
/// expectations at the authoritative layer, so resolvers need not re-query.
pub fn match_records<'a, I>(records: I, name: &Fqdn, qtype: QueryType) -> Lookup
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut matched = Vec::new();
    let mut name_exists = false;

    for record in records {
        if record.fqdn != *name {
            continue;
        }
        name_exists = true;

        let record_type = record.record_type();
        let included = match qtype {
            QueryType::Any => true,
            QueryType::Exact(rt) => {
                record_type == rt || (rt.is_address() && record_type == RecordType::CNAME)
            }
            QueryType::Other(_) => false,
        };
        if included {
            matched.push(record.clone());
        }
    }

    Lookup::new(matched, name_exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabric_dns_domain::RecordData;
    use std::net::IpAddr;

    fn name(s: &str) -> Fqdn {
        Fqdn::from_name(s)
    }

    fn a_record(fqdn: &str, ip: &str) -> Record {
        Record::address(name(fqdn), ip.parse::<IpAddr>().unwrap(), 30)
    }

    fn txt_record(fqdn: &str, data: &str) -> Record {
        Record::new(name(fqdn), 30, RecordData::Txt(data.to_string()))
    }

    #[test]
    fn any_returns_all_records_for_name() {
        let records = vec![
            a_record("n1.fabric.internal", "10.0.0.1"),
            txt_record("n1.fabric.internal", "v=1"),
            a_record("n2.fabric.internal", "10.0.0.2"),
        ];

        let lookup = match_records(&records, &name("n1.fabric.internal"), QueryType::Any);
        assert_eq!(lookup.records.len(), 2);
        assert!(lookup.name_exists);
    }

    #[test]
    fn exact_type_match() {
        let records = vec![
            a_record("n1.fabric.internal", "10.0.0.1"),
            txt_record("n1.fabric.internal", "v=1"),
        ];

        let lookup = match_records(
            &records,
            &name("n1.fabric.internal"),
            QueryType::Exact(RecordType::A),
        );
        assert_eq!(lookup.records.len(), 1);
        assert_eq!(lookup.records[0].record_type(), RecordType::A);
    }

    #[test]
    fn address_query_returns_cname() {
        let records = vec![Record::cname(
            name("leader.c1.fabric.internal"),
            name("n1.fabric.internal"),
            30,
        )];

        for qtype in [RecordType::A, RecordType::AAAA] {
            let lookup = match_records(
                &records,
                &name("leader.c1.fabric.internal"),
                QueryType::Exact(qtype),
            );
            assert_eq!(lookup.records.len(), 1);
            assert_eq!(lookup.records[0].record_type(), RecordType::CNAME);
        }
    }

    #[test]
    fn txt_query_over_cname_is_nodata() {
        let records = vec![Record::cname(
            name("leader.c1.fabric.internal"),
            name("n1.fabric.internal"),
            30,
        )];

        let lookup = match_records(
            &records,
            &name("leader.c1.fabric.internal"),
            QueryType::Exact(RecordType::TXT),
        );
        assert!(lookup.records.is_empty());
        assert!(lookup.name_exists);
    }

    #[test]
    fn type_mismatch_is_nodata_not_nxdomain() {
        let records = vec![a_record("n1.fabric.internal", "10.0.0.1")];

        let lookup = match_records(
            &records,
            &name("n1.fabric.internal"),
            QueryType::Exact(RecordType::TXT),
        );
        assert!(lookup.records.is_empty());
        assert!(lookup.name_exists);
    }

    #[test]
    fn unknown_name_is_nxdomain() {
        let records = vec![a_record("n1.fabric.internal", "10.0.0.1")];

        let lookup = match_records(
            &records,
            &name("missing.fabric.internal"),
            QueryType::Exact(RecordType::A),
        );
        assert!(lookup.records.is_empty());
        assert!(!lookup.name_exists);
    }

    #[test]
    fn unsupported_query_type_matches_nothing() {
        let records = vec![a_record("n1.fabric.internal", "10.0.0.1")];

        let lookup = match_records(&records, &name("n1.fabric.internal"), QueryType::Other(6));
        assert!(lookup.records.is_empty());
        assert!(lookup.name_exists);
    }
}
