use fabric_dns_domain::{DomainError, Fqdn, Record, RecordData};
use hickory_proto::rr::rdata::{self, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record as WireRecord};

/// Longest character-string a TXT RDATA segment can carry.
const TXT_SEGMENT_MAX: usize = 255;

/// Encodes a full answer set, or nothing. A single bad record fails the
/// whole response so the caller can answer SERVFAIL instead of serving a
/// partial truth.
pub fn encode_answers(records: &[Record]) -> Result<Vec<WireRecord>, DomainError> {
    records.iter().map(encode_record).collect()
}

pub fn encode_record(record: &Record) -> Result<WireRecord, DomainError> {
    let name = encode_name(&record.fqdn)?;
    let rdata = match &record.data {
        RecordData::A(addr) => RData::A(rdata::A(*addr)),
        RecordData::Aaaa(addr) => RData::AAAA(rdata::AAAA(*addr)),
        RecordData::Cname(target) => RData::CNAME(rdata::CNAME(encode_name(target)?)),
        RecordData::Srv {
            priority,
            weight,
            port,
            target,
        } => RData::SRV(SRV::new(*priority, *weight, *port, encode_name(target)?)),
        RecordData::Txt(payload) => RData::TXT(encode_txt(payload)),
    };
    Ok(WireRecord::from_rdata(name, record.ttl, rdata))
}

fn encode_name(fqdn: &Fqdn) -> Result<Name, DomainError> {
    Name::from_utf8(fqdn.as_str()).map_err(|_| DomainError::InvalidDomainName(fqdn.to_string()))
}

/// Splits the payload into 255-byte segments on byte boundaries. The split
/// ignores UTF-8 character boundaries; TXT character-strings are opaque
/// bytes on the wire.
fn encode_txt(payload: &str) -> TXT {
    let bytes = payload.as_bytes();
    if bytes.is_empty() {
        return TXT::from_bytes(vec![b"" as &[u8]]);
    }
    TXT::from_bytes(bytes.chunks(TXT_SEGMENT_MAX).collect())
}
