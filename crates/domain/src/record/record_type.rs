use std::fmt;
use std::str::FromStr;

/// The record types this server synthesizes and answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    SRV,
    TXT,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::SRV => "SRV",
            RecordType::TXT => "TXT",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::CNAME => 5,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::SRV => 33,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1 => Some(RecordType::A),
            5 => Some(RecordType::CNAME),
            16 => Some(RecordType::TXT),
            28 => Some(RecordType::AAAA),
            33 => Some(RecordType::SRV),
            _ => None,
        }
    }

    pub fn is_address(&self) -> bool {
        matches!(self, RecordType::A | RecordType::AAAA)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "CNAME" => Ok(RecordType::CNAME),
            "SRV" => Ok(RecordType::SRV),
            "TXT" => Ok(RecordType::TXT),
            _ => Err(format!("Unknown record type: {}", s)),
        }
    }
}

/// Wire class of an incoming question. `Other` carries query types outside
/// the supported set; they match no record, so the lookup path degrades to
/// NODATA or NXDOMAIN instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Any,
    Exact(RecordType),
    Other(u16),
}

/// Wire value of the ANY pseudo-type.
const QTYPE_ANY: u16 = 255;

impl QueryType {
    pub fn from_u16(code: u16) -> Self {
        if code == QTYPE_ANY {
            return QueryType::Any;
        }
        match RecordType::from_u16(code) {
            Some(rt) => QueryType::Exact(rt),
            None => QueryType::Other(code),
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            QueryType::Any => QTYPE_ANY,
            QueryType::Exact(rt) => rt.to_u16(),
            QueryType::Other(code) => *code,
        }
    }

}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Any => write!(f, "ANY"),
            QueryType::Exact(rt) => write!(f, "{}", rt),
            QueryType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}
