use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Query and record types understood by the server.
///
/// `PTR` is accepted as a query type only; no PTR record body is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    NS,
    PTR,
    AAAA,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::PTR => "PTR",
            RecordType::AAAA => "AAAA",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::PTR => 12,
            RecordType::AAAA => 28,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1 => Some(RecordType::A),
            2 => Some(RecordType::NS),
            12 => Some(RecordType::PTR),
            28 => Some(RecordType::AAAA),
            _ => None,
        }
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
            "NS" => Ok(RecordType::NS),
            "PTR" => Ok(RecordType::PTR),
            "AAAA" => Ok(RecordType::AAAA),
            _ => Err(format!("Unknown record type: {}", s)),
        }
    }
}
