use super::RecordType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Typed record body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(String),
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::Aaaa(_) => RecordType::AAAA,
            RecordData::Ns(_) => RecordType::NS,
        }
    }

    /// Length of the body on the wire when names are written uncompressed.
    pub fn encoded_len(&self) -> usize {
        match self {
            RecordData::A(_) => 4,
            RecordData::Aaaa(_) => 16,
            RecordData::Ns(name) => encoded_name_len(name),
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::Aaaa(addr) => {
                for (i, group) in addr.segments().iter().enumerate() {
                    if i > 0 {
                        f.write_str(":")?;
                    }
                    write!(f, "{:x}", group)?;
                }
                Ok(())
            }
            RecordData::Ns(name) => f.write_str(name),
        }
    }
}

/// Uncompressed wire length of a dotted name: one length byte per label,
/// the label bytes, and the terminating zero.
pub fn encoded_name_len(name: &str) -> usize {
    if name.is_empty() {
        return 1;
    }
    name.split('.').map(|label| label.len() + 1).sum::<usize>() + 1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub name: String,

    pub record_type: RecordType,

    pub class: u16,

    pub ttl: u32,

    /// Declared body length. For parsed records this is the value read off
    /// the wire; the encoder always writes the computed length.
    pub rd_length: u16,

    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>, class: u16, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            record_type: data.record_type(),
            class,
            ttl,
            rd_length: data.encoded_len() as u16,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aaaa_renders_uncompressed_groups() {
        let data = RecordData::Aaaa("2001:db8::1".parse().unwrap());
        assert_eq!(data.to_string(), "2001:db8:0:0:0:0:0:1");
    }

    #[test]
    fn test_encoded_name_len() {
        assert_eq!(encoded_name_len(""), 1);
        assert_eq!(encoded_name_len("com"), 5);
        assert_eq!(encoded_name_len("ns1.example.com"), 17);
    }

    #[test]
    fn test_new_record_computes_rd_length() {
        let ns = ResourceRecord::new("com", 1, 172800, RecordData::Ns("a.gtld-servers.net".into()));
        assert_eq!(ns.record_type, RecordType::NS);
        assert_eq!(ns.rd_length, 20);

        let a = ResourceRecord::new("example.com", 1, 300, RecordData::A(Ipv4Addr::LOCALHOST));
        assert_eq!(a.rd_length, 4);
    }
}
