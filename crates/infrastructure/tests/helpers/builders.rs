#![allow(dead_code)]
use delve_dns_domain::{
    DnsMessage, Header, Question, RecordData, RecordType, ResourceRecord, RESPONSE_FLAGS,
};
use delve_dns_infrastructure::dns::codec::{encode_message, parse_message};
use std::net::{Ipv4Addr, Ipv6Addr};

pub fn a_record(name: &str, addr: Ipv4Addr, ttl: u32) -> ResourceRecord {
    ResourceRecord::new(name, 1, ttl, RecordData::A(addr))
}

pub fn aaaa_record(name: &str, addr: Ipv6Addr, ttl: u32) -> ResourceRecord {
    ResourceRecord::new(name, 1, ttl, RecordData::Aaaa(addr))
}

pub fn ns_record(zone: &str, host: &str, ttl: u32) -> ResourceRecord {
    ResourceRecord::new(zone, 1, ttl, RecordData::Ns(host.to_string()))
}

pub fn query_message(id: u16, name: &str, qtype: RecordType) -> DnsMessage {
    let mut message = DnsMessage {
        header: Header {
            id,
            flags: 0x0100,
            ..Header::default()
        },
        questions: vec![Question::new(name, qtype)],
        ..DnsMessage::default()
    };
    message.sync_counts();
    message
}

pub fn query_bytes(id: u16, name: &str, qtype: RecordType) -> Vec<u8> {
    encode_message(&query_message(id, name, qtype)).unwrap()
}

/// Reply sections for a scripted server.
#[derive(Default, Clone)]
pub struct Reply {
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Reply {
    pub fn answer(records: Vec<ResourceRecord>) -> Self {
        Self {
            answers: records,
            ..Self::default()
        }
    }

    /// A referral: NS records for `zone` plus A glue for each of them.
    pub fn referral(zone: &str, servers: &[(&str, Ipv4Addr)]) -> Self {
        Self {
            authorities: servers
                .iter()
                .map(|(host, _)| ns_record(zone, host, 172_800))
                .collect(),
            additionals: servers
                .iter()
                .map(|(host, addr)| a_record(host, *addr, 172_800))
                .collect(),
            ..Self::default()
        }
    }

    /// Encodes this reply as an answer to `query`, echoing its id and
    /// questions.
    pub fn to_bytes(&self, query: &[u8]) -> Vec<u8> {
        let request = parse_message(query).unwrap();
        let mut message = DnsMessage {
            header: Header {
                id: request.header.id,
                flags: RESPONSE_FLAGS,
                ..Header::default()
            },
            questions: request.questions,
            answers: self.answers.clone(),
            authorities: self.authorities.clone(),
            additionals: self.additionals.clone(),
        };
        message.sync_counts();
        encode_message(&message).unwrap()
    }
}
