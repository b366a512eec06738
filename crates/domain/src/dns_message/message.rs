use super::{RecordData, RecordType, ResourceRecord};
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Flags written on every answer: QR (response) and AA set, RCODE 0.
pub const RESPONSE_FLAGS: u16 = 0x8400;

const QR_BIT: u16 = 0x8000;
const RCODE_MASK: u16 = 0x000F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
}

impl ResponseCode {
    pub fn to_u16(&self) -> u16 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NxDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            0 => Some(ResponseCode::NoError),
            1 => Some(ResponseCode::FormErr),
            2 => Some(ResponseCode::ServFail),
            3 => Some(ResponseCode::NxDomain),
            4 => Some(ResponseCode::NotImp),
            5 => Some(ResponseCode::Refused),
            _ => None,
        }
    }

    /// Status reported to a client whose query failed with `error`.
    pub fn for_error(error: &DomainError) -> Self {
        match error {
            DomainError::UnsupportedRecordType(_) => ResponseCode::NotImp,
            DomainError::TruncatedMessage | DomainError::InvalidDomainName(_) => {
                ResponseCode::FormErr
            }
            _ => ResponseCode::ServFail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

impl Header {
    pub fn is_response(&self) -> bool {
        self.flags & QR_BIT != 0
    }

    pub fn response_code(&self) -> Option<ResponseCode> {
        ResponseCode::from_u16(self.flags & RCODE_MASK)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub name: String,
    pub qtype: RecordType,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, qtype: RecordType) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DnsMessage {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl DnsMessage {
    /// Reply carrying `id`, the echoed questions and `answers`, with
    /// nothing in the authority/additional sections.
    pub fn response(id: u16, questions: Vec<Question>, answers: Vec<ResourceRecord>) -> Self {
        let mut message = Self {
            header: Header {
                id,
                flags: RESPONSE_FLAGS,
                ..Header::default()
            },
            questions,
            answers,
            authorities: Vec::new(),
            additionals: Vec::new(),
        };
        message.sync_counts();
        message
    }

    /// Answer to `request`: same id, its questions echoed.
    pub fn response_to(request: &DnsMessage, answers: Vec<ResourceRecord>) -> Self {
        Self::response(request.header.id, request.questions.clone(), answers)
    }

    /// Recomputes header counts from the section lengths.
    pub fn sync_counts(&mut self) {
        self.header.qd_count = self.questions.len() as u16;
        self.header.an_count = self.answers.len() as u16;
        self.header.ns_count = self.authorities.len() as u16;
        self.header.ar_count = self.additionals.len() as u16;
    }

    /// IPv4 glue from the additional section, in wire order.
    pub fn glue_addresses(&self) -> Vec<Ipv4Addr> {
        self.additionals
            .iter()
            .filter_map(|record| match record.data {
                RecordData::A(addr) => Some(addr),
                _ => None,
            })
            .collect()
    }
}
