use delve_dns_domain::{
    DnsMessage, DomainError, Header, Question, RecordData, RecordType, ResourceRecord,
};
use std::net::{Ipv4Addr, Ipv6Addr};

pub const HEADER_LEN: usize = 12;

const POINTER_MASK: u8 = 0b1100_0000;
const MAX_POINTER_JUMPS: usize = 64;
const MAX_NAME_LEN: usize = 255;

/// Cursor over a complete DNS message.
///
/// Compression pointers are always resolved against the full buffer the
/// reader was created with, so it must never be handed a sub-slice.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) -> Result<(), DomainError> {
        if pos > self.buf.len() {
            return Err(DomainError::TruncatedMessage);
        }
        self.pos = pos;
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn read_u8(&mut self) -> Result<u8, DomainError> {
        let byte = *self.buf.get(self.pos).ok_or(DomainError::TruncatedMessage)?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16, DomainError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DomainError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DomainError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(DomainError::TruncatedMessage)?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Reads a possibly compressed name and returns it dotted, without a
    /// trailing dot.
    ///
    /// The cursor ends up just past the terminating zero byte, or just past
    /// the first compression pointer if the name used one. Pointers chased
    /// after that first one never move the cursor.
    pub fn read_name(&mut self) -> Result<String, DomainError> {
        let mut name = String::new();
        let mut position = self.pos;
        let mut resume_at: Option<usize> = None;
        let mut jumps = 0;

        loop {
            let len = *self.buf.get(position).ok_or(DomainError::TruncatedMessage)?;

            if len & POINTER_MASK == POINTER_MASK {
                let low = *self
                    .buf
                    .get(position + 1)
                    .ok_or(DomainError::TruncatedMessage)?;
                if resume_at.is_none() {
                    resume_at = Some(position + 2);
                }

                jumps += 1;
                if jumps > MAX_POINTER_JUMPS {
                    return Err(DomainError::InvalidDomainName(
                        "compression pointer loop".to_string(),
                    ));
                }

                position = (((len & !POINTER_MASK) as usize) << 8) | low as usize;
                if position >= self.buf.len() {
                    return Err(DomainError::TruncatedMessage);
                }
                continue;
            }

            if len & POINTER_MASK != 0 {
                return Err(DomainError::InvalidDomainName(format!(
                    "unknown label format 0x{:02x}",
                    len
                )));
            }

            if len == 0 {
                self.pos = resume_at.unwrap_or(position + 1);
                return Ok(name);
            }

            let start = position + 1;
            let end = start + len as usize;
            let label = self
                .buf
                .get(start..end)
                .ok_or(DomainError::TruncatedMessage)?;
            if !label.is_ascii() {
                return Err(DomainError::InvalidDomainName(
                    "label is not ASCII".to_string(),
                ));
            }

            if !name.is_empty() {
                name.push('.');
            }
            // ASCII was checked above, so every byte maps to one char.
            name.extend(label.iter().map(|&b| b as char));
            if name.len() > MAX_NAME_LEN {
                return Err(DomainError::InvalidDomainName(
                    "name exceeds 255 bytes".to_string(),
                ));
            }

            position = end;
        }
    }

    pub fn read_header(&mut self) -> Result<Header, DomainError> {
        if self.remaining() < HEADER_LEN {
            return Err(DomainError::TruncatedMessage);
        }

        Ok(Header {
            id: self.read_u16()?,
            flags: self.read_u16()?,
            qd_count: self.read_u16()?,
            an_count: self.read_u16()?,
            ns_count: self.read_u16()?,
            ar_count: self.read_u16()?,
        })
    }

    pub fn read_question(&mut self) -> Result<Question, DomainError> {
        let name = self.read_name()?;
        let code = self.read_u16()?;
        let qclass = self.read_u16()?;
        let qtype = RecordType::from_u16(code).ok_or(DomainError::UnsupportedRecordType(code))?;

        Ok(Question {
            name,
            qtype,
            qclass,
        })
    }

    pub fn read_record(&mut self) -> Result<ResourceRecord, DomainError> {
        let name = self.read_name()?;
        let code = self.read_u16()?;
        let class = self.read_u16()?;
        let ttl = self.read_u32()?;
        let rd_length = self.read_u16()?;

        let body_start = self.pos;
        if self.remaining() < rd_length as usize {
            return Err(DomainError::TruncatedMessage);
        }

        let data = match RecordType::from_u16(code) {
            Some(RecordType::A) => {
                let bytes = self.read_rdata(rd_length, 4)?;
                RecordData::A(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]))
            }
            Some(RecordType::AAAA) => {
                let bytes = self.read_rdata(rd_length, 16)?;
                let mut octets = [0u8; 16];
                octets.copy_from_slice(bytes);
                RecordData::Aaaa(Ipv6Addr::from(octets))
            }
            Some(RecordType::NS) => {
                let host = self.read_name()?;
                // The name's own encoding decides where it ends; realign with
                // the declared length for whatever follows the record.
                self.seek(body_start + rd_length as usize)?;
                RecordData::Ns(host)
            }
            _ => return Err(DomainError::UnsupportedRecordType(code)),
        };

        Ok(ResourceRecord {
            name,
            record_type: data.record_type(),
            class,
            ttl,
            rd_length,
            data,
        })
    }

    fn read_rdata(&mut self, rd_length: u16, expected: usize) -> Result<&'a [u8], DomainError> {
        if rd_length as usize != expected {
            return Err(DomainError::MalformedResponse(format!(
                "rdata length {} where {} was expected",
                rd_length, expected
            )));
        }
        self.read_bytes(expected)
    }

    fn read_records(&mut self, count: u16) -> Result<Vec<ResourceRecord>, DomainError> {
        let mut records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            records.push(self.read_record()?);
        }
        Ok(records)
    }
}

/// Parses a complete DNS message.
pub fn parse_message(buf: &[u8]) -> Result<DnsMessage, DomainError> {
    let mut reader = WireReader::new(buf);
    let header = reader.read_header()?;

    let mut questions = Vec::with_capacity(header.qd_count as usize);
    for _ in 0..header.qd_count {
        questions.push(reader.read_question()?);
    }

    let answers = reader.read_records(header.an_count)?;
    let authorities = reader.read_records(header.ns_count)?;
    let additionals = reader.read_records(header.ar_count)?;

    let mut message = DnsMessage {
        header,
        questions,
        answers,
        authorities,
        additionals,
    };
    message.sync_counts();
    Ok(message)
}
