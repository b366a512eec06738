use super::reader::HEADER_LEN;
use bytes::BufMut;
use delve_dns_domain::{
    DnsMessage, DomainError, Header, Question, RecordData, ResourceRecord, ResponseCode,
};

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;
const QR_BIT: u16 = 0x8000;

/// Appends a name as plain length-prefixed labels. The encoder never
/// compresses.
pub fn write_name(buf: &mut Vec<u8>, name: &str) -> Result<(), DomainError> {
    let start = buf.len();

    if !name.is_empty() {
        for label in name.split('.') {
            if label.is_empty() || label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "bad label length in '{}'",
                    name
                )));
            }
            if !label.is_ascii() {
                return Err(DomainError::InvalidDomainName(format!(
                    "non-ASCII label in '{}'",
                    name
                )));
            }
            buf.put_u8(label.len() as u8);
            buf.put_slice(label.as_bytes());
        }
    }
    buf.put_u8(0);

    if buf.len() - start > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' exceeds {} bytes",
            name, MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn write_header(buf: &mut Vec<u8>, header: &Header) {
    buf.put_u16(header.id);
    buf.put_u16(header.flags);
    buf.put_u16(header.qd_count);
    buf.put_u16(header.an_count);
    buf.put_u16(header.ns_count);
    buf.put_u16(header.ar_count);
}

fn write_question(buf: &mut Vec<u8>, question: &Question) -> Result<(), DomainError> {
    write_name(buf, &question.name)?;
    buf.put_u16(question.qtype.to_u16());
    buf.put_u16(question.qclass);
    Ok(())
}

fn write_record(buf: &mut Vec<u8>, record: &ResourceRecord) -> Result<(), DomainError> {
    write_name(buf, &record.name)?;
    buf.put_u16(record.data.record_type().to_u16());
    buf.put_u16(record.class);
    buf.put_u32(record.ttl);

    let length_at = buf.len();
    buf.put_u16(0);
    match &record.data {
        RecordData::A(addr) => buf.put_slice(&addr.octets()),
        RecordData::Aaaa(addr) => buf.put_slice(&addr.octets()),
        RecordData::Ns(host) => write_name(buf, host)?,
    }

    let rd_length = (buf.len() - length_at - 2) as u16;
    buf[length_at..length_at + 2].copy_from_slice(&rd_length.to_be_bytes());
    Ok(())
}

/// Serializes `message`. Header counts are taken from the section lengths,
/// whatever the header says.
pub fn encode_message(message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);

    let header = Header {
        qd_count: message.questions.len() as u16,
        an_count: message.answers.len() as u16,
        ns_count: message.authorities.len() as u16,
        ar_count: message.additionals.len() as u16,
        ..message.header
    };
    write_header(&mut buf, &header);

    for question in &message.questions {
        write_question(&mut buf, question)?;
    }
    for record in message
        .answers
        .iter()
        .chain(&message.authorities)
        .chain(&message.additionals)
    {
        write_record(&mut buf, record)?;
    }

    Ok(buf)
}

/// Answer carrying `id`, the echoed questions and `answers`; authority and
/// additional sections are always empty.
pub fn build_response(
    id: u16,
    questions: &[Question],
    answers: &[ResourceRecord],
) -> Result<Vec<u8>, DomainError> {
    encode_message(&DnsMessage::response(
        id,
        questions.to_vec(),
        answers.to_vec(),
    ))
}

/// Single-question query for an outbound hop. RD stays clear: every hop is
/// asked non-recursively.
pub fn build_query(id: u16, question: &Question) -> Result<Vec<u8>, DomainError> {
    encode_message(&DnsMessage {
        header: Header {
            id,
            ..Header::default()
        },
        questions: vec![question.clone()],
        ..DnsMessage::default()
    })
}

/// Minimal failure reply: the request's first two bytes as id, QR and
/// `rcode` in the flags, every count zero. Works on any input, including
/// buffers too short to hold an id.
pub fn build_error_response(request: &[u8], rcode: ResponseCode) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN);
    buf.put_u8(request.first().copied().unwrap_or(0));
    buf.put_u8(request.get(1).copied().unwrap_or(0));
    buf.put_u16(QR_BIT | rcode.to_u16());
    buf.put_bytes(0, 8);
    buf
}
