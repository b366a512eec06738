use delve_dns_domain::{
    DnsMessage, DomainError, Header, Question, RecordType, ResponseCode, RESPONSE_FLAGS,
};
use std::net::Ipv4Addr;
use std::str::FromStr;

mod helpers;
use helpers::ResourceRecordBuilder;

#[test]
fn test_record_type_codes() {
    assert_eq!(RecordType::A.to_u16(), 1);
    assert_eq!(RecordType::NS.to_u16(), 2);
    assert_eq!(RecordType::PTR.to_u16(), 12);
    assert_eq!(RecordType::AAAA.to_u16(), 28);

    assert_eq!(RecordType::from_u16(28), Some(RecordType::AAAA));
    assert_eq!(RecordType::from_u16(6), None);
    assert_eq!(RecordType::from_u16(5), None);
}

#[test]
fn test_record_type_from_str_is_case_insensitive() {
    assert_eq!(RecordType::from_str("aaaa").unwrap(), RecordType::AAAA);
    assert_eq!(RecordType::from_str("Ns").unwrap(), RecordType::NS);
    assert!(RecordType::from_str("SOA").is_err());
}

#[test]
fn test_record_type_follows_data() {
    let a = ResourceRecordBuilder::new().build();
    let aaaa = ResourceRecordBuilder::new().ipv6("2606:2800:220:1::1").build();
    let ns = ResourceRecordBuilder::new().name_server("a.iana-servers.net").build();

    assert_eq!(a.record_type, RecordType::A);
    assert_eq!(aaaa.record_type, RecordType::AAAA);
    assert_eq!(aaaa.rd_length, 16);
    assert_eq!(ns.record_type, RecordType::NS);
    assert_eq!(aaaa.data.to_string(), "2606:2800:220:1:0:0:0:1");
}

#[test]
fn test_response_to_copies_id_and_questions_only() {
    let request = DnsMessage {
        header: Header {
            id: 0xBEEF,
            flags: 0x0100,
            qd_count: 1,
            an_count: 0,
            ns_count: 3,
            ar_count: 7,
        },
        questions: vec![Question::new("example.com", RecordType::A)],
        authorities: vec![ResourceRecordBuilder::new().name_server("ns.example.com").build()],
        ..DnsMessage::default()
    };

    let answers = vec![
        ResourceRecordBuilder::new().build(),
        ResourceRecordBuilder::new().ipv4("93.184.216.35").build(),
    ];
    let response = DnsMessage::response_to(&request, answers);

    assert_eq!(response.header.id, 0xBEEF);
    assert_eq!(response.header.flags, RESPONSE_FLAGS);
    assert!(response.header.is_response());
    assert_eq!(response.header.response_code(), Some(ResponseCode::NoError));
    assert_eq!(response.header.qd_count, 1);
    assert_eq!(response.header.an_count, 2);
    assert_eq!(response.header.ns_count, 0);
    assert_eq!(response.header.ar_count, 0);
    assert!(response.authorities.is_empty());
}

#[test]
fn test_glue_addresses_only_returns_ipv4() {
    let message = DnsMessage {
        additionals: vec![
            ResourceRecordBuilder::new().name("a.gtld-servers.net").ipv6("2001:503:a83e::2:30").build(),
            ResourceRecordBuilder::new().name("a.gtld-servers.net").ipv4("192.5.6.30").build(),
            ResourceRecordBuilder::new().name("b.gtld-servers.net").ipv4("192.33.14.30").build(),
        ],
        ..DnsMessage::default()
    };

    assert_eq!(
        message.glue_addresses(),
        vec![Ipv4Addr::new(192, 5, 6, 30), Ipv4Addr::new(192, 33, 14, 30)]
    );
}

#[test]
fn test_response_code_for_error() {
    assert_eq!(
        ResponseCode::for_error(&DomainError::UnsupportedRecordType(6)),
        ResponseCode::NotImp
    );
    assert_eq!(
        ResponseCode::for_error(&DomainError::TruncatedMessage),
        ResponseCode::FormErr
    );
    assert_eq!(
        ResponseCode::for_error(&DomainError::NetworkTimeout {
            server: "198.41.0.4:53".into()
        }),
        ResponseCode::ServFail
    );
}

#[test]
fn test_hop_failures() {
    assert!(DomainError::NetworkTimeout { server: "x".into() }.is_hop_failure());
    assert!(DomainError::MalformedResponse("bad".into()).is_hop_failure());
    assert!(!DomainError::ReferralLimitExceeded("depth".into()).is_hop_failure());
    assert!(!DomainError::CacheIo("disk".into()).is_hop_failure());
}
