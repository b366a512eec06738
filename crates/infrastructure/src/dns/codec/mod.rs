//! DNS wire format (RFC 1035 §4.1).
//!
//! Decoding follows compression pointers; encoding always writes names in
//! full. Only A, NS and AAAA bodies are understood, anything else is
//! `DomainError::UnsupportedRecordType`.

pub mod reader;
pub mod writer;

pub use reader::{parse_message, WireReader, HEADER_LEN};
pub use writer::{build_error_response, build_query, build_response, encode_message, write_name};
