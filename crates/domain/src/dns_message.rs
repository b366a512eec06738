pub mod message;
pub mod record;
pub mod record_type;

pub use message::{DnsMessage, Header, Question, ResponseCode, RESPONSE_FLAGS};
pub use record::{encoded_name_len, RecordData, ResourceRecord};
pub use record_type::RecordType;
