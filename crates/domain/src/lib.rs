//! Delve DNS Domain Layer
pub mod config;
pub mod dns_message;
pub mod errors;

pub use config::{CacheConfig, CliOverrides, Config, ConfigError, ResolverConfig};
pub use dns_message::{
    DnsMessage, Header, Question, RecordData, RecordType, ResourceRecord, ResponseCode,
    RESPONSE_FLAGS,
};
pub use errors::DomainError;
