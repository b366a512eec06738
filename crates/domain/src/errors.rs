use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("DNS message is truncated")]
    TruncatedMessage,

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(u16),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Query timeout waiting for {server}")]
    NetworkTimeout { server: String },

    #[error("Server {server} is unreachable: {reason}")]
    UnreachableServer { server: String, reason: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Treated like a timeout by callers: the delegation chain never settled.
    #[error("Referral limit exceeded: {0}")]
    ReferralLimitExceeded(String),

    #[error("Cache I/O error: {0}")]
    CacheIo(String),
}

impl DomainError {
    /// True for failures of a single outbound hop, after which the resolver
    /// may move on to the next candidate server.
    pub fn is_hop_failure(&self) -> bool {
        matches!(
            self,
            DomainError::NetworkTimeout { .. }
                | DomainError::UnreachableServer { .. }
                | DomainError::MalformedResponse(_)
        )
    }
}
