use async_trait::async_trait;
use delve_dns_domain::{DnsMessage, DomainError};

#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Answers every question of `query`, returning a response message that
    /// carries the query's id and questions plus the collected answers.
    async fn resolve(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError>;
}
