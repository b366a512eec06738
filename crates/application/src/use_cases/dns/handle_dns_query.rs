use crate::ports::DnsResolver;
use delve_dns_domain::{DnsMessage, DomainError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError> {
        let start = Instant::now();

        for question in &query.questions {
            info!(
                id = query.header.id,
                domain = %question.name,
                record_type = %question.qtype,
                "DNS query received"
            );
        }

        match self.resolver.resolve(query).await {
            Ok(response) => {
                debug!(
                    id = query.header.id,
                    answers = response.answers.len(),
                    response_time_us = start.elapsed().as_micros() as u64,
                    "Query resolved"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(
                    id = query.header.id,
                    error = %e,
                    response_time_us = start.elapsed().as_micros() as u64,
                    "Query resolution failed"
                );
                Err(e)
            }
        }
    }
}
