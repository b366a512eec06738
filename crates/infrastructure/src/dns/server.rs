use crate::dns::codec::{build_error_response, build_response, parse_message};
use delve_dns_application::use_cases::HandleDnsQueryUseCase;
use delve_dns_domain::{DomainError, ResponseCode};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Turns one client datagram into one reply datagram.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Never fails: anything that goes wrong becomes an error response
    /// carrying the request's id.
    pub async fn handle_raw(&self, request: &[u8]) -> Vec<u8> {
        match self.answer(request).await {
            Ok(response) => response,
            Err(e) => {
                let rcode = ResponseCode::for_error(&e);
                match rcode {
                    ResponseCode::ServFail => error!(error = %e, "Query failed"),
                    _ => warn!(error = %e, rcode = ?rcode, "Query rejected"),
                }
                build_error_response(request, rcode)
            }
        }
    }

    async fn answer(&self, request: &[u8]) -> Result<Vec<u8>, DomainError> {
        let query = parse_message(request)?;
        debug!(id = query.header.id, questions = query.questions.len(), "Request parsed");

        let response = self.use_case.execute(&query).await?;
        build_response(response.header.id, &response.questions, &response.answers)
    }
}
