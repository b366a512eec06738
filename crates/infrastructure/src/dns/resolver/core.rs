use crate::dns::cache::DnsCache;
use crate::dns::codec::{build_query, parse_message};
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use delve_dns_application::ports::DnsResolver;
use delve_dns_domain::{DnsMessage, DomainError, Question, RecordType, ResourceRecord};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Walks the delegation tree from a fixed root server, following glue
/// addresses out of referrals until some server answers.
pub struct IterativeResolver {
    transport: Arc<dyn DnsTransport>,
    root: SocketAddr,
    referral_port: u16,
    timeout: Duration,
    max_referral_depth: usize,
    max_queries: usize,
    cache: Option<Arc<DnsCache>>,
}

const QR_BIT: u16 = 0x8000;

/// Bookkeeping for one question's walk.
struct Chase {
    id: u16,
    question: Question,
    query: Vec<u8>,
    queries_sent: usize,
}

impl IterativeResolver {
    pub fn new(
        transport: Arc<dyn DnsTransport>,
        root: SocketAddr,
        referral_port: u16,
        timeout: Duration,
    ) -> Self {
        info!(
            root = %root,
            referral_port,
            timeout_ms = timeout.as_millis() as u64,
            "Iterative DNS resolver created"
        );

        Self {
            transport,
            root,
            referral_port,
            timeout,
            max_referral_depth: 12,
            max_queries: 64,
            cache: None,
        }
    }

    pub fn with_limits(mut self, max_referral_depth: usize, max_queries: usize) -> Self {
        self.max_referral_depth = max_referral_depth;
        self.max_queries = max_queries;
        self
    }

    pub fn with_cache(mut self, cache: Arc<DnsCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Answer records for a single question, from the cache when possible.
    /// Whatever the walk produced, including nothing, is cached.
    pub async fn resolve_question(
        &self,
        id: u16,
        question: &Question,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        if let Some(cache) = &self.cache {
            if let Some(records) = cache.get(&question.name, question.qtype) {
                debug!(
                    domain = %question.name,
                    record_type = %question.qtype,
                    "Cache HIT"
                );
                return Ok(records);
            }
        }

        let mut chase = Chase {
            id,
            question: question.clone(),
            query: build_query(id, question)?,
            queries_sent: 0,
        };
        let records = self
            .chase(&mut chase, self.root, 0)
            .await?
            .unwrap_or_default();

        debug!(
            domain = %question.name,
            record_type = %question.qtype,
            answers = records.len(),
            queries_sent = chase.queries_sent,
            "Iterative resolution finished"
        );

        if let Some(cache) = &self.cache {
            cache.add(&question.name, question.qtype, records.clone());
        }

        Ok(records)
    }

    /// `Ok(None)` means this branch of the tree produced nothing usable and
    /// the caller should try its next referral.
    fn chase<'a>(
        &'a self,
        chase: &'a mut Chase,
        server: SocketAddr,
        depth: usize,
    ) -> BoxFuture<'a, Result<Option<Vec<ResourceRecord>>, DomainError>> {
        async move {
            if depth > self.max_referral_depth {
                return Err(DomainError::ReferralLimitExceeded(format!(
                    "more than {} referrals for {}",
                    self.max_referral_depth, chase.question.name
                )));
            }
            if chase.queries_sent >= self.max_queries {
                return Err(DomainError::ReferralLimitExceeded(format!(
                    "more than {} queries for {}",
                    self.max_queries, chase.question.name
                )));
            }
            chase.queries_sent += 1;

            let reply = self.ask(server, chase).await?;

            if !reply.answers.is_empty() {
                debug!(server = %server, depth, answers = reply.answers.len(), "Answer received");
                return Ok(Some(reply.answers));
            }

            for glue in reply.glue_addresses() {
                let next = SocketAddr::new(IpAddr::V4(glue), self.referral_port);
                debug!(from = %server, to = %next, depth, "Following referral");

                match self.chase(chase, next, depth + 1).await {
                    Ok(Some(records)) => return Ok(Some(records)),
                    Ok(None) => continue,
                    Err(e) if e.is_hop_failure() => {
                        warn!(server = %next, error = %e, "Referral hop failed, trying next glue");
                    }
                    Err(e) => return Err(e),
                }
            }

            if chase.question.qtype == RecordType::NS && !reply.authorities.is_empty() {
                debug!(
                    server = %server,
                    authorities = reply.authorities.len(),
                    "Using authority section as NS answer"
                );
                return Ok(Some(reply.authorities));
            }

            Ok(None)
        }
        .boxed()
    }

    async fn ask(&self, server: SocketAddr, chase: &Chase) -> Result<DnsMessage, DomainError> {
        let bytes = self
            .transport
            .exchange(server, &chase.query, self.timeout)
            .await?;
        let reply = parse_message(&bytes)
            .map_err(|e| DomainError::MalformedResponse(format!("reply from {}: {}", server, e)))?;

        match mismatch(&reply, chase) {
            Some(reason) => Err(DomainError::MalformedResponse(format!(
                "reply from {}: {}",
                server, reason
            ))),
            None => Ok(reply),
        }
    }
}

/// Why `reply` cannot be the answer to the query `chase` sent, if it can't.
fn mismatch(reply: &DnsMessage, chase: &Chase) -> Option<String> {
    if reply.header.id != chase.id {
        return Some(format!(
            "id {} does not match query id {}",
            reply.header.id, chase.id
        ));
    }
    if reply.header.flags & QR_BIT == 0 {
        return Some("QR bit not set".to_string());
    }

    let echoed = reply.questions.first().is_some_and(|question| {
        question.qtype == chase.question.qtype
            && question.name.eq_ignore_ascii_case(&chase.question.name)
    });
    if !echoed {
        return Some(format!(
            "question does not echo {} {}",
            chase.question.name, chase.question.qtype
        ));
    }

    None
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError> {
        let mut answers = Vec::new();
        for question in &query.questions {
            answers.extend(self.resolve_question(query.header.id, question).await?);
        }
        Ok(DnsMessage::response_to(query, answers))
    }
}
