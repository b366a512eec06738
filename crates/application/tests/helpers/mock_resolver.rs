#![allow(dead_code)]

use async_trait::async_trait;
use delve_dns_application::ports::DnsResolver;
use delve_dns_domain::{DnsMessage, DomainError, ResourceRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockDnsResolver {
    answers: Arc<Mutex<Vec<ResourceRecord>>>,
    error: Arc<Mutex<Option<DomainError>>>,
    calls: Arc<AtomicUsize>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_answers(&self, answers: Vec<ResourceRecord>) {
        *self.answers.lock().unwrap() = answers;
    }

    pub fn set_error(&self, error: DomainError) {
        *self.error.lock().unwrap() = Some(error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.error.lock().unwrap().clone() {
            return Err(error);
        }

        let answers = self.answers.lock().unwrap().clone();
        Ok(DnsMessage::response_to(query, answers))
    }
}
