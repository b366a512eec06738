#![allow(dead_code)]
use super::builders::Reply;
use async_trait::async_trait;
use delve_dns_domain::{DnsMessage, DomainError};
use delve_dns_infrastructure::dns::codec::{encode_message, parse_message};
use delve_dns_infrastructure::dns::DnsTransport;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
pub enum Scripted {
    Reply(Reply),
    Raw(Vec<u8>),
    /// A well-formed reply passed through `edit` before it is sent.
    Tampered(Reply, fn(&mut DnsMessage)),
    Fail(DomainError),
}

/// In-memory transport: every server address maps to a fixed outcome.
/// Unknown servers time out.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<HashMap<SocketAddr, Scripted>>,
    exchanges: Mutex<Vec<SocketAddr>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, server: &str, outcome: Scripted) -> Self {
        let server: SocketAddr = server.parse().unwrap();
        self.script.lock().unwrap().insert(server, outcome);
        self
    }

    pub fn reply(self, server: &str, reply: Reply) -> Self {
        self.on(server, Scripted::Reply(reply))
    }

    pub fn exchanges(&self) -> Vec<SocketAddr> {
        self.exchanges.lock().unwrap().clone()
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanges.lock().unwrap().len()
    }
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn exchange(
        &self,
        server: SocketAddr,
        message: &[u8],
        _timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        self.exchanges.lock().unwrap().push(server);

        let outcome = self.script.lock().unwrap().get(&server).cloned();
        match outcome {
            Some(Scripted::Reply(reply)) => Ok(reply.to_bytes(message)),
            Some(Scripted::Raw(bytes)) => Ok(bytes),
            Some(Scripted::Tampered(reply, edit)) => {
                let mut message = parse_message(&reply.to_bytes(message)).unwrap();
                edit(&mut message);
                Ok(encode_message(&message).unwrap())
            }
            Some(Scripted::Fail(error)) => Err(error),
            None => Err(DomainError::NetworkTimeout {
                server: server.to_string(),
            }),
        }
    }
}
