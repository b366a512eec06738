#![allow(dead_code)]
use delve_dns_domain::{RecordData, ResourceRecord};
use std::net::{Ipv4Addr, Ipv6Addr};

pub struct ResourceRecordBuilder {
    name: String,
    class: u16,
    ttl: u32,
    data: RecordData,
}

impl ResourceRecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "example.com".to_string(),
            class: 1,
            ttl: 300,
            data: RecordData::A(Ipv4Addr::new(93, 184, 216, 34)),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ipv4(mut self, addr: &str) -> Self {
        self.data = RecordData::A(addr.parse::<Ipv4Addr>().unwrap());
        self
    }

    pub fn ipv6(mut self, addr: &str) -> Self {
        self.data = RecordData::Aaaa(addr.parse::<Ipv6Addr>().unwrap());
        self
    }

    pub fn name_server(mut self, host: &str) -> Self {
        self.data = RecordData::Ns(host.to_string());
        self
    }

    pub fn build(self) -> ResourceRecord {
        ResourceRecord::new(self.name, self.class, self.ttl, self.data)
    }
}
