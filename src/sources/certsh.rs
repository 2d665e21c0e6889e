// src/sources/certsh.rs
use crate::error::Result;
use crate::session::Session;
use crate::sources::Source;
use crate::utils;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize)]
struct CrtShResponse {
    name_value: String,
}

/// CRT.sh certificate transparency logs source
#[derive(Debug, Clone)]
pub struct CrtShSource {
    name: String,
    base_url: String,
}

impl CrtShSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            name: "crtsh".to_string(),
            base_url: base_url.into(),
        }
    }

    fn query_url(&self, domain: &str) -> String {
        let pattern = format!("%.{}", domain);
        format!("{}?q={}&output=json", self.base_url, urlencoding::encode(&pattern))
    }
}

#[async_trait]
impl Source for CrtShSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn enumerate(&self, domain: &str, session: &Session) -> Result<HashSet<String>> {
        let url = self.query_url(domain);
        let entries: Vec<CrtShResponse> = session.get_json(&url, &self.name).await?;

        // name_value holds every SAN of a certificate, one per line, and a
        // certificate may also cover names outside the domain
        let subdomains = entries
            .iter()
            .flat_map(|entry| entry.name_value.lines())
            .filter_map(|name| utils::clean_hostname(name, domain))
            .collect();

        Ok(subdomains)
    }
}
