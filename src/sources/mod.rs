// src/sources/mod.rs
use crate::error::Result;
use crate::session::Session;
use async_trait::async_trait;
use std::collections::HashSet;

mod certsh;

pub use certsh::CrtShSource;

/// A passive source of candidate hostnames for a domain.
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &str;
    async fn enumerate(&self, domain: &str, session: &Session) -> Result<HashSet<String>>;
}
