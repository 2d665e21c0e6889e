// src/prober.rs
use crate::error::Result;
use crate::session;
use crate::types::{Config, Liveness, ProbeFailure, ProbeReport, ProbeResult, SslToolError};
use dashmap::DashSet;
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Checks candidate hosts over plain HTTP with a bounded number of workers.
pub struct Prober {
    client: Client,
    semaphore: Arc<Semaphore>,
    show_progress: bool,
}

impl Prober {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = config.prober.timeout;
        let client_builder = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)));

        let client = session::with_proxy(client_builder, config.proxy.as_ref())
            .build()
            .map_err(|e| SslToolError::ConfigError(format!("Failed to build probe client: {}", e)))?;

        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(config.prober.workers)),
            show_progress: !config.silent && atty::is(atty::Stream::Stderr),
        })
    }

    pub async fn probe_batch(&self, hosts: Vec<String>) -> ProbeReport {
        let live = Arc::new(DashSet::new());
        let progress = self.progress_bar(hosts.len());
        let mut handles = FuturesUnordered::new();

        for host in hosts {
            let client = self.client.clone();
            let semaphore = self.semaphore.clone();
            let live = Arc::clone(&live);
            let progress = progress.clone();

            handles.push(tokio::spawn(async move {
                // The semaphore is never closed, so a permit always arrives
                let _permit = semaphore.acquire_owned().await.ok();
                let liveness = Self::probe_host(&client, &host).await;
                if liveness.is_up() {
                    live.insert(host.clone());
                }
                progress.inc(1);
                ProbeResult { host, liveness }
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        while let Some(joined) = handles.next().await {
            match joined {
                Ok(result) => {
                    match &result.liveness {
                        Liveness::Up => debug!("{} is up", result.host),
                        Liveness::Down(reason) => debug!("{} is down: {}", result.host, reason),
                    }
                    results.push(result);
                }
                Err(e) => warn!("Probe task failed: {}", e),
            }
        }
        progress.finish_and_clear();

        let mut live: Vec<String> = live.iter().map(|host| host.key().clone()).collect();
        live.sort();

        ProbeReport { results, live }
    }

    /// Issue one GET to `http://<host>/`. Only an exact 200 counts as up.
    pub async fn probe_host(client: &Client, host: &str) -> Liveness {
        let url = match probe_url(host) {
            Ok(url) => url,
            Err(reason) => return Liveness::Down(reason),
        };

        match client.get(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => Liveness::Up,
            Ok(response) => Liveness::Down(ProbeFailure::Status(response.status().as_u16())),
            Err(e) => Liveness::Down(classify_error(&e)),
        }
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} probed")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress
    }
}

fn probe_url(host: &str) -> std::result::Result<Url, ProbeFailure> {
    let url = Url::parse(&format!("http://{}/", host))
        .map_err(|e| ProbeFailure::InvalidHost(format!("{}: {}", host, e)))?;

    if url.path() != "/" || url.query().is_some() {
        return Err(ProbeFailure::InvalidHost(host.to_string()));
    }

    Ok(url)
}

fn classify_error(error: &reqwest::Error) -> ProbeFailure {
    if error.is_timeout() {
        ProbeFailure::Timeout
    } else if error.is_connect() {
        ProbeFailure::Connect(error.to_string())
    } else {
        ProbeFailure::Request(error.to_string())
    }
}
