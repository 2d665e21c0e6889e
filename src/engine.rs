use crate::error::Result;
use crate::output::OutputManager;
use crate::prober::Prober;
use crate::session::Session;
use crate::sources::{CrtShSource, Source};
use crate::types::{Config, RunStats};
use crate::utils;
use log::info;
use std::time::Instant;

pub struct Engine {
    config: Config,
    session: Session,
    source: Box<dyn Source>,
    prober: Prober,
    output_manager: OutputManager,
}

impl Engine {
    pub fn new(config: Config) -> Result<Self> {
        let source = Box::new(CrtShSource::new(config.source_url.clone()));
        Self::with_source(config, source)
    }

    /// Build an engine around an arbitrary candidate source.
    pub fn with_source(config: Config, source: Box<dyn Source>) -> Result<Self> {
        let session = Session::new(&config)?;
        let prober = Prober::new(&config)?;
        let output_manager = OutputManager::new(config.output.clone(), config.silent);

        Ok(Self {
            config,
            session,
            source,
            prober,
            output_manager,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Discover, probe and write. Discovery and write failures abort the run;
    /// probe failures only mark a host as down.
    pub async fn run(&self) -> Result<RunStats> {
        let domain = &self.config.domain;
        let start_time = Instant::now();

        if !self.config.silent {
            println!("Fetching subdomains for {}...", domain);
        }

        let discovered = self.source.enumerate(domain, &self.session).await?;
        let found = discovered.len();
        info!("{}: Found {} unique subdomains for {}", self.source.name(), found, domain);

        let candidates = utils::select_candidates(discovered, self.config.limit);
        info!(
            "Probing {} subdomains with {} workers",
            candidates.len(),
            self.config.prober.workers
        );

        let report = self.prober.probe_batch(candidates).await;
        info!("{}/{} subdomains answered 200", report.live.len(), report.results.len());

        let files = self.output_manager.write_all(domain, &report.live)?;

        Ok(RunStats {
            candidates: found,
            probed: report.results.len(),
            live: report.live.len(),
            files,
            duration: start_time.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OutputFormats, SslToolError};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::path::Path;
    use std::time::Duration;

    struct StaticSource(Vec<String>);

    #[async_trait]
    impl Source for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        async fn enumerate(&self, _domain: &str, _session: &Session) -> Result<HashSet<String>> {
            Ok(self.0.iter().cloned().collect())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl Source for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn enumerate(&self, _domain: &str, _session: &Session) -> Result<HashSet<String>> {
            Err(SslToolError::SourceUnavailable {
                source_name: "failing".to_string(),
                message: "HTTP error: 503 Service Unavailable".to_string(),
            })
        }
    }

    fn config(dir: &Path, formats: OutputFormats, limit: Option<usize>) -> Config {
        let mut config = Config::new("example.com");
        config.limit = limit;
        config.silent = true;
        config.prober.timeout = Duration::from_secs(5);
        config.output.formats = formats;
        config.output.directory = dir.to_path_buf();
        config
    }

    async fn up_server() -> (mockito::ServerGuard, mockito::Mock) {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/").with_status(200).create_async().await;
        (server, mock)
    }

    #[tokio::test]
    async fn test_default_run_writes_only_json() {
        let dir = tempfile::tempdir().unwrap();
        let (server, _mock) = up_server().await;
        let host = server.host_with_port();

        let engine = Engine::with_source(
            config(dir.path(), OutputFormats::default(), None),
            Box::new(StaticSource(vec![host.clone(), host.clone()])),
        )
        .unwrap();
        let stats = engine.run().await.unwrap();

        assert_eq!(stats.candidates, 1);
        assert_eq!(stats.live, 1);
        assert_eq!(stats.files.len(), 1);
        assert_eq!(stats.files[0].extension().unwrap(), "json");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        let written: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&stats.files[0]).unwrap()).unwrap();
        assert_eq!(written, vec![host]);
    }

    #[tokio::test]
    async fn test_limit_caps_probed_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let (server, _mock) = up_server().await;
        let hosts = vec![
            server.host_with_port(),
            "bad host one".to_string(),
            "bad host two".to_string(),
        ];

        let engine = Engine::with_source(
            config(dir.path(), OutputFormats::default(), Some(2)),
            Box::new(StaticSource(hosts.clone())),
        )
        .unwrap();
        let stats = engine.run().await.unwrap();
        assert_eq!(stats.candidates, 3);
        assert_eq!(stats.probed, 2);

        let engine = Engine::with_source(
            config(dir.path(), OutputFormats::default(), Some(10)),
            Box::new(StaticSource(hosts)),
        )
        .unwrap();
        let stats = engine.run().await.unwrap();
        assert_eq!(stats.probed, 3);
        assert_eq!(stats.live, 1);
    }

    #[tokio::test]
    async fn test_every_format_gets_the_same_survivors() {
        let dir = tempfile::tempdir().unwrap();
        let (server, _mock) = up_server().await;
        let host = server.host_with_port();

        let engine = Engine::with_source(
            config(dir.path(), OutputFormats::from_flags(true, true, true), None),
            Box::new(StaticSource(vec![host.clone(), "bad host".to_string()])),
        )
        .unwrap();
        let stats = engine.run().await.unwrap();

        assert_eq!(stats.files.len(), 3);
        let txt = std::fs::read_to_string(dir.path().join("ssl-tool-example.com.txt")).unwrap();
        assert_eq!(txt, format!("{}\n", host));
        let html = std::fs::read_to_string(dir.path().join("ssl-tool-example.com.html")).unwrap();
        assert!(html.contains(&format!("href=\"http://{}\"", host)));
        let json: Vec<String> =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("ssl-tool-example.com.json")).unwrap())
                .unwrap();
        assert_eq!(json, vec![host]);
    }

    #[tokio::test]
    async fn test_source_failure_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();

        let engine = Engine::with_source(
            config(dir.path(), OutputFormats::default(), None),
            Box::new(FailingSource),
        )
        .unwrap();
        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, SslToolError::SourceUnavailable { .. }));
        assert_eq!(
            err.to_string(),
            "Source failing unavailable: HTTP error: 503 Service Unavailable"
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
