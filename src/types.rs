// src/types.rs
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SOURCE_URL: &str = "https://crt.sh/";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:101.0) Gecko/20100101 Firefox/101.0";
pub const DEFAULT_WORKERS: usize = 5;
pub const OUTPUT_PREFIX: &str = "ssl-tool";

/// Run configuration, built once from the command line by `config::from_args`.
#[derive(Debug, Clone)]
pub struct Config {
    pub domain: String,
    pub limit: Option<usize>,
    pub source_url: String,
    pub source_timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<reqwest::Proxy>,
    pub prober: ProberConfig,
    pub output: OutputConfig,
    pub silent: bool,
}

impl Config {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            limit: None,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            source_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
            prober: ProberConfig::default(),
            output: OutputConfig::default(),
            silent: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProberConfig {
    pub workers: usize,
    pub timeout: Duration,
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub formats: OutputFormats,
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: OutputFormats::default(),
            directory: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputFormat {
    Json,
    Txt,
    Html,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Txt => "txt",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Non-empty, ordered set of requested output formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormats(Vec<OutputFormat>);

impl OutputFormats {
    /// Falls back to JSON alone when no flag is set.
    pub fn from_flags(json: bool, txt: bool, html: bool) -> Self {
        let formats: Vec<OutputFormat> = [
            (json, OutputFormat::Json),
            (txt, OutputFormat::Txt),
            (html, OutputFormat::Html),
        ]
        .into_iter()
        .filter_map(|(wanted, format)| wanted.then_some(format))
        .collect();

        if formats.is_empty() {
            Self::default()
        } else {
            Self(formats)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = OutputFormat> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, format: OutputFormat) -> bool {
        self.0.contains(&format)
    }
}

impl Default for OutputFormats {
    fn default() -> Self {
        Self(vec![OutputFormat::Json])
    }
}

/// Why a host was classified as down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("unexpected status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("invalid host: {0}")]
    InvalidHost(String),

    #[error("request failed: {0}")]
    Request(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Liveness {
    Up,
    Down(ProbeFailure),
}

impl Liveness {
    pub fn is_up(&self) -> bool {
        matches!(self, Liveness::Up)
    }
}

#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub host: String,
    pub liveness: Liveness,
}

#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    pub results: Vec<ProbeResult>,
    /// Hosts that answered 200, sorted.
    pub live: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RunStats {
    pub candidates: usize,
    pub probed: usize,
    pub live: usize,
    pub files: Vec<PathBuf>,
    pub duration: Duration,
}

#[derive(Debug, Error)]
pub enum SslToolError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Source {source_name} unavailable: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    #[error("Failed to write {path}: {message}")]
    OutputWriteError {
        path: String,
        message: String,
    },
}
