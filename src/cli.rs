use clap::Parser;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ssl-tool",
    version,
    long_version = LONG_VERSION,
    about = "Fetch subdomains from certificate transparency logs and check which ones are live",
    long_about = "ssl-tool queries crt.sh for certificates issued under a domain, probes every\ndiscovered host over plain HTTP and saves the ones answering 200 as JSON, TXT or HTML."
)]
pub struct Args {
    /// The domain name to check
    #[arg(short = 'u', long = "url", value_name = "DOMAIN")]
    pub url: String,

    /// Number of subdomains to check (default: all)
    #[arg(short = 'l', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Save output as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Save output as TXT
    #[arg(long = "txt")]
    pub txt: bool,

    /// Save output as HTML
    #[arg(long = "html")]
    pub html: bool,

    /// Number of concurrent probes
    #[arg(short = 'w', long = "workers", value_name = "N", default_value_t = 5)]
    pub workers: usize,

    /// Per-probe timeout in seconds
    #[arg(short = 't', long = "timeout", value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Timeout in seconds for the certificate transparency query
    #[arg(long = "source-timeout", value_name = "SECS", default_value_t = 30)]
    pub source_timeout: u64,

    /// Directory the output files are written to
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Proxy URL used for every request (http, https or socks5)
    #[arg(long = "proxy", value_name = "URL")]
    pub proxy: Option<String>,

    /// Silent mode (no banner, status lines or progress bar)
    #[arg(long = "silent")]
    pub silent: bool,

    /// Verbose mode (log every probe outcome)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
