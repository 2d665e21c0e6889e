use crate::cli::Args;
use crate::error::Result;
use crate::types::{Config, OutputFormats, SslToolError};
use crate::utils;
use std::time::Duration;

pub fn from_args(args: &Args) -> Result<Config> {
    let domain = utils::normalize_domain(&args.url)
        .ok_or_else(|| SslToolError::InvalidDomain(args.url.clone()))?;
    let mut config = Config::new(domain);

    config.limit = args.limit;
    config.source_timeout = Duration::from_secs(args.source_timeout);
    config.proxy = args.proxy.as_deref().map(parse_proxy).transpose()?;
    config.silent = args.silent;

    config.prober.workers = args.workers;
    config.prober.timeout = Duration::from_secs(args.timeout);

    config.output.formats = OutputFormats::from_flags(args.json, args.txt, args.html);
    config.output.directory = args.output_dir.clone();

    validate_config(&config)?;

    Ok(config)
}

fn parse_proxy(proxy_url: &str) -> Result<reqwest::Proxy> {
    reqwest::Proxy::all(proxy_url)
        .map_err(|e| SslToolError::ConfigError(format!("Invalid proxy URL {}: {}", proxy_url, e)))
}

pub fn validate_config(config: &Config) -> Result<()> {
    if !utils::is_valid_domain(&config.domain) {
        return Err(SslToolError::InvalidDomain(config.domain.clone()));
    }
    if config.limit == Some(0) {
        return Err(SslToolError::ConfigError("Limit must be greater than 0".to_string()));
    }
    if config.prober.workers == 0 {
        return Err(SslToolError::ConfigError("Workers must be greater than 0".to_string()));
    }
    if config.prober.timeout.is_zero() || config.source_timeout.is_zero() {
        return Err(SslToolError::ConfigError("Timeouts must be greater than 0".to_string()));
    }
    Ok(())
}
