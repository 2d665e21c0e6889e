use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use ssl_tool::{config, Args, Engine};

const BANNER: &str = r#"
           _       _              _
  ___ ___ | |     | |_ ___   ___ | |
 (_-<(_-< | |  _  |  _/ _ \ / _ \| |
 /__//__/ |_| (_)  \__\___/ \___/|_|

   crt.sh subdomains, checked for life
"#;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);

    if !args.silent {
        println!("{}", BANNER);
    }

    let config = config::from_args(&args).context("Invalid arguments")?;
    let engine = Engine::new(config)?;

    let stats = engine.run().await?;

    info!(
        "Completed {}: {} candidates, {} probed, {} live, {} files in {:.2}s",
        engine.config().domain,
        stats.candidates,
        stats.probed,
        stats.live,
        stats.files.len(),
        stats.duration.as_secs_f64()
    );

    Ok(())
}

fn init_logger(args: &Args) {
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else if args.silent {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
