// src/lib.rs
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod prober;
pub mod session;
pub mod sources;
pub mod types;
pub mod utils;

pub use cli::Args;
pub use engine::Engine;
pub use types::{Config, Liveness, OutputFormat, ProbeFailure, RunStats, SslToolError};
