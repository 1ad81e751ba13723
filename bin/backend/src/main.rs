//! gamerlink backend binary.
//!
//! Reads `.env` if present, then flags and environment, and serves
//! on BIND_ADDR (e.g. 0.0.0.0:8080).
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = gl_server::Config::parse();
    gl_core::log(&config.log_dir, config.log_level)?;
    gl_server::run(config).await
}
