use clap::Parser;

/// Startup configuration. Every flag falls back to its environment
/// variable, so a `.env` file loaded beforehand is enough to run.
#[derive(Debug, Clone, Parser)]
#[command(name = "gamerlink", version, about = "gamerlink social backend")]
pub struct Config {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080", env = "BIND_ADDR")]
    pub bind: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DB_URL")]
    pub db_url: String,

    /// HS256 signing secret for identity tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// The single origin allowed to make credentialed requests
    #[arg(long, default_value = "http://localhost:3000", env = "CORS_ORIGIN")]
    pub cors_origin: String,

    /// Argon2 iteration count
    #[arg(long, default_value_t = 2, env = "HASH_COST")]
    pub hash_cost: u32,

    /// HTTP worker threads
    #[arg(long, default_value_t = 6, env = "WORKERS")]
    pub workers: usize,

    /// Directory for log files
    #[arg(long, default_value = "logs", env = "LOG_DIR")]
    pub log_dir: String,

    /// Terminal log level
    #[arg(long, default_value_t = log::LevelFilter::Info, env = "LOG_LEVEL")]
    pub log_level: log::LevelFilter,
}
