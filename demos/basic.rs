//! Basic usage: flat struct, required field, custom key name

use envbind::{FromEnv, Populate};

#[derive(Debug, Default, Populate)]
struct Config {
    #[env(",required")]
    pub database_url: String,

    // Load from REDIS_URL instead of CACHE_URL
    #[env("REDIS_URL")]
    pub cache_url: String,

    pub max_connections: u32,
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("REDIS_URL", "redis://localhost");
    std::env::set_var("MAX_CONNECTIONS", "42");
    std::env::set_var("DEBUG", "true");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Cache URL: {}", config.cache_url);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug: {}", config.debug);

    Ok(())
}
