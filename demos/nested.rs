//! Nested structs, flattened fields and optional sections

use envbind::{FromEnv, Populate};

#[derive(Debug, Default, Populate)]
struct Common {
    pub log_level: String,
}

#[derive(Debug, Default, Populate)]
struct Database {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Default, Populate)]
struct Tls {
    pub cert_path: String,
}

#[derive(Debug, Default, Populate)]
#[env(prefix = "SHOP")]
struct Config {
    // SHOP_LOG_LEVEL, no COMMON segment
    #[env(flatten)]
    pub common: Common,

    // SHOP_DATABASE_HOST, SHOP_DATABASE_PORT
    pub database: Database,

    // Always allocated, even with no SHOP_TLS_* variables set
    pub tls: Option<Tls>,

    // Ignores the SHOP prefix entirely
    #[env("HOSTNAME,skipprefix")]
    pub hostname: String,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("SHOP_LOG_LEVEL", "debug");
    std::env::set_var("SHOP_DATABASE_HOST", "db.internal");
    std::env::set_var("SHOP_DATABASE_PORT", "5432");
    std::env::set_var("HOSTNAME", "shop-7f9c");

    let config = Config::from_env()?;

    println!("{config:#?}");

    Ok(())
}
