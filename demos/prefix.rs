//! Populating in place with a runtime prefix

use envbind::Populate;

#[derive(Debug, Populate)]
struct Config {
    pub database_url: String,
    pub api_key: String,
    pub port: u16,
}

fn main() -> anyhow::Result<()> {
    // Variables will be prefixed: MYAPP_DATABASE_URL, MYAPP_API_KEY, MYAPP_PORT
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("MYAPP_API_KEY", "secret-key-123");

    // Values already present survive when their variable is unset
    let mut config = Config {
        database_url: String::new(),
        api_key: String::new(),
        port: 8080,
    };
    envbind::read_into_prefixed("myapp", &mut config)?;

    println!("Configuration with prefix 'MYAPP':");
    println!("  Database URL: {}", config.database_url);
    println!("  API Key: {}", config.api_key);
    println!("  Port: {}", config.port);

    Ok(())
}
