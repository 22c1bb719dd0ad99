//! Sequences, mappings and JSON leaves

use envbind::{FromEnv, Json, Populate};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
struct Limits {
    pub reads: u32,
    pub writes: u32,
}

#[derive(Debug, Default, Populate)]
#[env(prefix = "APP")]
struct Config {
    // Comma separated by default
    pub tags: Vec<String>,

    #[env(",split=:")]
    pub search_path: Vec<String>,

    // Every APP_FEATURES_* variable, keyed by the remainder
    pub features: BTreeMap<String, bool>,

    pub limits: Json<Limits>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_TAGS", "production,api,v2");
    std::env::set_var("APP_SEARCH_PATH", "/usr/local/bin:/usr/bin");
    std::env::set_var("APP_FEATURES_BETA", "true");
    std::env::set_var("APP_FEATURES_LEGACY_LOGIN", "0");
    std::env::set_var("APP_LIMITS", r#"{"reads":100,"writes":10}"#);

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Tags: {:?}", config.tags);
    println!("  Search path: {:?}", config.search_path);
    println!("  Features: {:?}", config.features);
    println!("  Limits: {} reads, {} writes", config.limits.reads, config.limits.writes);

    Ok(())
}
