//! Bind environment variables into nested, strongly typed configuration
//!
//! `envbind` walks a configuration struct field by field, derives an
//! environment key for every leaf and parses the value found there into the
//! field's type. Nested structs extend the key, so a deep tree of settings
//! maps naturally onto `APP_DATABASE_POOL_SIZE`-style variables.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(Populate)]` generates the traversal
//! - **Nested**: structs, `Option`/`Box` wrapped structs and flattened fields
//! - **Collections**: delimited sequences (`Vec<T>`) and prefix-scanned
//!   mappings (`HashMap<String, T>`, `BTreeMap<String, T>`)
//! - **In place**: values already in the struct survive when their key is unset
//! - **JSON leaves**: `Json<T>` for anything `serde` can deserialize
//!   (`json` feature, on by default)
//!
//! # Key derivation
//!
//! A field's key is its parent's key, an underscore, and the field name in
//! `UPPER_SNAKE_CASE`. Mixed-case identifiers are split on word boundaries:
//! `CacheHome`, `cache_home` and `cacheHome` all become `CACHE_HOME`.
//!
//! # Example
//!
//! ```rust
//! use envbind::{MapEnv, Populate};
//!
//! #[derive(Debug, Default, Populate)]
//! struct Config {
//!     pub database_url: String,
//!
//!     #[env(",split=:")]
//!     pub search_path: Vec<String>,
//!
//!     pub server: Server,
//! }
//!
//! #[derive(Debug, Default, Populate)]
//! struct Server {
//!     #[env(",required")]
//!     pub port: u16,
//! }
//!
//! let env = MapEnv::from([
//!     ("APP_DATABASE_URL", "postgres://localhost/db"),
//!     ("APP_SEARCH_PATH", "/usr/bin:/bin"),
//!     ("APP_SERVER_PORT", "8080"),
//! ]);
//!
//! let mut config = Config::default();
//! envbind::read_into_with(&env, "app", &mut config).unwrap();
//! assert_eq!(config.database_url, "postgres://localhost/db");
//! assert_eq!(config.search_path, ["/usr/bin", "/bin"]);
//! assert_eq!(config.server.port, 8080);
//! ```
//!
//! # Annotations
//!
//! `#[env("<name>,<option>,...")]` attaches an annotation to a field:
//!
//! - `name`: replace the derived key fragment (`#[env("REDIS_URL")]`)
//! - `required`: fail when the key is unset
//! - `split=<delim>`: sequence delimiter, `,` by default
//! - `skipprefix` / `noprefix`: ignore the parent key, use only this
//!   field's name
//! - `skip` / `-`: leave the field alone
//!
//! `#[env(flatten)]` merges a nested struct's fields into its parent without
//! adding a key segment of its own.
//!
//! ## `#[env(prefix = "APP")]`
//!
//! On the struct itself, sets the root key used by [`FromEnv::from_env`].

extern crate self as envbind;

mod convert;
mod env;
mod error;
#[cfg(feature = "json")]
mod json;
mod name;
mod populate;
mod read;
mod tag;

pub use convert::{convert, converter_for, Element, Kind, Value};
pub use env::{get_or, Environment, MapEnv, ProcessEnv, Vars};
pub use envbind_derive::Populate;
pub use error::{ConvertError, EnvError};
#[cfg(feature = "json")]
pub use json::Json;
pub use name::{derive as derive_name, key_fragment};
pub use populate::{Context, Field, Populate};
pub use read::{read_into, read_into_prefixed, read_into_with, FromEnv};
pub use tag::{Tag, DEFAULT_SPLIT};

// Re-export for callers of `FromEnv`
#[doc(hidden)]
pub use anyhow;
