//! Entry points

use std::any::type_name;

use anyhow::Context as _;

use crate::env::{Environment, ProcessEnv};
use crate::error::EnvError;
use crate::populate::{Context, Populate};

/// Populate `target` from the process environment without a key prefix.
///
/// # Errors
///
/// Returns the first error encountered. Fields populated before the failure
/// keep their new values.
pub fn read_into<T: Populate + ?Sized>(target: &mut T) -> Result<(), EnvError> {
    read_into_with(&ProcessEnv, "", target)
}

/// Populate `target` from the process environment, using `prefix`
/// (uppercased) as the root key segment.
pub fn read_into_prefixed<T: Populate + ?Sized>(prefix: &str, target: &mut T) -> Result<(), EnvError> {
    read_into_with(&ProcessEnv, prefix, target)
}

/// Populate `target` from an arbitrary [`Environment`].
pub fn read_into_with<T: Populate + ?Sized>(
    env: &dyn Environment,
    prefix: &str,
    target: &mut T,
) -> Result<(), EnvError> {
    let key = prefix.to_uppercase();
    log::debug!("populating {} from environment (prefix {key:?})", type_name::<T>());

    let result = target.populate(&Context::new(env), &key, None);
    if let Err(e) = &result {
        log::debug!("populating {} failed: {e}", type_name::<T>());
    }
    result
}

/// Construct a value from the environment.
///
/// Implemented for every [`Populate`] type with a [`Default`]: the default
/// value is populated in place and returned.
///
/// ```rust
/// use envbind::{FromEnv, Populate};
///
/// #[derive(Debug, Default, Populate)]
/// #[env(prefix = "MYAPP")]
/// struct Config {
///     #[env("PORT,required")]
///     port: u16,
///     debug: bool,
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// #     std::env::set_var("MYAPP_PORT", "3000");
/// let config = Config::from_env()?;
/// assert_eq!(config.port, 3000);
/// #     Ok(())
/// # }
/// ```
pub trait FromEnv: Populate + Default + Sized {
    /// Load from the process environment using the type's declared prefix.
    fn from_env() -> anyhow::Result<Self> {
        Self::from_env_prefixed(Self::PREFIX)
    }

    /// Load from the process environment using `prefix`.
    fn from_env_prefixed(prefix: &str) -> anyhow::Result<Self> {
        Self::from_environment(&ProcessEnv, prefix)
    }

    /// Load from `env` using `prefix`.
    fn from_environment(env: &dyn Environment, prefix: &str) -> anyhow::Result<Self> {
        let mut value = Self::default();
        read_into_with(env, prefix, &mut value)
            .with_context(|| format!("failed to load {} from environment", type_name::<Self>()))?;
        Ok(value)
    }
}

impl<T: Populate + Default> FromEnv for T {}
