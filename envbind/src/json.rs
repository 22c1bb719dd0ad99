//! JSON-encoded leaves

use std::any::type_name;
use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;

use crate::error::EnvError;
use crate::populate::{Context, Populate};
use crate::tag::{self, Tag};

/// A leaf whose environment value is parsed as JSON.
///
/// Useful for structured values that have no natural delimited form:
///
/// ```rust
/// use envbind::{Json, MapEnv, Populate};
/// use std::collections::HashMap;
///
/// #[derive(Default, Populate)]
/// struct Config {
///     limits: Json<HashMap<String, u32>>,
/// }
///
/// let env = MapEnv::from([("LIMITS", r#"{"reads":10,"writes":2}"#)]);
/// let mut config = Config::default();
/// envbind::read_into_with(&env, "", &mut config).unwrap();
/// assert_eq!(config.limits["writes"], 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: DeserializeOwned> Populate for Json<T> {
    fn populate(&mut self, cx: &Context<'_>, key: &str, tag: Option<&Tag>) -> Result<(), EnvError> {
        match cx.lookup(key) {
            Some(raw) => {
                self.0 = serde_json::from_str(&raw)
                    .map_err(|e| EnvError::conversion(key, type_name::<T>(), e.into()))?;
                Ok(())
            }
            None if tag::is_required(tag) => Err(EnvError::required(key)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Database {
        host: String,
        port: u16,
    }

    #[test]
    fn test_json_leaf() {
        let env = MapEnv::from([("DB", r#"{"host":"localhost","port":5432}"#)]);
        let mut db: Json<Database> = Json::default();
        db.populate(&Context::new(&env), "DB", None).unwrap();
        assert_eq!(
            db.into_inner(),
            Database {
                host: "localhost".to_string(),
                port: 5432
            }
        );
    }

    #[test]
    fn test_json_leaf_malformed() {
        let env = MapEnv::from([("TAGS", "[1, 2")]);
        let mut tags: Json<Vec<u8>> = Json::default();
        let err = tags.populate(&Context::new(&env), "TAGS", None).unwrap_err();
        assert!(matches!(err, EnvError::ConversionFailed { .. }));
    }

    #[test]
    fn test_json_leaf_required() {
        let env = MapEnv::new();
        let tag = Tag::parse(",required").unwrap();
        let mut tags: Json<Vec<u8>> = Json::default();

        tags.populate(&Context::new(&env), "TAGS", None).unwrap();
        assert!(tags.is_empty());

        let err = tags
            .populate(&Context::new(&env), "TAGS", Some(&tag))
            .unwrap_err();
        assert!(matches!(err, EnvError::RequiredMissing { .. }));
    }
}
