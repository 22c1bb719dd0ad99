//! Access to environment variables

use std::collections::BTreeMap;
use std::env;

/// Iterator over `(key, value)` pairs yielded by an [`Environment`].
pub type Vars<'a> = Box<dyn Iterator<Item = (String, String)> + 'a>;

/// Source of environment variables.
///
/// The environment is treated as an immutable snapshot for the duration of a
/// populate call.
pub trait Environment {
    /// Look up a single key.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Enumerate every key/value pair.
    fn vars(&self) -> Vars<'_>;

    /// Enumerate the entries under `key`.
    ///
    /// With an empty `key` every entry is yielded unchanged. Otherwise only
    /// entries starting with `key` followed by `_` are yielded, with that
    /// prefix stripped.
    fn scan<'a>(&'a self, key: &str) -> Vars<'a> {
        if key.is_empty() {
            return self.vars();
        }

        let prefix = format!("{key}_");
        Box::new(self.vars().filter_map(move |(name, value)| {
            name.strip_prefix(&prefix)
                .map(|stripped| (stripped.to_owned(), value))
        }))
    }

    /// Look up `key`, falling back to `default` or an empty string.
    fn get_or(&self, key: &str, default: Option<&str>) -> String {
        self.lookup(key)
            .or_else(|| default.map(str::to_owned))
            .unwrap_or_default()
    }
}

/// The environment of the current process.
///
/// Variables whose name or value is not valid unicode are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                log::debug!("ignoring non-unicode value of {key:?}");
                None
            }
        }
    }

    fn vars(&self) -> Vars<'_> {
        Box::new(env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        }))
    }
}

/// An in-memory environment snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv(BTreeMap<String, String>);

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    pub fn capture() -> Self {
        ProcessEnv.vars().collect()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }
}

impl Environment for MapEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn vars(&self) -> Vars<'_> {
        Box::new(self.0.iter().map(|(k, v)| (k.clone(), v.clone())))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for MapEnv {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Read `key` from the process environment, falling back to `default` or an
/// empty string when it is not set.
pub fn get_or(key: &str, default: Option<&str>) -> String {
    ProcessEnv.get_or(key, default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn xdg() -> MapEnv {
        MapEnv::from([
            ("XDG_CACHE_HOME", "x"),
            ("XDG_CONFIG_DIRS", "/usr:/usr/local"),
            ("XDGNOT", "skipped"),
            ("HOME", "/root"),
        ])
    }

    #[test]
    fn test_scan_strips_prefix() {
        let env = xdg();
        let entries: Vec<_> = env.scan("XDG").collect();
        assert_eq!(
            entries,
            vec![
                ("CACHE_HOME".to_string(), "x".to_string()),
                ("CONFIG_DIRS".to_string(), "/usr:/usr/local".to_string()),
            ]
        );
    }

    #[test]
    fn test_scan_without_key_yields_everything() {
        let env = xdg();
        assert_eq!(env.scan("").count(), 4);
    }

    #[test]
    fn test_scan_is_restartable() {
        let env = xdg();
        assert_eq!(env.scan("XDG").count(), 2);
        assert_eq!(env.scan("XDG").count(), 2);
    }

    #[test]
    fn test_map_env_get_or() {
        let env = xdg();
        assert_eq!(env.get_or("HOME", Some("/tmp")), "/root");
        assert_eq!(env.get_or("MISSING", Some("/tmp")), "/tmp");
        assert_eq!(env.get_or("MISSING", None), "");
    }

    #[test]
    #[serial]
    fn test_get_or_process_env() {
        env::remove_var("ENVBIND_NOT_HERE");
        assert_eq!(get_or("ENVBIND_NOT_HERE", Some("fallback")), "fallback");
        assert_eq!(get_or("ENVBIND_NOT_HERE", None), "");

        env::set_var("ENVBIND_HERE", "value");
        assert_eq!(get_or("ENVBIND_HERE", Some("fallback")), "value");
        env::remove_var("ENVBIND_HERE");
    }

    #[test]
    #[serial]
    fn test_process_env_scan() {
        env::set_var("ENVBIND_SCAN_ONE", "1");
        env::set_var("ENVBIND_SCAN_TWO", "2");

        let mut entries: Vec<_> = ProcessEnv.scan("ENVBIND_SCAN").collect();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                ("ONE".to_string(), "1".to_string()),
                ("TWO".to_string(), "2".to_string()),
            ]
        );

        env::remove_var("ENVBIND_SCAN_ONE");
        env::remove_var("ENVBIND_SCAN_TWO");
    }

    #[test]
    #[serial]
    fn test_capture_snapshot() {
        env::set_var("ENVBIND_CAPTURED", "yes");
        let snapshot = MapEnv::capture();
        env::remove_var("ENVBIND_CAPTURED");

        assert_eq!(snapshot.lookup("ENVBIND_CAPTURED").as_deref(), Some("yes"));
        assert_eq!(ProcessEnv.lookup("ENVBIND_CAPTURED"), None);
    }
}
