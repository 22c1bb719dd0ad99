//! The recursive population engine.
//!
//! Every type that can be bound to the environment implements [`Populate`].
//! Leaves (primitives, strings, sequences, mappings) read from the key they
//! are handed. Composite nodes, normally generated by
//! `#[derive(Populate)]`, hand each of their fields to [`Context::field`],
//! which composes the child key and recurses.

use std::any::{type_name, Any};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::convert::{decode, Element};
use crate::env::Environment;
use crate::error::EnvError;
use crate::name;
use crate::tag::{self, Tag};

/// A value that can be populated in place from environment variables.
pub trait Populate {
    /// Root key used by [`FromEnv::from_env`](crate::FromEnv::from_env).
    const PREFIX: &'static str = "";

    /// Populate `self` from the environment entries found at `key`.
    ///
    /// `tag` is the parsed annotation of the field being populated, if it
    /// had one.
    fn populate(&mut self, cx: &Context<'_>, key: &str, tag: Option<&Tag>)
        -> Result<(), EnvError>;
}

/// State threaded through a single populate call.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    env: &'a dyn Environment,
    depth: usize,
}

impl<'a> Context<'a> {
    pub fn new(env: &'a dyn Environment) -> Self {
        Self { env, depth: 0 }
    }

    pub fn env(&self) -> &'a dyn Environment {
        self.env
    }

    /// Number of composite levels above the value being populated.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn descend(&self) -> Self {
        Self {
            env: self.env,
            depth: self.depth + 1,
        }
    }

    /// Look up a single key.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let value = self.env.lookup(key);
        log::trace!(
            "lookup {key:?}: {}",
            if value.is_some() { "found" } else { "absent" }
        );
        value
    }

    /// Populate one field of a composite value.
    ///
    /// Parses the field's annotation, skips it if asked to, composes the
    /// field's key from `parent_key` and recurses into `target`.
    pub fn field<T>(
        &self,
        parent_key: &str,
        field: &Field,
        target: &mut T,
    ) -> Result<(), EnvError>
    where
        T: Populate + ?Sized,
    {
        let tag = field.tag()?;
        if tag.as_ref().is_some_and(|t| t.skip) {
            log::trace!("skipping field {}", field.ident);
            return Ok(());
        }

        let key = field.key(parent_key, tag.as_ref());
        log::trace!("[{}] field {} -> {key:?}", self.depth, field.ident);
        target.populate(&self.descend(), &key, tag.as_ref())
    }
}

/// Description of one field of a composite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Field identifier as written in the source.
    pub ident: &'static str,
    /// The field is flattened into its parent and contributes no key segment.
    pub embedded: bool,
    /// Raw annotation string.
    pub annotation: Option<&'static str>,
}

impl Field {
    pub const fn new(ident: &'static str) -> Self {
        Self {
            ident,
            embedded: false,
            annotation: None,
        }
    }

    pub const fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub const fn annotated(mut self, annotation: &'static str) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Parse the annotation. An absent or empty annotation yields `None`.
    pub fn tag(&self) -> Result<Option<Tag>, EnvError> {
        match self.annotation {
            Some(raw) if !raw.is_empty() => Tag::parse(raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Compose the key of this field below `parent_key`.
    pub fn key(&self, parent_key: &str, tag: Option<&Tag>) -> String {
        let name = match tag.map(|t| t.name.as_str()).filter(|n| !n.is_empty()) {
            Some(name) => name.to_uppercase(),
            None if self.embedded => String::new(),
            None => name::key_fragment(self.ident),
        };

        if parent_key.is_empty() || tag.is_some_and(|t| t.skip_prefix) {
            name
        } else if name.is_empty() {
            parent_key.to_owned()
        } else {
            format!("{parent_key}_{name}")
        }
    }
}

fn missing(key: &str, tag: Option<&Tag>) -> Result<(), EnvError> {
    if tag::is_required(tag) {
        Err(EnvError::required(key))
    } else {
        Ok(())
    }
}

macro_rules! impl_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Populate for $ty {
                fn populate(
                    &mut self,
                    cx: &Context<'_>,
                    key: &str,
                    tag: Option<&Tag>,
                ) -> Result<(), EnvError> {
                    match cx.lookup(key) {
                        Some(raw) => {
                            *self = decode(key, &raw)?;
                            Ok(())
                        }
                        None => missing(key, tag),
                    }
                }
            }
        )*
    };
}

impl_leaf!(String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool);

impl<T: Element> Populate for Vec<T> {
    fn populate(&mut self, cx: &Context<'_>, key: &str, tag: Option<&Tag>) -> Result<(), EnvError> {
        let Some(raw) = cx.lookup(key) else {
            return missing(key, tag);
        };

        *self = raw
            .split(tag::delimiter(tag))
            .map(|piece| decode(key, piece))
            .collect::<Result<Vec<T>, EnvError>>()?;
        Ok(())
    }
}

fn read_mapping<V, M>(cx: &Context<'_>, key: &str) -> Result<M, EnvError>
where
    V: Element,
    M: Default + Extend<(String, V)>,
{
    let mut map = M::default();
    let mut count = 0usize;
    for (name, raw) in cx.env().scan(key) {
        let value = if key.is_empty() {
            decode::<V>(&name, &raw)?
        } else {
            decode::<V>(&format!("{key}_{name}"), &raw)?
        };
        map.extend(Some((name, value)));
        count += 1;
    }
    log::trace!("mapping {key:?}: {count} entries");
    Ok(map)
}

// Mappings have no required semantics: no matching entry yields an empty map.
impl<V, S> Populate for HashMap<String, V, S>
where
    V: Element,
    S: BuildHasher + Default,
{
    fn populate(&mut self, cx: &Context<'_>, key: &str, _: Option<&Tag>) -> Result<(), EnvError> {
        *self = read_mapping::<V, _>(cx, key)?;
        Ok(())
    }
}

impl<V: Element> Populate for BTreeMap<String, V> {
    fn populate(&mut self, cx: &Context<'_>, key: &str, _: Option<&Tag>) -> Result<(), EnvError> {
        *self = read_mapping::<V, _>(cx, key)?;
        Ok(())
    }
}

impl<T, const N: usize> Populate for [T; N] {
    fn populate(&mut self, _: &Context<'_>, _: &str, _: Option<&Tag>) -> Result<(), EnvError> {
        Err(EnvError::unsupported(format_args!(
            "{} (arrays are unimplemented)",
            type_name::<Self>()
        )))
    }
}

/// Optional values are always materialized: `None` becomes
/// `Some(T::default())` before recursing, whether or not any key below it is
/// set.
impl<T: Populate + Default> Populate for Option<T> {
    const PREFIX: &'static str = T::PREFIX;

    fn populate(&mut self, cx: &Context<'_>, key: &str, tag: Option<&Tag>) -> Result<(), EnvError> {
        self.get_or_insert_with(T::default).populate(cx, key, tag)
    }
}

impl<T: Populate + ?Sized> Populate for Box<T> {
    const PREFIX: &'static str = T::PREFIX;

    fn populate(&mut self, cx: &Context<'_>, key: &str, tag: Option<&Tag>) -> Result<(), EnvError> {
        (**self).populate(cx, key, tag)
    }
}

impl<T: Populate + ?Sized> Populate for &mut T {
    const PREFIX: &'static str = T::PREFIX;

    fn populate(&mut self, cx: &Context<'_>, key: &str, tag: Option<&Tag>) -> Result<(), EnvError> {
        (**self).populate(cx, key, tag)
    }
}

impl<T: ?Sized> Populate for &T {
    fn populate(&mut self, _: &Context<'_>, _: &str, _: Option<&Tag>) -> Result<(), EnvError> {
        Err(EnvError::InvalidTarget {
            type_name: type_name::<Self>(),
        })
    }
}

impl Populate for dyn Any {
    fn populate(&mut self, _: &Context<'_>, _: &str, _: Option<&Tag>) -> Result<(), EnvError> {
        Err(EnvError::unsupported("any"))
    }
}
