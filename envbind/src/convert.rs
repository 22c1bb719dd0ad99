//! String-to-value conversion for every supported primitive kind

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{ConvertError, EnvError};

/// Primitive kind a raw environment string can be converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bool,
    /// Any shape the registry has no converter for.
    Unsupported(&'static str),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Bool => "bool",
            Kind::Unsupported(name) => *name,
        };
        f.write_str(name)
    }
}

/// A converted value, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Bool(bool),
}

/// Look up the converter for `kind`.
///
/// Unsupported kinds get a converter that always fails.
pub fn converter_for(kind: Kind) -> impl Fn(&str) -> Result<Value, ConvertError> {
    move |raw| convert(kind, raw)
}

/// Convert `raw` into a value of `kind`.
pub fn convert(kind: Kind, raw: &str) -> Result<Value, ConvertError> {
    let value = match kind {
        Kind::String => Value::String(raw.to_owned()),
        Kind::I8 => Value::I8(raw.parse()?),
        Kind::I16 => Value::I16(raw.parse()?),
        Kind::I32 => Value::I32(raw.parse()?),
        Kind::I64 => Value::I64(raw.parse()?),
        Kind::Isize => Value::Isize(raw.parse()?),
        Kind::U8 => Value::U8(raw.parse()?),
        Kind::U16 => Value::U16(raw.parse()?),
        Kind::U32 => Value::U32(raw.parse()?),
        Kind::U64 => Value::U64(raw.parse()?),
        Kind::Usize => Value::Usize(raw.parse()?),
        Kind::F32 => Value::F32(raw.parse()?),
        Kind::F64 => Value::F64(raw.parse()?),
        Kind::Bool => Value::Bool(parse_bool(raw)?),
        Kind::Unsupported(_) => return Err(ConvertError::Unsupported(kind)),
    };
    Ok(value)
}

fn parse_bool(raw: &str) -> Result<bool, ConvertError> {
    if raw == "1" || raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw == "0" || raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConvertError::Bool(raw.to_owned()))
    }
}

/// A type that can be produced by the converter registry.
///
/// Sequence elements, mapping values and primitive leaves are all
/// `Element`s.
pub trait Element: Sized {
    /// Registry key for this type.
    const KIND: Kind;

    /// Extract `Self` from a converted value of kind [`Element::KIND`].
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const KIND: Kind = Kind::$kind;

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$kind(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_element! {
    String => String,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

// Nested collections have no single-string form; their converter always fails.
impl<T> Element for Vec<T> {
    const KIND: Kind = Kind::Unsupported("sequence");

    fn from_value(_: Value) -> Option<Self> {
        None
    }
}

impl<K, V, S> Element for HashMap<K, V, S> {
    const KIND: Kind = Kind::Unsupported("mapping");

    fn from_value(_: Value) -> Option<Self> {
        None
    }
}

impl<K, V> Element for BTreeMap<K, V> {
    const KIND: Kind = Kind::Unsupported("mapping");

    fn from_value(_: Value) -> Option<Self> {
        None
    }
}

/// Convert the raw value read from `key` into `T`.
pub(crate) fn decode<T: Element>(key: &str, raw: &str) -> Result<T, EnvError> {
    let value = converter_for(T::KIND)(raw)
        .map_err(|e| EnvError::conversion(key, std::any::type_name::<T>(), e))?;
    T::from_value(value).ok_or_else(|| EnvError::unsupported(T::KIND))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_literals() {
        let cases = [
            ("hello", Kind::String, Value::String("hello".to_string())),
            ("1.1", Kind::F32, Value::F32(1.1)),
            ("1.2", Kind::F64, Value::F64(1.2)),
            ("1e3", Kind::F64, Value::F64(1000.0)),
            ("true", Kind::Bool, Value::Bool(true)),
            ("FALSE", Kind::Bool, Value::Bool(false)),
            ("1", Kind::Bool, Value::Bool(true)),
            ("0", Kind::Bool, Value::Bool(false)),
            ("-9", Kind::I8, Value::I8(-9)),
            ("9", Kind::I16, Value::I16(9)),
            ("9", Kind::I32, Value::I32(9)),
            ("9", Kind::I64, Value::I64(9)),
            ("9", Kind::Isize, Value::Isize(9)),
            ("255", Kind::U8, Value::U8(255)),
            ("9", Kind::U16, Value::U16(9)),
            ("9", Kind::U32, Value::U32(9)),
            ("9", Kind::U64, Value::U64(9)),
            ("9", Kind::Usize, Value::Usize(9)),
        ];

        for (raw, kind, expected) in cases {
            let value = converter_for(kind)(raw)
                .unwrap_or_else(|e| panic!("{raw:?} as {kind} failed: {e}"));
            assert_eq!(value, expected, "{raw:?} as {kind}");
        }
    }

    #[test]
    fn test_invalid_literals() {
        let cases = [
            ("1.0", Kind::Isize),
            ("-1", Kind::Usize),
            ("-1", Kind::U8),
            ("hello", Kind::F64),
            ("", Kind::Bool),
            ("yes", Kind::Bool),
            ("2", Kind::Bool),
            ("300", Kind::U8),
            ("128", Kind::I8),
            ("99999999999999999999", Kind::U64),
            ("", Kind::Unsupported("any")),
        ];

        for (raw, kind) in cases {
            assert!(
                converter_for(kind)(raw).is_err(),
                "expected {raw:?} as {kind} to fail"
            );
        }
    }

    #[test]
    fn test_unsupported_kind_reports_itself() {
        let err = convert(Kind::Unsupported("sequence"), "a,b").unwrap_err();
        assert_eq!(err.to_string(), "unsupported kind sequence");
    }

    #[test]
    fn test_decode_typed() {
        let port: u16 = decode("PORT", "8080").unwrap();
        assert_eq!(port, 8080);

        let err = decode::<u16>("PORT", "eighty").unwrap_err();
        assert!(matches!(err, EnvError::ConversionFailed { type_name: "u16", .. }));

        let err = decode::<Vec<String>>("LIST", "a").unwrap_err();
        assert!(matches!(err, EnvError::UnsupportedKind { .. }));
    }
}
