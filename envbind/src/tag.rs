//! Field annotation parsing.
//!
//! An annotation has the form `<name>[,<option>[=<value>]]*`. The leading
//! segment (possibly empty) overrides the derived key fragment. Recognized
//! options are `required`, `split=<delim>`, `skipprefix` (alias `noprefix`)
//! and `skip` (alias `-`). Unknown options are ignored.

use crate::error::EnvError;

/// Delimiter used to split sequence values when no `split` option is given.
pub const DEFAULT_SPLIT: &str = ",";

/// Parsed form of a field annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Explicit key override. Empty means "derive from the field name".
    pub name: String,
    /// Fail when the key is absent.
    pub required: bool,
    /// Sequence delimiter, `None` for [`DEFAULT_SPLIT`].
    pub split: Option<String>,
    /// Discard the accumulated prefix for this field and its descendants.
    pub skip_prefix: bool,
    /// Ignore the field entirely.
    pub skip: bool,
}

impl Tag {
    /// Parse a raw annotation string.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidAnnotation`] when `split` is given without a
    /// delimiter.
    pub fn parse(raw: &str) -> Result<Self, EnvError> {
        let mut segments = raw.split(',');
        let mut tag = Tag {
            name: segments.next().unwrap_or_default().to_owned(),
            ..Tag::default()
        };

        for segment in segments {
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) if !key.is_empty() => (key, value),
                _ => (segment, ""),
            };

            match key.to_ascii_lowercase().as_str() {
                "required" => tag.required = true,
                "split" => {
                    if value.is_empty() {
                        return Err(EnvError::InvalidAnnotation {
                            annotation: raw.to_owned(),
                            reason: "must specify a split string e.g. split=,".to_owned(),
                        });
                    }
                    tag.split = Some(value.to_owned());
                }
                "skipprefix" | "noprefix" => tag.skip_prefix = true,
                "-" | "skip" => tag.skip = true,
                other => log::trace!("ignoring unknown annotation option {other:?}"),
            }
        }

        Ok(tag)
    }

    /// Delimiter for splitting sequence values.
    pub fn delimiter(&self) -> &str {
        self.split.as_deref().unwrap_or(DEFAULT_SPLIT)
    }
}

/// Delimiter for an optional directive.
pub(crate) fn delimiter(tag: Option<&Tag>) -> &str {
    tag.map_or(DEFAULT_SPLIT, Tag::delimiter)
}

pub(crate) fn is_required(tag: Option<&Tag>) -> bool {
    tag.is_some_and(|t| t.required)
}
