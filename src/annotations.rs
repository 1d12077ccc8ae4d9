use std::collections::BTreeMap;

use kube::{Resource, ResourceExt};
use tracing::warn;

use crate::context::ObjectContext;
use crate::error::{AnnotationError, InvalidValue, ParseBoolError};

/// The outcome of looking up a single annotation.
///
/// `Absent` and `Invalid` are kept apart: callers that only want a value can
/// use [`AnnotationValue::value`], callers that need to know whether the user
/// set the key at all look at [`AnnotationValue::found`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue<T> {
    Absent,
    Found(T),
    Invalid(AnnotationError),
}

impl<T> AnnotationValue<T> {
    /// True when the key exists in the map, whether or not it parsed.
    pub fn found(&self) -> bool {
        !matches!(self, AnnotationValue::Absent)
    }

    pub fn error(&self) -> Option<&AnnotationError> {
        match self {
            AnnotationValue::Invalid(err) => Some(err),
            _ => None,
        }
    }

    pub fn ok(self) -> Result<Option<T>, AnnotationError> {
        match self {
            AnnotationValue::Absent => Ok(None),
            AnnotationValue::Found(value) => Ok(Some(value)),
            AnnotationValue::Invalid(err) => Err(err),
        }
    }

    /// Drops an invalid value after logging it.
    pub fn or_warn(self) -> Option<T> {
        match self {
            AnnotationValue::Absent => None,
            AnnotationValue::Found(value) => Some(value),
            AnnotationValue::Invalid(err) => {
                warn!(key = err.key(), "{}", err);
                None
            }
        }
    }
}

impl<T: Default> AnnotationValue<T> {
    pub fn value(self) -> T {
        match self {
            AnnotationValue::Found(value) => value,
            _ => T::default(),
        }
    }

    /// Splits into `(value, found, error)`, with the default value standing in
    /// for absent and invalid entries.
    pub fn into_parts(self) -> (T, bool, Option<AnnotationError>) {
        match self {
            AnnotationValue::Absent => (T::default(), false, None),
            AnnotationValue::Found(value) => (value, true, None),
            AnnotationValue::Invalid(err) => (T::default(), true, Some(err)),
        }
    }
}

fn lookup<T, C, F>(
    annotations: &BTreeMap<String, String>,
    key: &str,
    context: &C,
    expected: &'static str,
    parse: F,
) -> AnnotationValue<T>
where
    C: ObjectContext + ?Sized,
    F: FnOnce(&str) -> Result<T, InvalidValue>,
{
    let Some(raw) = annotations.get(key) else {
        return AnnotationValue::Absent;
    };
    match parse(raw) {
        Ok(value) => AnnotationValue::Found(value),
        Err(cause) => AnnotationValue::Invalid(AnnotationError::Malformed {
            kind: context.kind(),
            namespace: context.namespace(),
            name: context.name(),
            key: key.to_string(),
            expected,
            cause,
        }),
    }
}

pub(crate) fn parse_bool(value: &str) -> Result<bool, ParseBoolError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseBoolError {
            value: value.to_string(),
        }),
    }
}

fn parse_decimal<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    value: &str,
) -> Result<T, InvalidValue> {
    value.parse::<T>().map_err(|source| InvalidValue::Int {
        value: value.to_string(),
        source,
    })
}

// Unsigned values take no sign. ParseIntError has no public constructor, so a
// leading '+' is reported through a text that fails the same way.
fn parse_unsigned_decimal(value: &str) -> Result<u16, InvalidValue> {
    let digits = if value.starts_with('+') { "x" } else { value };
    digits.parse::<u16>().map_err(|source| InvalidValue::Int {
        value: value.to_string(),
        source,
    })
}

pub fn get_map_key_as_bool<C>(
    annotations: &BTreeMap<String, String>,
    key: &str,
    context: &C,
) -> AnnotationValue<bool>
where
    C: ObjectContext + ?Sized,
{
    lookup(annotations, key, context, "bool", |raw| {
        parse_bool(raw).map_err(InvalidValue::from)
    })
}

/// Base-10 `i64`, an optional leading sign is allowed.
pub fn get_map_key_as_int<C>(
    annotations: &BTreeMap<String, String>,
    key: &str,
    context: &C,
) -> AnnotationValue<i64>
where
    C: ObjectContext + ?Sized,
{
    lookup(annotations, key, context, "integer", parse_decimal::<i64>)
}

pub fn get_map_key_as_uint16<C>(
    annotations: &BTreeMap<String, String>,
    key: &str,
    context: &C,
) -> AnnotationValue<u16>
where
    C: ObjectContext + ?Sized,
{
    lookup(
        annotations,
        key,
        context,
        "unsigned 16 bit integer",
        parse_unsigned_decimal,
    )
}

/// Splits the value on ','. Segments are neither trimmed nor filtered, so an
/// empty value yields a single empty string.
pub fn get_map_key_as_string_slice<C>(
    annotations: &BTreeMap<String, String>,
    key: &str,
    _context: &C,
) -> AnnotationValue<Vec<String>>
where
    C: ObjectContext + ?Sized,
{
    match annotations.get(key) {
        Some(raw) => AnnotationValue::Found(raw.split(',').map(str::to_string).collect()),
        None => AnnotationValue::Absent,
    }
}

/// An annotation map paired with the object it came from.
pub struct AnnotationReader<'a, C: ?Sized> {
    annotations: &'a BTreeMap<String, String>,
    context: &'a C,
}

impl<'a, C> AnnotationReader<'a, C>
where
    C: ObjectContext + ?Sized,
{
    pub fn new(annotations: &'a BTreeMap<String, String>, context: &'a C) -> Self {
        Self {
            annotations,
            context,
        }
    }

    pub fn bool(&self, key: &str) -> AnnotationValue<bool> {
        get_map_key_as_bool(self.annotations, key, self.context)
    }

    pub fn int(&self, key: &str) -> AnnotationValue<i64> {
        get_map_key_as_int(self.annotations, key, self.context)
    }

    pub fn uint16(&self, key: &str) -> AnnotationValue<u16> {
        get_map_key_as_uint16(self.annotations, key, self.context)
    }

    pub fn string_slice(&self, key: &str) -> AnnotationValue<Vec<String>> {
        get_map_key_as_string_slice(self.annotations, key, self.context)
    }
}

impl<'a, K> AnnotationReader<'a, K>
where
    K: Resource<DynamicType = ()>,
{
    pub fn for_resource(object: &'a K) -> Self {
        Self::new(object.annotations(), object)
    }
}
