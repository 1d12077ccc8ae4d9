use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::annotations::{
    get_map_key_as_bool, get_map_key_as_int, get_map_key_as_string_slice, get_map_key_as_uint16,
    AnnotationValue,
};
use crate::context::ObjectContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Bool,
    #[serde(alias = "int")]
    Integer,
    Uint16,
    #[serde(alias = "string-slice")]
    Strings,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Bool => "bool",
            ValueType::Integer => "integer",
            ValueType::Uint16 => "uint16",
            ValueType::Strings => "strings",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeySpecError {
    #[error("expected KEY=TYPE, got {0:?}")]
    MissingType(String),

    #[error("empty annotation key in {0:?}")]
    EmptyKey(String),

    #[error("unknown value type {0:?}, expected one of bool, integer, uint16, strings")]
    UnknownType(String),
}

impl FromStr for ValueType {
    type Err = KeySpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bool" => Ok(ValueType::Bool),
            "integer" | "int" => Ok(ValueType::Integer),
            "uint16" => Ok(ValueType::Uint16),
            "strings" | "string-slice" => Ok(ValueType::Strings),
            other => Err(KeySpecError::UnknownType(other.to_string())),
        }
    }
}

/// An annotation key and the type its value is read as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeySpec {
    pub key: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

/// `KEY=TYPE`. Annotation keys never contain '=', so the last one splits.
impl FromStr for KeySpec {
    type Err = KeySpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value_type) = s
            .rsplit_once('=')
            .ok_or_else(|| KeySpecError::MissingType(s.to_string()))?;
        if key.is_empty() {
            return Err(KeySpecError::EmptyKey(s.to_string()));
        }
        Ok(KeySpec {
            key: key.to_string(),
            value_type: value_type.parse()?,
        })
    }
}

/// The result of evaluating a [`KeySpec`] against one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub key: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub found: bool,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn inspection<T: Default + Into<Value>>(spec: &KeySpec, result: AnnotationValue<T>) -> Inspection {
    let (value, found, error) = result.into_parts();
    Inspection {
        key: spec.key.clone(),
        value_type: spec.value_type,
        found,
        value: value.into(),
        error: error.map(|err| err.to_string()),
    }
}

impl KeySpec {
    pub fn evaluate<C>(&self, annotations: &BTreeMap<String, String>, context: &C) -> Inspection
    where
        C: ObjectContext + ?Sized,
    {
        match self.value_type {
            ValueType::Bool => {
                inspection(self, get_map_key_as_bool(annotations, &self.key, context))
            }
            ValueType::Integer => {
                inspection(self, get_map_key_as_int(annotations, &self.key, context))
            }
            ValueType::Uint16 => {
                inspection(self, get_map_key_as_uint16(annotations, &self.key, context))
            }
            ValueType::Strings => inspection(
                self,
                get_map_key_as_string_slice(annotations, &self.key, context),
            ),
        }
    }
}
