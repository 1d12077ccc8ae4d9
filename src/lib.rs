//! Typed reads of Kubernetes object annotations.
//!
//! Each `get_map_key_as_*` function distinguishes a missing key from a key
//! whose value is malformed. Malformed values carry an error naming the
//! object and key, ending in ", ignoring": callers are expected to fall back
//! to a default and may log the message.

pub mod annotations;
pub mod context;
pub mod error;
pub mod inspect;
pub mod schema;

pub use annotations::{
    get_map_key_as_bool, get_map_key_as_int, get_map_key_as_string_slice, get_map_key_as_uint16,
    AnnotationReader, AnnotationValue,
};
pub use context::{ObjectContext, ObjectDescription};
pub use error::{AnnotationError, InvalidValue, ParseBoolError};
