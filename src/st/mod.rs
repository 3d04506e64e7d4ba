//! Serialized-type (ST) binary codec
//!
//! A field is a 1-3 byte header naming its (type code, field code) pair,
//! followed by a payload whose shape depends on the type. Objects always
//! serialize their fields in ascending canonical order so that hashes and
//! signatures are deterministic.

mod field;
mod json;
mod object;
mod reader;
mod writer;

pub use field::FieldId;
pub use object::{Path, PathStep, StObject, StValue};
pub use reader::{decode_variable_length, StReader};
pub use writer::{encode_variable_length, StWriter, MAX_LENGTH_VALUE};
