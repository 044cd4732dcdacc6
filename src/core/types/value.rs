//! Typed value enum and the fixed type-name table
//!
//! `ValueType` is the single source of truth for the name, byte width and
//! encoding of every supported primitive. Both the encode and decode paths
//! consult it, so the two can never drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of primitive types readable from process memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
}

impl ValueType {
    /// All supported types, in table order
    pub const ALL: [ValueType; 11] = [
        ValueType::I8,
        ValueType::I16,
        ValueType::I32,
        ValueType::I64,
        ValueType::U8,
        ValueType::U16,
        ValueType::U32,
        ValueType::U64,
        ValueType::F32,
        ValueType::F64,
        ValueType::Bool,
    ];

    /// Looks up a type by its external identifier
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "i8" => Some(ValueType::I8),
            "i16" => Some(ValueType::I16),
            "i32" => Some(ValueType::I32),
            "i64" => Some(ValueType::I64),
            "u8" => Some(ValueType::U8),
            "u16" => Some(ValueType::U16),
            "u32" => Some(ValueType::U32),
            "u64" => Some(ValueType::U64),
            "f32" => Some(ValueType::F32),
            "f64" => Some(ValueType::F64),
            "bool" => Some(ValueType::Bool),
            _ => None,
        }
    }

    /// The external identifier for this type
    pub const fn name(&self) -> &'static str {
        match self {
            ValueType::I8 => "i8",
            ValueType::I16 => "i16",
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::U8 => "u8",
            ValueType::U16 => "u16",
            ValueType::U32 => "u32",
            ValueType::U64 => "u64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::Bool => "bool",
        }
    }

    /// Fixed byte width of this type's encoding
    pub const fn size(&self) -> usize {
        match self {
            ValueType::I8 | ValueType::U8 | ValueType::Bool => 1,
            ValueType::I16 | ValueType::U16 => 2,
            ValueType::I32 | ValueType::U32 | ValueType::F32 => 4,
            ValueType::I64 | ValueType::U64 | ValueType::F64 => 8,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded primitive value, tagged with its type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
}

impl TypedValue {
    /// The type tag for this value
    pub const fn value_type(&self) -> ValueType {
        match self {
            TypedValue::I8(_) => ValueType::I8,
            TypedValue::I16(_) => ValueType::I16,
            TypedValue::I32(_) => ValueType::I32,
            TypedValue::I64(_) => ValueType::I64,
            TypedValue::U8(_) => ValueType::U8,
            TypedValue::U16(_) => ValueType::U16,
            TypedValue::U32(_) => ValueType::U32,
            TypedValue::U64(_) => ValueType::U64,
            TypedValue::F32(_) => ValueType::F32,
            TypedValue::F64(_) => ValueType::F64,
            TypedValue::Bool(_) => ValueType::Bool,
        }
    }

    /// Size in bytes of the encoded value
    pub const fn size(&self) -> usize {
        self.value_type().size()
    }

    /// Encodes the value to its fixed-width little-endian layout
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            TypedValue::I8(v) => v.to_le_bytes().to_vec(),
            TypedValue::I16(v) => v.to_le_bytes().to_vec(),
            TypedValue::I32(v) => v.to_le_bytes().to_vec(),
            TypedValue::I64(v) => v.to_le_bytes().to_vec(),
            TypedValue::U8(v) => v.to_le_bytes().to_vec(),
            TypedValue::U16(v) => v.to_le_bytes().to_vec(),
            TypedValue::U32(v) => v.to_le_bytes().to_vec(),
            TypedValue::U64(v) => v.to_le_bytes().to_vec(),
            TypedValue::F32(v) => v.to_le_bytes().to_vec(),
            TypedValue::F64(v) => v.to_le_bytes().to_vec(),
            TypedValue::Bool(v) => vec![*v as u8],
        }
    }

    /// Decodes a value of the given type from exactly `ty.size()` bytes
    pub fn from_bytes(bytes: &[u8], ty: ValueType) -> Option<Self> {
        if bytes.len() != ty.size() {
            return None;
        }

        let value = match ty {
            ValueType::I8 => TypedValue::I8(bytes[0] as i8),
            ValueType::I16 => TypedValue::I16(i16::from_le_bytes([bytes[0], bytes[1]])),
            ValueType::I32 => TypedValue::I32(i32::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ])),
            ValueType::I64 => TypedValue::I64(i64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ])),
            ValueType::U8 => TypedValue::U8(bytes[0]),
            ValueType::U16 => TypedValue::U16(u16::from_le_bytes([bytes[0], bytes[1]])),
            ValueType::U32 => TypedValue::U32(u32::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ])),
            ValueType::U64 => TypedValue::U64(u64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ])),
            ValueType::F32 => TypedValue::F32(f32::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ])),
            ValueType::F64 => TypedValue::F64(f64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ])),
            ValueType::Bool => TypedValue::Bool(bytes[0] != 0),
        };

        Some(value)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::I8(v) => write!(f, "{}", v),
            TypedValue::I16(v) => write!(f, "{}", v),
            TypedValue::I32(v) => write!(f, "{}", v),
            TypedValue::I64(v) => write!(f, "{}", v),
            TypedValue::U8(v) => write!(f, "{}", v),
            TypedValue::U16(v) => write!(f, "{}", v),
            TypedValue::U32(v) => write!(f, "{}", v),
            TypedValue::U64(v) => write!(f, "{}", v),
            TypedValue::F32(v) => write!(f, "{}", v),
            TypedValue::F64(v) => write!(f, "{}", v),
            TypedValue::Bool(v) => write!(f, "{}", v),
        }
    }
}
