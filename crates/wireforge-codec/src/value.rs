//! Dynamically typed values for the reference codec.

use wireforge_schema::{Primitive, TypeDescriptor};

/// One field value.
///
/// Enum values carry the variant *name*; the codec maps it to its index.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f32),
    U8(u8),
    U16(u16),
    U32(u32),
    Bool(bool),
    FloatPair(f32, f32),
    Optional(Option<Box<Value>>),
    Enum(String),
}

impl Value {
    pub fn some(inner: Value) -> Self {
        Self::Optional(Some(Box::new(inner)))
    }

    pub fn none() -> Self {
        Self::Optional(None)
    }

    pub fn variant(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Short name of the value's shape, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Float(_) => "float",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::Bool(_) => "bool",
            Self::FloatPair(..) => "float_pair",
            Self::Optional(_) => "optional",
            Self::Enum(_) => "enum",
        }
    }

    /// Whether this value has the shape `ty` describes, ignoring enum
    /// membership.
    pub fn fits(&self, ty: &TypeDescriptor) -> bool {
        match (ty, self) {
            (TypeDescriptor::Primitive(kind), value) => value.fits_primitive(*kind),
            (TypeDescriptor::Optional(_), Self::Optional(None)) => true,
            (TypeDescriptor::Optional(inner), Self::Optional(Some(value))) => value.fits(inner),
            (TypeDescriptor::EnumRef(_), Self::Enum(_)) => true,
            _ => false,
        }
    }

    fn fits_primitive(&self, kind: Primitive) -> bool {
        matches!(
            (kind, self),
            (Primitive::String, Self::String(_))
                | (Primitive::Float, Self::Float(_))
                | (Primitive::U8, Self::U8(_))
                | (Primitive::U16, Self::U16(_))
                | (Primitive::U32, Self::U32(_))
                | (Primitive::Bool, Self::Bool(_))
                | (Primitive::FloatPair, Self::FloatPair(..))
        )
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Self::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::U32(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<(f32, f32)> for Value {
    fn from((a, b): (f32, f32)) -> Self {
        Self::FloatPair(a, b)
    }
}

/// A message instance: which message, plus its field values in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageValue {
    pub name: String,
    pub fields: Vec<Value>,
}

impl MessageValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.fields.push(value.into());
        self
    }
}
