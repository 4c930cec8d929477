//! Field type descriptors.
//!
//! A [`TypeDescriptor`] says how one field is encoded. It is a closed sum
//! type: emitters and the reference codec `match` on it instead of asking
//! each type to render itself, so adding a backend never touches this file.

use std::fmt;

use crate::schema::Enum;

// ---------------------------------------------------------------------------
// Primitive
// ---------------------------------------------------------------------------

/// A fixed primitive encoding.
///
/// The byte layout of each kind is owned by the per-backend header
/// routines (`type_<kind>_serialize` / `type_<kind>_deserialize`):
///
/// | kind        | bytes                               |
/// |-------------|-------------------------------------|
/// | `String`    | 1 length byte, then that many bytes |
/// | `Float`     | 4, big-endian IEEE-754              |
/// | `U8`        | 1                                   |
/// | `U16`       | 2, big-endian                       |
/// | `U32`       | 4, big-endian                       |
/// | `Bool`      | 1, nonzero is `true`                |
/// | `FloatPair` | 8, two `Float`s                     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Float,
    U8,
    U16,
    U32,
    Bool,
    FloatPair,
}

impl Primitive {
    /// Every primitive kind, in declaration order.
    pub const ALL: [Primitive; 7] = [
        Self::String,
        Self::Float,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::Bool,
        Self::FloatPair,
    ];

    /// Encoded size in bytes, or `None` for length-framed kinds.
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            Self::String => None,
            Self::U8 | Self::Bool => Some(1),
            Self::U16 => Some(2),
            Self::Float | Self::U32 => Some(4),
            Self::FloatPair => Some(8),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Float => "float",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::Bool => "bool",
            Self::FloatPair => "float_pair",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// TypeDescriptor
// ---------------------------------------------------------------------------

/// How a field is encoded.
///
/// - `Primitive`: delegated to the header routine for that kind.
/// - `Optional`: one presence byte (`1` present, `0` absent), then the
///   inner encoding only when present. Nesting an `Optional` directly
///   inside another is unsupported.
/// - `EnumRef`: one byte holding the variant index of the named enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    Optional(Box<TypeDescriptor>),
    EnumRef(String),
}

impl TypeDescriptor {
    pub const STRING: Self = Self::Primitive(Primitive::String);
    pub const FLOAT: Self = Self::Primitive(Primitive::Float);
    pub const U8: Self = Self::Primitive(Primitive::U8);
    pub const U16: Self = Self::Primitive(Primitive::U16);
    pub const U32: Self = Self::Primitive(Primitive::U32);
    pub const BOOL: Self = Self::Primitive(Primitive::Bool);
    pub const FLOAT_PAIR: Self = Self::Primitive(Primitive::FloatPair);

    /// Wraps `inner` in a presence byte.
    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// A reference to a declared enum.
    pub fn enum_ref(target: &Enum) -> Self {
        Self::EnumRef(target.name.clone())
    }

    /// A reference to an enum by name, for enums declared later.
    pub fn enum_named(name: impl Into<String>) -> Self {
        Self::EnumRef(name.into())
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

impl From<Primitive> for TypeDescriptor {
    fn from(kind: Primitive) -> Self {
        Self::Primitive(kind)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
            Self::EnumRef(name) => write!(f, "enum {name}"),
        }
    }
}
