//! Error types for the reference codec.

/// Errors that can occur while encoding or decoding against a schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// The input (slice or stream) ended before a value was complete.
    /// On a stream this is indistinguishable from an absent optional
    /// whose presence byte never arrived.
    #[error("input ended before the value was complete")]
    UnexpectedEnd,

    /// The tag byte does not match any message in the category.
    #[error("unknown tag {tag} for category `{category}`")]
    UnknownTag { category: String, tag: u8 },

    /// An enum byte is not below the declared variant count.
    #[error("byte {index} is out of range for enum `{name}` ({count} variants)")]
    EnumOutOfRange { name: String, index: u8, count: usize },

    #[error("no category named `{0}`")]
    UnknownCategory(String),

    #[error("no enum named `{0}`")]
    UnknownEnum(String),

    #[error("category `{category}` has no message `{name}`")]
    UnknownMessage { category: String, name: String },

    #[error("enum `{name}` has no variant `{variant}`")]
    UnknownVariant { name: String, variant: String },

    /// The value carries the wrong number of fields for its message.
    #[error("message `{message}` expects {expected} fields, got {found}")]
    FieldCount {
        message: String,
        expected: usize,
        found: usize,
    },

    /// A value does not match the field's type descriptor.
    #[error("expected {expected}, found {found}")]
    FieldMismatch { expected: String, found: &'static str },

    /// Strings are framed by a single length byte.
    #[error("string of {0} bytes does not fit a one-byte length")]
    StringTooLong(usize),

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("optional values cannot be nested directly")]
    NestedOptional,
}
