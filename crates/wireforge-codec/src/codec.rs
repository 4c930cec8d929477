//! Schema-driven encoder and decoders.

use futures_util::stream::Stream;
use wireforge_schema::{Category, Enum, Message, Schema, TypeDescriptor};

use crate::primitive;
use crate::{CodecError, MessageValue, Value};

/// Encodes and decodes [`MessageValue`]s exactly as generated code does.
///
/// ## Example
///
/// ```rust
/// use wireforge_codec::{MessageValue, Value, WireCodec};
/// use wireforge_schema::{Category, Message, Schema, TypeDescriptor};
///
/// let schema = Schema::builder()
///     .category(Category::new("ToServerMsg").message(
///         Message::new("Handshake")
///             .field("client", TypeDescriptor::STRING)
///             .field("session", TypeDescriptor::optional(TypeDescriptor::STRING)),
///     ))
///     .build();
/// let codec = WireCodec::new(&schema);
///
/// let msg = MessageValue::new("Handshake").with("web").with(Value::none());
/// let bytes = codec.encode_message("ToServerMsg", &msg).unwrap();
/// assert_eq!(bytes, vec![0, 3, b'w', b'e', b'b', 0]);
///
/// let mut index = 0;
/// let decoded = codec.decode_message("ToServerMsg", &bytes, &mut index).unwrap();
/// assert_eq!(decoded, msg);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WireCodec<'s> {
    schema: &'s Schema,
}

impl<'s> WireCodec<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    fn category(&self, name: &str) -> Result<&'s Category, CodecError> {
        self.schema
            .category_named(name)
            .ok_or_else(|| CodecError::UnknownCategory(name.to_string()))
    }

    fn enumeration(&self, name: &str) -> Result<&'s Enum, CodecError> {
        self.schema
            .enum_named(name)
            .ok_or_else(|| CodecError::UnknownEnum(name.to_string()))
    }

    fn message_for_tag(&self, category: &'s Category, tag: u8) -> Result<&'s Message, CodecError> {
        category
            .message_by_tag(tag)
            .ok_or_else(|| CodecError::UnknownTag {
                category: category.name.clone(),
                tag,
            })
    }

    fn variant_for_index(&self, declared: &Enum, index: u8) -> Result<Value, CodecError> {
        declared
            .variant(index)
            .map(Value::variant)
            .ok_or_else(|| CodecError::EnumOutOfRange {
                name: declared.name.clone(),
                index,
                count: declared.len(),
            })
    }

    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    /// Encodes `message` as its tag byte followed by each field in order.
    pub fn encode_message(&self, category: &str, message: &MessageValue) -> Result<Vec<u8>, CodecError> {
        let category = self.category(category)?;
        let tag = category
            .tag_of(&message.name)
            .ok_or_else(|| CodecError::UnknownMessage {
                category: category.name.clone(),
                name: message.name.clone(),
            })?;
        let declared = self.message_for_tag(category, tag)?;
        if declared.fields.len() != message.fields.len() {
            return Err(CodecError::FieldCount {
                message: declared.name.clone(),
                expected: declared.fields.len(),
                found: message.fields.len(),
            });
        }

        // Shape is checked for every field up front so a mismatch names the
        // whole field type, not the innermost part that failed.
        if let Some((field, value)) = declared
            .fields
            .iter()
            .zip(&message.fields)
            .find(|(field, value)| !value.fits(&field.ty))
        {
            return Err(CodecError::FieldMismatch {
                expected: field.ty.to_string(),
                found: value.kind(),
            });
        }

        let mut out = vec![tag];
        for (field, value) in declared.fields.iter().zip(&message.fields) {
            self.encode_value(&field.ty, value, &mut out)?;
        }
        Ok(out)
    }

    /// Appends the encoding of `value` as type `ty` to `out`.
    pub fn encode_value(&self, ty: &TypeDescriptor, value: &Value, out: &mut Vec<u8>) -> Result<(), CodecError> {
        match (ty, value) {
            (TypeDescriptor::Primitive(kind), value) => primitive::write(*kind, value, out),
            (TypeDescriptor::Optional(_), Value::Optional(None)) => {
                out.push(0);
                Ok(())
            }
            (TypeDescriptor::Optional(inner), Value::Optional(Some(value))) => {
                if inner.is_optional() {
                    return Err(CodecError::NestedOptional);
                }
                out.push(1);
                self.encode_value(inner, value, out)
            }
            (TypeDescriptor::EnumRef(name), Value::Enum(variant)) => {
                out.push(self.encode_enum(name, variant)?);
                Ok(())
            }
            (ty, value) => Err(CodecError::FieldMismatch {
                expected: ty.to_string(),
                found: value.kind(),
            }),
        }
    }

    /// The index byte of `variant` within enum `name`.
    pub fn encode_enum(&self, name: &str, variant: &str) -> Result<u8, CodecError> {
        let declared = self.enumeration(name)?;
        declared
            .index_of(variant)
            .ok_or_else(|| CodecError::UnknownVariant {
                name: declared.name.clone(),
                variant: variant.to_string(),
            })
    }

    // -----------------------------------------------------------------------
    // Cursor decoding
    // -----------------------------------------------------------------------

    /// Decodes one message of `category` from `buf`, starting at and
    /// advancing `index`.
    pub fn decode_message(&self, category: &str, buf: &[u8], index: &mut usize) -> Result<MessageValue, CodecError> {
        let category = self.category(category)?;
        let tag = primitive::read_byte(buf, index)?;
        let declared = self.message_for_tag(category, tag)?;

        // Fields are variable-length, so each one must finish before the
        // next can start.
        let mut fields = Vec::with_capacity(declared.fields.len());
        for field in &declared.fields {
            fields.push(self.decode_value(&field.ty, buf, index)?);
        }
        tracing::trace!(category = %category.name, tag, message = %declared.name, "decoded message");
        Ok(MessageValue {
            name: declared.name.clone(),
            fields,
        })
    }

    pub fn decode_value(&self, ty: &TypeDescriptor, buf: &[u8], index: &mut usize) -> Result<Value, CodecError> {
        match ty {
            TypeDescriptor::Primitive(kind) => primitive::read(*kind, buf, index),
            TypeDescriptor::Optional(inner) => {
                if primitive::read_byte(buf, index)? == 0 {
                    return Ok(Value::none());
                }
                if inner.is_optional() {
                    return Err(CodecError::NestedOptional);
                }
                Ok(Value::some(self.decode_value(inner, buf, index)?))
            }
            TypeDescriptor::EnumRef(name) => {
                let byte = primitive::read_byte(buf, index)?;
                self.decode_enum(name, byte)
            }
        }
    }

    /// Maps an index byte back to a variant of enum `name`.
    pub fn decode_enum(&self, name: &str, byte: u8) -> Result<Value, CodecError> {
        let declared = self.enumeration(name)?;
        self.variant_for_index(declared, byte)
    }

    // -----------------------------------------------------------------------
    // Stream decoding
    // -----------------------------------------------------------------------

    /// Decodes one message of `category`, awaiting bytes from `stream`.
    ///
    /// Fails with [`CodecError::UnexpectedEnd`] if the stream finishes
    /// before the message does.
    pub async fn decode_message_from<S>(&self, category: &str, stream: &mut S) -> Result<MessageValue, CodecError>
    where
        S: Stream<Item = u8> + Unpin,
    {
        let category = self.category(category)?;
        let tag = primitive::next_byte(stream).await?;
        let declared = self.message_for_tag(category, tag)?;

        let mut fields = Vec::with_capacity(declared.fields.len());
        for field in &declared.fields {
            fields.push(self.decode_value_from(&field.ty, stream).await?);
        }
        Ok(MessageValue {
            name: declared.name.clone(),
            fields,
        })
    }

    pub async fn decode_value_from<S>(&self, ty: &TypeDescriptor, stream: &mut S) -> Result<Value, CodecError>
    where
        S: Stream<Item = u8> + Unpin,
    {
        match ty {
            TypeDescriptor::Optional(inner) => {
                if primitive::next_byte(stream).await? == 0 {
                    return Ok(Value::none());
                }
                Ok(Value::some(self.decode_leaf_from(inner, stream).await?))
            }
            leaf => self.decode_leaf_from(leaf, stream).await,
        }
    }

    async fn decode_leaf_from<S>(&self, ty: &TypeDescriptor, stream: &mut S) -> Result<Value, CodecError>
    where
        S: Stream<Item = u8> + Unpin,
    {
        match ty {
            TypeDescriptor::Primitive(kind) => primitive::read_async(*kind, stream).await,
            TypeDescriptor::EnumRef(name) => {
                let byte = primitive::next_byte(stream).await?;
                self.decode_enum(name, byte)
            }
            TypeDescriptor::Optional(_) => Err(CodecError::NestedOptional),
        }
    }
}
