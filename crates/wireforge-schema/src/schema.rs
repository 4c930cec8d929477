//! The schema value graph: enums, categories, messages, fields.
//!
//! Declaration order is the wire format. A message's tag is its zero-based
//! position inside its [`Category`]; an enum variant's byte is its
//! zero-based position inside its [`Enum`]. Inserting or reordering
//! declarations therefore changes every tag after the edit point. Nothing
//! here versions that; it is the caller's responsibility.

use crate::types::TypeDescriptor;

// ---------------------------------------------------------------------------
// Field / Message
// ---------------------------------------------------------------------------

/// One named, typed field of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A message: a name plus its fields in wire order.
///
/// Built with chained calls:
///
/// ```rust
/// use wireforge_schema::{Message, TypeDescriptor};
///
/// let handshake = Message::new("Handshake")
///     .field("client", TypeDescriptor::STRING)
///     .field("session", TypeDescriptor::optional(TypeDescriptor::STRING));
/// assert_eq!(handshake.fields.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Message {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field. Fields are encoded in the order they are added.
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<TypeDescriptor>) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    pub fn is_unit(&self) -> bool {
        self.fields.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A closed set of messages travelling in one direction
/// (e.g. client → server).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub messages: Vec<Message>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    /// Appends a message; its tag is the number of messages before it.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Returns `(tag, message)` pairs in wire order.
    ///
    /// Only the first 256 messages have a tag; [`Schema::lint`](crate::Schema::lint)
    /// reports categories that large.
    pub fn tagged(&self) -> impl Iterator<Item = (u8, &Message)> {
        (0..=u8::MAX).zip(&self.messages)
    }

    /// The wire tag of the first message called `name`.
    pub fn tag_of(&self, name: &str) -> Option<u8> {
        self.tagged()
            .find(|(_, message)| message.name == name)
            .map(|(tag, _)| tag)
    }

    pub fn message_by_tag(&self, tag: u8) -> Option<&Message> {
        self.messages.get(tag as usize)
    }

    pub fn message_named(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|message| message.name == name)
    }
}

// ---------------------------------------------------------------------------
// Enum
// ---------------------------------------------------------------------------

/// A closed set of named values, encoded as a single index byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub variants: Vec<String>,
}

impl Enum {
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn index_of(&self, variant: &str) -> Option<u8> {
        self.variants
            .iter()
            .position(|v| v == variant)
            .and_then(|i| u8::try_from(i).ok())
    }

    /// The variant encoded as `index`, or `None` if out of range.
    pub fn variant(&self, index: u8) -> Option<&str> {
        self.variants.get(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// The root artifact: every enum and category, in declaration order.
///
/// A `Schema` has no mutating methods. Build it with [`Schema::builder`],
/// hand it to the emitters, then drop it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    enums: Vec<Enum>,
    categories: Vec<Category>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn enums(&self) -> &[Enum] {
        &self.enums
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn enum_named(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn category_named(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Collects declarations for a [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    enums: Vec<Enum>,
    categories: Vec<Category>,
}

impl SchemaBuilder {
    pub fn enumeration(mut self, declared: Enum) -> Self {
        self.enums.push(declared);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            enums: self.enums,
            categories: self.categories,
        }
    }
}
