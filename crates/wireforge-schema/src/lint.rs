//! Advisory schema checks.
//!
//! Wireforge does not reject malformed schemas: duplicate names or empty
//! categories simply produce undefined output. [`Schema::lint`] lists the
//! problems it can see so the generator can log them before emitting.

use std::collections::HashSet;

use crate::schema::Schema;
use crate::types::TypeDescriptor;
use crate::MAX_TAGS;

/// Parameter names of the generated `serialize` / `deserialize` routines.
const RESERVED_FIELD_NAMES: [&str; 3] = ["out", "buf", "index"];

/// A problem found by [`Schema::lint`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaWarning {
    #[error("duplicate {kind} name `{name}`")]
    DuplicateName { kind: &'static str, name: String },

    #[error("category `{0}` has no messages")]
    EmptyCategory(String),

    #[error("enum `{0}` has no variants")]
    EmptyEnum(String),

    /// More declarations than a single tag byte can address.
    #[error("`{name}` declares {count} entries, more than fit in one byte")]
    TagOverflow { name: String, count: usize },

    #[error("field `{message}.{field}` nests an optional inside an optional")]
    NestedOptional { message: String, field: String },

    /// The field name collides with a parameter of the generated routines.
    #[error("field `{message}.{field}` shadows a generated codec parameter")]
    ReservedFieldName { message: String, field: String },

    #[error("field `{message}.{field}` references undeclared enum `{target}`")]
    UnknownEnum {
        message: String,
        field: String,
        target: String,
    },
}

impl Schema {
    /// Runs every check and returns the findings in declaration order.
    pub fn lint(&self) -> Vec<SchemaWarning> {
        let mut warnings = Vec::new();

        duplicates(&mut warnings, "enum", self.enums().iter().map(|e| e.name.as_str()));
        duplicates(
            &mut warnings,
            "category",
            self.categories().iter().map(|c| c.name.as_str()),
        );

        for declared in self.enums() {
            if declared.is_empty() {
                warnings.push(SchemaWarning::EmptyEnum(declared.name.clone()));
            }
            if declared.len() > MAX_TAGS {
                warnings.push(SchemaWarning::TagOverflow {
                    name: declared.name.clone(),
                    count: declared.len(),
                });
            }
            duplicates(&mut warnings, "variant", declared.variants.iter().map(String::as_str));
        }

        for category in self.categories() {
            if category.messages.is_empty() {
                warnings.push(SchemaWarning::EmptyCategory(category.name.clone()));
            }
            if category.messages.len() > MAX_TAGS {
                warnings.push(SchemaWarning::TagOverflow {
                    name: category.name.clone(),
                    count: category.messages.len(),
                });
            }
            duplicates(
                &mut warnings,
                "message",
                category.messages.iter().map(|m| m.name.as_str()),
            );

            for message in &category.messages {
                duplicates(&mut warnings, "field", message.fields.iter().map(|f| f.name.as_str()));
                for field in &message.fields {
                    if RESERVED_FIELD_NAMES.contains(&field.name.as_str()) {
                        warnings.push(SchemaWarning::ReservedFieldName {
                            message: message.name.clone(),
                            field: field.name.clone(),
                        });
                    }
                    self.check_type(&mut warnings, &message.name, &field.name, &field.ty);
                }
            }
        }

        warnings
    }

    fn check_type(
        &self,
        warnings: &mut Vec<SchemaWarning>,
        message: &str,
        field: &str,
        ty: &TypeDescriptor,
    ) {
        match ty {
            TypeDescriptor::Primitive(_) => {}
            TypeDescriptor::Optional(inner) => {
                if inner.is_optional() {
                    warnings.push(SchemaWarning::NestedOptional {
                        message: message.to_string(),
                        field: field.to_string(),
                    });
                }
                self.check_type(warnings, message, field, inner);
            }
            TypeDescriptor::EnumRef(target) => {
                if self.enum_named(target).is_none() {
                    warnings.push(SchemaWarning::UnknownEnum {
                        message: message.to_string(),
                        field: field.to_string(),
                        target: target.clone(),
                    });
                }
            }
        }
    }
}

fn duplicates<'a>(
    warnings: &mut Vec<SchemaWarning>,
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            warnings.push(SchemaWarning::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
}
