//! Data-model declarations accepted by the schema resolver.
//!
//! A [`Declaration`] is the input language of the resolver: primitive type
//! markers, literal values, sequences, key-value mappings, structured models
//! and prebuilt schemas. Structured models implement [`ApiModel`] so that the
//! resolver can enumerate the declared field set without any runtime
//! attribute discovery; their identity is the implementing Rust type.

use crate::schema::Schema;
use serde_json::Value;
use std::any::TypeId;

/// A data-model declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// Boolean type marker
    Boolean,
    /// 32-bit integer type marker
    Integer,
    /// Floating-point type marker
    Float,
    /// Text type marker
    Text,
    /// Byte-sequence type marker (base64 on the wire)
    Bytes,
    /// Mutable byte-buffer type marker (raw binary on the wire)
    Binary,
    /// Calendar-date type marker
    Date,
    /// Timestamp type marker
    DateTime,
    /// A literal value; the resolved schema carries it as `default`
    Value(Value),
    /// Ordered sequence of element declarations
    Sequence(Vec<Declaration>),
    /// Key-value mapping, in declaration order
    Mapping(Vec<(String, Declaration)>),
    /// A structured model with named, typed fields
    Model(ModelDecl),
    /// An already-built schema; resolves to itself
    Inline(Box<Schema>),
}

impl Declaration {
    /// Declaration for a structured model type.
    pub fn model<M: ApiModel>() -> Self {
        Declaration::Model(ModelDecl::of::<M>())
    }

    /// Declaration for an ordered sequence of element declarations.
    pub fn sequence(elements: impl IntoIterator<Item = Declaration>) -> Self {
        Declaration::Sequence(elements.into_iter().collect())
    }

    /// Declaration for a key-value mapping, preserving entry order.
    pub fn mapping(
        entries: impl IntoIterator<Item = (impl Into<String>, Declaration)>,
    ) -> Self {
        Declaration::Mapping(
            entries
                .into_iter()
                .map(|(key, declaration)| (key.into(), declaration))
                .collect(),
        )
    }
}

impl From<bool> for Declaration {
    fn from(value: bool) -> Self {
        Declaration::Value(Value::Bool(value))
    }
}

impl From<i32> for Declaration {
    fn from(value: i32) -> Self {
        Declaration::Value(Value::from(value))
    }
}

impl From<i64> for Declaration {
    fn from(value: i64) -> Self {
        Declaration::Value(Value::from(value))
    }
}

impl From<f64> for Declaration {
    fn from(value: f64) -> Self {
        Declaration::Value(Value::from(value))
    }
}

impl From<&str> for Declaration {
    fn from(value: &str) -> Self {
        Declaration::Value(Value::String(value.to_string()))
    }
}

impl From<String> for Declaration {
    fn from(value: String) -> Self {
        Declaration::Value(Value::String(value))
    }
}

impl From<Value> for Declaration {
    fn from(value: Value) -> Self {
        Declaration::Value(value)
    }
}

impl From<Schema> for Declaration {
    fn from(schema: Schema) -> Self {
        Declaration::Inline(Box::new(schema))
    }
}

impl From<ModelDecl> for Declaration {
    fn from(model: ModelDecl) -> Self {
        Declaration::Model(model)
    }
}

/// Implemented by structured data models that expose their declared fields.
///
/// The field list is returned by a plain associated function, so
/// self-referential models are expressible: the descriptor only captures a
/// function pointer and the fields are enumerated lazily during resolution.
///
/// # Example
///
/// ```ignore
/// struct Todo;
///
/// impl ApiModel for Todo {
///     fn model_name() -> &'static str {
///         "Todo"
///     }
///
///     fn model_fields() -> Vec<(&'static str, Declaration)> {
///         vec![
///             ("id", Declaration::Integer),
///             ("done", Declaration::Boolean),
///         ]
///     }
/// }
/// ```
pub trait ApiModel: Sized + 'static {
    /// The component name used when the model is registered.
    fn model_name() -> &'static str;

    /// The declared fields, in declaration order.
    fn model_fields() -> Vec<(&'static str, Declaration)>;

    /// Declaration for this model, usable wherever a field type is expected.
    fn declaration() -> Declaration {
        Declaration::Model(ModelDecl::of::<Self>())
    }
}

/// Descriptor for a structured model declaration.
///
/// Identity is the implementing type's [`TypeId`], so two descriptors of the
/// same model always collapse to a single registered schema regardless of
/// the textual name.
#[derive(Debug, Clone, Copy)]
pub struct ModelDecl {
    name: &'static str,
    identity: TypeId,
    fields: fn() -> Vec<(&'static str, Declaration)>,
}

impl ModelDecl {
    /// Build the descriptor for a model type.
    pub fn of<M: ApiModel>() -> Self {
        Self {
            name: M::model_name(),
            identity: TypeId::of::<M>(),
            fields: M::model_fields,
        }
    }

    /// The model's requested component name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The model's identity.
    pub fn identity(&self) -> TypeId {
        self.identity
    }

    /// Enumerate the declared fields.
    pub fn fields(&self) -> Vec<(&'static str, Declaration)> {
        (self.fields)()
    }
}

impl PartialEq for ModelDecl {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for ModelDecl {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Todo;

    impl ApiModel for Todo {
        fn model_name() -> &'static str {
            "Todo"
        }

        fn model_fields() -> Vec<(&'static str, Declaration)> {
            vec![
                ("id", Declaration::Integer),
                ("done", Declaration::Boolean),
            ]
        }
    }

    struct OtherTodo;

    impl ApiModel for OtherTodo {
        fn model_name() -> &'static str {
            "Todo"
        }

        fn model_fields() -> Vec<(&'static str, Declaration)> {
            vec![("id", Declaration::Integer)]
        }
    }

    #[test]
    fn test_literal_conversions() {
        assert_eq!(Declaration::from(true), Declaration::Value(json!(true)));
        assert_eq!(Declaration::from(5), Declaration::Value(json!(5)));
        assert_eq!(Declaration::from(2.5), Declaration::Value(json!(2.5)));
        assert_eq!(
            Declaration::from("hello"),
            Declaration::Value(json!("hello"))
        );
    }

    #[test]
    fn test_schema_conversion_is_inline() {
        let declaration = Declaration::from(Schema::date());
        match declaration {
            Declaration::Inline(schema) => assert_eq!(*schema, Schema::date()),
            other => panic!("expected inline declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_mapping_builder_preserves_order() {
        let declaration = Declaration::mapping([
            ("first", Declaration::Integer),
            ("second", Declaration::Text),
        ]);
        match declaration {
            Declaration::Mapping(entries) => {
                assert_eq!(entries[0].0, "first");
                assert_eq!(entries[1].0, "second");
            }
            other => panic!("expected mapping declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_model_identity_is_the_type_not_the_name() {
        let todo = ModelDecl::of::<Todo>();
        let same = ModelDecl::of::<Todo>();
        let other = ModelDecl::of::<OtherTodo>();

        assert_eq!(todo, same);
        // Same textual name, different types.
        assert_eq!(todo.name(), other.name());
        assert_ne!(todo, other);
    }

    #[test]
    fn test_model_declaration_enumerates_fields() {
        let declaration = Todo::declaration();
        match declaration {
            Declaration::Model(model) => {
                let fields = model.fields();
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].0, "id");
                assert_eq!(fields[1].0, "done");
            }
            other => panic!("expected model declaration, got {:?}", other),
        }
    }
}
