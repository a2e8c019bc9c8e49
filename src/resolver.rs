//! Declaration-to-schema resolution.
//!
//! Resolution happens at registration time: every declaration handed to the
//! registry is turned into a concrete [`Schema`] immediately, and any model
//! encountered along the way lands in the component registry. This keeps the
//! later document build a pure read.
//!
//! Models are resolved by claiming their component name before their fields
//! are visited. A model whose fields lead back to itself therefore finds its
//! own name already registered and resolves to a reference instead of
//! recursing without end.

use crate::components::ComponentRegistry;
use crate::declaration::{Declaration, ModelDecl};
use crate::schema::Schema;
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

/// Resolves declarations against a component registry.
pub struct SchemaResolver<'a> {
    components: &'a mut ComponentRegistry,
}

impl<'a> SchemaResolver<'a> {
    /// Create a resolver writing into the given registry
    pub fn new(components: &'a mut ComponentRegistry) -> Self {
        Self { components }
    }

    /// Resolve a declaration into a schema.
    ///
    /// Every declaration resolves to something; unrepresentable literals
    /// degrade to an empty, unconstrained schema.
    pub fn resolve(&mut self, declaration: &Declaration) -> Schema {
        match declaration {
            Declaration::Boolean => Schema::boolean(),
            Declaration::Integer => Schema::integer(),
            Declaration::Float => Schema::float(),
            Declaration::Text => Schema::string(),
            Declaration::Bytes => Schema::byte(),
            Declaration::Binary => Schema::binary(),
            Declaration::Date => Schema::date(),
            Declaration::DateTime => Schema::date_time(),
            Declaration::Value(value) => self.resolve_value(value),
            Declaration::Sequence(items) => self.resolve_sequence(items),
            Declaration::Mapping(entries) => {
                let mut properties = IndexMap::new();
                for (name, entry) in entries {
                    properties.insert(name.clone(), self.resolve(entry));
                }
                Schema::object(properties)
            }
            Declaration::Model(model) => self.resolve_model(model),
            Declaration::Inline(schema) => (**schema).clone(),
        }
    }

    /// An empty sequence only records that the value may be null; a single
    /// element types the array items; several elements become a oneOf over
    /// the alternatives, in declaration order.
    fn resolve_sequence(&mut self, items: &[Declaration]) -> Schema {
        match items {
            [] => Schema::empty().nullable(),
            [single] => Schema::array(self.resolve(single)),
            many => {
                let alternatives = many.iter().map(|item| self.resolve(item)).collect();
                Schema::array(Schema::one_of(alternatives))
            }
        }
    }

    /// Example values carry their literal as the schema default.
    fn resolve_value(&mut self, value: &Value) -> Schema {
        match value {
            Value::Null => {
                debug!("Null literal resolves to an unconstrained schema");
                Schema::empty()
            }
            Value::Bool(flag) => Schema::boolean().with_default(Value::Bool(*flag)),
            Value::Number(number) => {
                let schema = if number.is_i64() || number.is_u64() {
                    Schema::integer()
                } else {
                    Schema::float()
                };
                schema.with_default(Value::Number(number.clone()))
            }
            Value::String(text) => Schema::string().with_default(Value::String(text.clone())),
            Value::Array(items) => match items.as_slice() {
                [] => Schema::empty().nullable(),
                [single] => Schema::array(self.resolve_value(single)),
                many => {
                    let alternatives = many.iter().map(|item| self.resolve_value(item)).collect();
                    Schema::array(Schema::one_of(alternatives))
                }
            },
            Value::Object(entries) => {
                let mut properties = IndexMap::new();
                for (name, entry) in entries {
                    properties.insert(name.clone(), self.resolve_value(entry));
                }
                Schema::object(properties)
            }
        }
    }

    fn resolve_model(&mut self, model: &ModelDecl) -> Schema {
        // A name already on file means the model was fully resolved earlier,
        // or is being resolved right now further up the stack. Either way a
        // reference is the right answer.
        if let Some(name) = self.components.schema_name(model.identity()) {
            debug!("Model {} already registered, emitting reference", name);
            return Schema::reference(name);
        }

        let name = self
            .components
            .claim_schema_name(model.identity(), model.name());
        debug!("Resolving model {} ({} fields)", name, model.fields().len());

        let mut properties = IndexMap::new();
        for (field_name, field_declaration) in model.fields() {
            properties.insert(field_name.to_string(), self.resolve(&field_declaration));
        }

        let schema = Schema::object(properties);
        self.components.fill_schema(&name, schema.clone());
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::ApiModel;
    use serde_json::json;

    fn resolve_one(declaration: Declaration) -> (Schema, ComponentRegistry) {
        let mut registry = ComponentRegistry::new();
        let schema = SchemaResolver::new(&mut registry).resolve(&declaration);
        (schema, registry)
    }

    struct Todo;

    impl ApiModel for Todo {
        fn model_name() -> &'static str {
            "Todo"
        }

        fn model_fields() -> Vec<(&'static str, Declaration)> {
            vec![
                ("id", Declaration::Integer),
                ("done", Declaration::Boolean),
                ("text", Declaration::Text),
            ]
        }
    }

    struct TreeNode;

    impl ApiModel for TreeNode {
        fn model_name() -> &'static str {
            "TreeNode"
        }

        fn model_fields() -> Vec<(&'static str, Declaration)> {
            vec![
                ("label", Declaration::Text),
                ("children", Declaration::sequence([TreeNode::declaration()])),
            ]
        }
    }

    #[test]
    fn test_primitive_markers() {
        let cases = [
            (Declaration::Boolean, json!({"type": "boolean"})),
            (
                Declaration::Integer,
                json!({"type": "integer", "format": "int32"}),
            ),
            (
                Declaration::Float,
                json!({"type": "number", "format": "float"}),
            ),
            (Declaration::Text, json!({"type": "string"})),
            (
                Declaration::Bytes,
                json!({"type": "string", "format": "byte"}),
            ),
            (
                Declaration::Binary,
                json!({"type": "string", "format": "binary"}),
            ),
            (
                Declaration::Date,
                json!({"type": "string", "format": "date"}),
            ),
            (
                Declaration::DateTime,
                json!({"type": "string", "format": "date-time"}),
            ),
        ];

        for (declaration, expected) in cases {
            let (schema, _) = resolve_one(declaration);
            assert_eq!(serde_json::to_value(&schema).unwrap(), expected);
        }
    }

    #[test]
    fn test_empty_sequence_is_nullable_without_type() {
        let (schema, _) = resolve_one(Declaration::sequence([]));
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value, json!({"nullable": true}));
    }

    #[test]
    fn test_single_element_sequence_types_the_items() {
        let (schema, _) = resolve_one(Declaration::sequence([Declaration::Integer]));
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["type"], json!("array"));
        assert_eq!(value["items"]["type"], json!("integer"));
    }

    #[test]
    fn test_multi_element_sequence_becomes_one_of() {
        let (schema, _) = resolve_one(Declaration::sequence([
            Declaration::Integer,
            Declaration::Text,
            Declaration::Integer,
        ]));
        let value = serde_json::to_value(&schema).unwrap();

        let alternatives = value["items"]["oneOf"].as_array().unwrap();
        assert_eq!(alternatives.len(), 3);
        assert_eq!(alternatives[0]["type"], json!("integer"));
        assert_eq!(alternatives[1]["type"], json!("string"));
        // Duplicates are preserved as declared.
        assert_eq!(alternatives[2]["type"], json!("integer"));
    }

    #[test]
    fn test_literals_carry_defaults() {
        let (schema, _) = resolve_one(Declaration::from(true));
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({"type": "boolean", "default": true}));

        let (schema, _) = resolve_one(Declaration::from(42));
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({"type": "integer", "format": "int32", "default": 42})
        );

        let (schema, _) = resolve_one(Declaration::from(2.5));
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({"type": "number", "format": "float", "default": 2.5})
        );

        let (schema, _) = resolve_one(Declaration::from("pending"));
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({"type": "string", "default": "pending"}));
    }

    #[test]
    fn test_null_literal_degrades_to_empty_schema() {
        let (schema, _) = resolve_one(Declaration::Value(Value::Null));
        assert_eq!(serde_json::to_value(&schema).unwrap(), json!({}));
    }

    #[test]
    fn test_literal_object_resolves_per_entry() {
        let (schema, _) = resolve_one(Declaration::from(json!({"limit": 10, "name": "x"})));
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["type"], json!("object"));
        assert_eq!(value["properties"]["limit"]["default"], json!(10));
        assert_eq!(value["properties"]["name"]["default"], json!("x"));
    }

    #[test]
    fn test_mapping_preserves_declared_order() {
        let (schema, _) = resolve_one(Declaration::mapping([
            ("zebra", Declaration::Text),
            ("apple", Declaration::Integer),
        ]));
        let text = serde_json::to_string(&schema).unwrap();

        let zebra = text.find("zebra").unwrap();
        let apple = text.find("apple").unwrap();
        assert!(zebra < apple);
    }

    #[test]
    fn test_first_model_resolution_expands() {
        let (schema, registry) = resolve_one(Todo::declaration());
        let value = serde_json::to_value(&schema).unwrap();

        // The first resolution hands back the expanded object schema.
        assert_eq!(value["type"], json!("object"));
        assert_eq!(value["properties"]["id"]["format"], json!("int32"));

        let stored = serde_json::to_value(registry.schemas().get("Todo").unwrap()).unwrap();
        assert_eq!(stored, value);
    }

    #[test]
    fn test_second_model_resolution_is_a_reference() {
        let mut registry = ComponentRegistry::new();
        let declaration = Todo::declaration();

        SchemaResolver::new(&mut registry).resolve(&declaration);
        let second = SchemaResolver::new(&mut registry).resolve(&declaration);

        assert_eq!(second, Schema::reference("Todo"));
        assert_eq!(registry.schemas().len(), 1);
    }

    #[test]
    fn test_self_referential_model_terminates() {
        let (schema, registry) = resolve_one(TreeNode::declaration());
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(
            value["properties"]["children"]["items"]["$ref"],
            json!("#/components/schemas/TreeNode")
        );
        assert_eq!(registry.schemas().len(), 1);

        let stored = serde_json::to_value(registry.schemas().get("TreeNode").unwrap()).unwrap();
        assert_eq!(stored, value);
    }

    #[test]
    fn test_nested_models_register_both() {
        struct TodoList;

        impl ApiModel for TodoList {
            fn model_name() -> &'static str {
                "TodoList"
            }

            fn model_fields() -> Vec<(&'static str, Declaration)> {
                vec![
                    ("limit", Declaration::Integer),
                    ("items", Declaration::sequence([Todo::declaration()])),
                ]
            }
        }

        let (schema, registry) = resolve_one(TodoList::declaration());
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(
            value["properties"]["items"]["items"]["$ref"],
            json!("#/components/schemas/Todo")
        );
        assert_eq!(registry.schemas().len(), 2);
        assert!(registry.schemas().contains_key("TodoList"));
        assert!(registry.schemas().contains_key("Todo"));
    }

    #[test]
    fn test_inline_schema_passes_through() {
        let inline = Schema::string().with_description("raw");
        let (schema, registry) = resolve_one(Declaration::from(inline.clone()));

        assert_eq!(schema, inline);
        assert!(registry.schemas().is_empty());
    }
}
