//! The Schema value type shared by the resolver, the component registry and
//! the final document.
//!
//! A [`Schema`] describes one data shape. Every field is optional and omitted
//! from serialized output when unset, so the same struct covers primitives,
//! arrays, objects, unions and `$ref` pointers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OpenAPI Schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The type of the schema (boolean, integer, number, string, array, object)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format qualifier for primitive types (e.g. "int32", "date-time", "byte")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the value may be null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Default value, carried when the schema was resolved from a literal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Properties for object types, in declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    /// Items schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Union: value matches exactly one of these schemas
    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,
    /// Union: value matches at least one of these schemas
    #[serde(rename = "anyOf", skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,
    /// Composition: value matches all of these schemas
    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,
    /// Reference to a named component schema
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Schema {
    /// Create an empty, untyped schema. Serializes as `{}`.
    pub fn empty() -> Self {
        Self::default()
    }

    fn typed(schema_type: &str, format: Option<&str>) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            format: format.map(|f| f.to_string()),
            ..Self::default()
        }
    }

    /// Create a boolean schema
    pub fn boolean() -> Self {
        Self::typed("boolean", None)
    }

    /// Create a 32-bit integer schema
    pub fn integer() -> Self {
        Self::typed("integer", Some("int32"))
    }

    /// Create a 64-bit integer schema
    pub fn long() -> Self {
        Self::typed("integer", Some("int64"))
    }

    /// Create a single-precision number schema
    pub fn float() -> Self {
        Self::typed("number", Some("float"))
    }

    /// Create a double-precision number schema
    pub fn double() -> Self {
        Self::typed("number", Some("double"))
    }

    /// Create a plain string schema
    pub fn string() -> Self {
        Self::typed("string", None)
    }

    /// Create a base64-encoded byte string schema
    pub fn byte() -> Self {
        Self::typed("string", Some("byte"))
    }

    /// Create a raw binary string schema
    pub fn binary() -> Self {
        Self::typed("string", Some("binary"))
    }

    /// Create a calendar-date string schema
    pub fn date() -> Self {
        Self::typed("string", Some("date"))
    }

    /// Create a timestamp string schema
    pub fn date_time() -> Self {
        Self::typed("string", Some("date-time"))
    }

    /// Create a time-of-day string schema
    pub fn time() -> Self {
        Self::typed("string", Some("time"))
    }

    /// Create a password string schema
    pub fn password() -> Self {
        Self::typed("string", Some("password"))
    }

    /// Create an email string schema
    pub fn email() -> Self {
        Self::typed("string", Some("email"))
    }

    /// Create a UUID string schema
    pub fn uuid() -> Self {
        Self::typed("string", Some("uuid"))
    }

    /// Create an array schema with the given items schema
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed("array", None)
        }
    }

    /// Create an object schema with the given properties
    pub fn object(properties: IndexMap<String, Schema>) -> Self {
        Self {
            properties: Some(properties),
            ..Self::typed("object", None)
        }
    }

    /// Create a `oneOf` union schema
    pub fn one_of(variants: Vec<Schema>) -> Self {
        Self {
            one_of: Some(variants),
            ..Self::default()
        }
    }

    /// Create an `anyOf` union schema
    pub fn any_of(variants: Vec<Schema>) -> Self {
        Self {
            any_of: Some(variants),
            ..Self::default()
        }
    }

    /// Create an `allOf` composition schema
    pub fn all_of(parts: Vec<Schema>) -> Self {
        Self {
            all_of: Some(parts),
            ..Self::default()
        }
    }

    /// Create a reference schema pointing at a named component
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("#/components/schemas/{}", name)),
            ..Self::default()
        }
    }

    /// Whether this schema is a `$ref` pointer
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Mark the schema as nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    /// Attach a default value
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Attach an example value
    pub fn with_example(mut self, value: Value) -> Self {
        self.example = Some(value);
        self
    }

    /// Attach a description
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_schema_serializes_to_empty_object() {
        let schema = Schema::empty();
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_primitive_constructors() {
        assert_eq!(Schema::boolean().schema_type, Some("boolean".to_string()));
        assert_eq!(Schema::boolean().format, None);

        let integer = Schema::integer();
        assert_eq!(integer.schema_type, Some("integer".to_string()));
        assert_eq!(integer.format, Some("int32".to_string()));

        let long = Schema::long();
        assert_eq!(long.schema_type, Some("integer".to_string()));
        assert_eq!(long.format, Some("int64".to_string()));

        let float = Schema::float();
        assert_eq!(float.schema_type, Some("number".to_string()));
        assert_eq!(float.format, Some("float".to_string()));

        let double = Schema::double();
        assert_eq!(double.schema_type, Some("number".to_string()));
        assert_eq!(double.format, Some("double".to_string()));

        assert_eq!(Schema::string().format, None);
        assert_eq!(Schema::byte().format, Some("byte".to_string()));
        assert_eq!(Schema::binary().format, Some("binary".to_string()));
        assert_eq!(Schema::date().format, Some("date".to_string()));
        assert_eq!(Schema::date_time().format, Some("date-time".to_string()));
        assert_eq!(Schema::time().format, Some("time".to_string()));
        assert_eq!(Schema::password().format, Some("password".to_string()));
        assert_eq!(Schema::email().format, Some("email".to_string()));
    }

    #[test]
    fn test_array_schema() {
        let schema = Schema::array(Schema::string());
        assert_eq!(schema.schema_type, Some("array".to_string()));
        assert_eq!(schema.items.as_deref(), Some(&Schema::string()));
    }

    #[test]
    fn test_object_schema_preserves_property_order() {
        let mut properties = IndexMap::new();
        properties.insert("zebra".to_string(), Schema::string());
        properties.insert("apple".to_string(), Schema::integer());

        let schema = Schema::object(properties);
        let json = serde_json::to_string(&schema).unwrap();

        let zebra_at = json.find("zebra").unwrap();
        let apple_at = json.find("apple").unwrap();
        assert!(zebra_at < apple_at, "declaration order must survive serialization");
    }

    #[test]
    fn test_reference_schema_pointer() {
        let schema = Schema::reference("Todo");
        assert!(schema.is_reference());
        assert_eq!(
            schema.reference,
            Some("#/components/schemas/Todo".to_string())
        );

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({"$ref": "#/components/schemas/Todo"}));
    }

    #[test]
    fn test_one_of_serialization_name() {
        let schema = Schema::one_of(vec![Schema::integer(), Schema::string()]);
        let value = serde_json::to_value(&schema).unwrap();
        assert!(value.get("oneOf").is_some());
        assert!(value.get("type").is_none());
    }

    #[test]
    fn test_nullable_only_schema() {
        let schema = Schema::empty().nullable();
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({"nullable": true}));
    }

    #[test]
    fn test_default_and_example_values() {
        let schema = Schema::integer().with_default(json!(5)).with_example(json!(7));
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["default"], json!(5));
        assert_eq!(value["example"], json!(7));
    }

    #[test]
    fn test_type_field_rename() {
        let json = serde_json::to_string(&Schema::boolean()).unwrap();
        assert!(json.contains("\"type\""));
        assert!(!json.contains("schema_type"));
    }
}
