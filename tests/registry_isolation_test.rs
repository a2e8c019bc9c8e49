use openapi_from_routes::{
    builder::DocumentBuilder,
    config::DocumentConfig,
    declaration::{ApiModel, Declaration},
    operations::ResponseMeta,
    registry::ApiRegistry,
    routes::{Route, RouteTable},
};
use pretty_assertions::assert_eq;
use serde_json::json;

struct Widget;

impl ApiModel for Widget {
    fn model_name() -> &'static str {
        "Widget"
    }

    fn model_fields() -> Vec<(&'static str, Declaration)> {
        vec![
            ("id", Declaration::Integer),
            ("label", Declaration::Text),
        ]
    }
}

#[test]
fn test_registries_do_not_share_state() {
    let mut first = ApiRegistry::new();
    let second = ApiRegistry::new();

    first
        .operation("widget_get")
        .response(ResponseMeta::new(200, Widget::declaration()));

    // Registration in one registry must not leak into another, even for the
    // same model type.
    assert!(first.components().schemas().contains_key("Widget"));
    assert!(second.components().schemas().is_empty());
    assert!(second.operations().is_empty());
}

#[test]
fn test_same_model_registers_independently_per_registry() {
    let mut first = ApiRegistry::new();
    let mut second = ApiRegistry::new();

    first.model::<Widget>();
    second.model::<Widget>();

    // Each registry resolves the type from scratch under its own name.
    let first_schema = serde_json::to_value(first.components().schemas().get("Widget").unwrap())
        .unwrap();
    let second_schema = serde_json::to_value(second.components().schemas().get("Widget").unwrap())
        .unwrap();

    assert_eq!(first_schema, second_schema);
    assert_eq!(first_schema["properties"]["id"]["type"], json!("integer"));
}

#[test]
fn test_rebuilding_from_the_same_state_is_stable() {
    let mut api = ApiRegistry::new();
    api.operation("widget_get")
        .summary("Fetches a widget")
        .response(ResponseMeta::new(200, Widget::declaration()));

    let mut table = RouteTable::new();
    table.add(Route::get("/widgets/<id:int>", "widget_get"));
    table.group("widget", ["widget_get"]);

    let config = DocumentConfig::new().with_title("Widget API");
    let builder = DocumentBuilder::new(&api);

    let first = serde_json::to_value(builder.build(&table, &config)).unwrap();
    let second = serde_json::to_value(builder.build(&table, &config)).unwrap();

    // Building is a read-only pass; repeating it changes nothing.
    assert_eq!(first, second);
    assert!(first["paths"]["/widgets/{id}"]["get"].is_object());
}

#[test]
fn test_build_does_not_grow_components() {
    let mut api = ApiRegistry::new();
    api.operation("widget_get")
        .response(ResponseMeta::new(200, Widget::declaration()));

    let before = api.components().schemas().len();

    let mut table = RouteTable::new();
    table.add(Route::get("/widgets", "widget_get"));

    let builder = DocumentBuilder::new(&api);
    let _ = builder.build(&table, &DocumentConfig::new());
    let _ = builder.build(&table, &DocumentConfig::new());

    assert_eq!(api.components().schemas().len(), before);
}
