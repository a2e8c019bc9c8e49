//! Generates the OpenAPI document for a small todo API.
//!
//! Run with `cargo run --example todos`. Set `RUST_LOG=debug` to watch the
//! registration and build steps.

use openapi_from_routes::builder::DocumentBuilder;
use openapi_from_routes::config::DocumentConfig;
use openapi_from_routes::declaration::{ApiModel, Declaration};
use openapi_from_routes::document::{ApiKeyLocation, SecurityScheme};
use openapi_from_routes::operations::{BodyMeta, ParameterMeta, ResponseMeta};
use openapi_from_routes::registry::ApiRegistry;
use openapi_from_routes::routes::{Route, RouteTable};
use openapi_from_routes::serializer::serialize_json;

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
            ("title", Declaration::Text),
        ]
    }
}

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

fn main() {
    env_logger::init();

    let mut api = ApiRegistry::new();

    api.components_mut().security(
        "TodoApiKey",
        SecurityScheme::api_key("x-api-key", ApiKeyLocation::Header),
    );
    api.model::<Todo>();
    api.model::<TodoList>();

    api.operation("todo_list")
        .summary("Fetches all todos")
        .description("Really gets the job done fetching every todo there is")
        .parameter(ParameterMeta::query("done", Declaration::Boolean))
        .response(ResponseMeta::new(200, TodoList::declaration()));

    api.operation("todo_get")
        .summary("Fetches a todo item by ID")
        .response(ResponseMeta::new(200, Todo::declaration()));

    api.operation("todo_put")
        .summary("Updates a todo item")
        .request_body(BodyMeta::new(Todo::declaration()).describe("Todo object for update"))
        .response(ResponseMeta::new(200, Todo::declaration()))
        .secured("TodoApiKey");

    api.operation("todo_delete")
        .summary("Deletes a todo")
        .response(ResponseMeta::empty(204))
        .secured("TodoApiKey");

    // The routes the application actually serves.
    let mut table = RouteTable::new();
    table.add(Route::get("/todos", "todo_list"));
    table.add(Route::get("/todos/<todo_id:int>", "todo_get"));
    table.add(Route::put("/todos/<todo_id:int>", "todo_put"));
    table.add(Route::delete("/todos/<todo_id:int>", "todo_delete"));
    table.group("todo", ["todo_list", "todo_get", "todo_put", "todo_delete"]);

    let config = DocumentConfig::new()
        .with_title("Todo API")
        .with_version("0.0.1")
        .with_description("Advanced todo API for own purposes")
        .with_terms_of_service("https://example.com/terms-of-service")
        .with_contact_name("John Doe")
        .with_contact_email("info@example.com")
        .with_contact_url("https://example.com")
        .with_license_name("MIT")
        .with_license_url("https://example.com/license");

    let document = DocumentBuilder::new(&api).build(&table, &config);

    match serialize_json(&document) {
        Ok(json) => println!("{}", json),
        Err(error) => {
            eprintln!("Failed to serialize document: {}", error);
            std::process::exit(1);
        }
    }
}
