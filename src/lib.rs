//! OpenAPI document generation from a live route table and handler metadata.
//!
//! This library produces OpenAPI 3.0 documents for web applications that know
//! their routes at runtime. Handlers register what they accept and return
//! through a registry; at startup the application hands the builder its route
//! table and receives a finished document to serve or write to disk.
//!
//! Declarations are resolved into schemas at registration time, so building
//! the document is a pure read: the same registry and route table always
//! produce the same output, and nothing is mutated while the document is
//! assembled.
//!
//! # Architecture
//!
//! The library is organized into several modules that work together:
//!
//! 1. [`declaration`] - Typed payload declarations and the `ApiModel` trait
//! 2. [`resolver`] - Resolves declarations into schemas, registering each model once
//! 3. [`components`] - Collects named schemas, responses and security schemes
//! 4. [`operations`] - Stores what each handler registered about itself
//! 5. [`registry`] - The registration facade handlers talk to
//! 6. [`routes`] - The live route table, with grouping and path placeholders
//! 7. [`builder`] - Pairs routes with registered metadata into a document
//! 8. [`serializer`] - Serializes the finished document to YAML or JSON
//!
//! The schema value type lives in [`schema`], the frozen document model in
//! [`document`], and the info-block settings in [`config`].
//!
//! # Example Usage
//!
//! ```no_run
//! use openapi_from_routes::{
//!     builder::DocumentBuilder,
//!     config::DocumentConfig,
//!     declaration::Declaration,
//!     operations::{ParameterMeta, ResponseMeta},
//!     registry::ApiRegistry,
//!     routes::{Route, RouteTable},
//!     serializer::serialize_json,
//! };
//!
//! // Register handler metadata
//! let mut api = ApiRegistry::new();
//! api.operation("todo_list")
//!     .summary("Fetches all todos")
//!     .parameter(ParameterMeta::query("done", Declaration::Boolean))
//!     .response(ResponseMeta::new(200, Declaration::sequence([Declaration::Text])));
//!
//! // Mirror the application's live routes
//! let mut table = RouteTable::new();
//! table.add(Route::get("/todos", "todo_list"));
//! table.group("todo", ["todo_list"]);
//!
//! // Build and serialize the document
//! let config = DocumentConfig::new()
//!     .with_title("Todo API")
//!     .with_version("0.0.1");
//! let document = DocumentBuilder::new(&api).build(&table, &config);
//! let json = serialize_json(&document).unwrap();
//! println!("{}", json);
//! ```

pub mod declaration;
pub mod schema;
pub mod resolver;
pub mod components;
pub mod operations;
pub mod registry;
pub mod routes;
pub mod config;
pub mod document;
pub mod builder;
pub mod serializer;
pub mod error;
