//! Pairs the route table with registered metadata to produce a document.
//!
//! The builder only reads: it borrows the registry contents immutably and
//! walks the route table exactly once. Everything that needed resolving was
//! resolved at registration time, so building twice from the same state
//! yields identical documents.

use crate::components::ComponentRegistry;
use crate::config::DocumentConfig;
use crate::document::{
    Contact, Document, Info, License, MediaType, Operation, Parameter, ParameterIn, PathItem,
    RequestBody, Response, Tag,
};
use crate::operations::{OperationRecord, OperationRegistry, ResolvedContent};
use crate::registry::ApiRegistry;
use crate::routes::{normalize_uri, HttpMethod, Route, RouteTable};
use indexmap::IndexMap;
use log::debug;

/// Builds a [`Document`] from registered metadata and a route table.
pub struct DocumentBuilder<'a> {
    operations: &'a OperationRegistry,
    components: &'a ComponentRegistry,
}

impl<'a> DocumentBuilder<'a> {
    /// Create a builder over a registry's collected state
    pub fn new(api: &'a ApiRegistry) -> Self {
        Self {
            operations: api.operations(),
            components: api.components(),
        }
    }

    /// Generate the document.
    ///
    /// Routes marked internal and handlers without registered metadata are
    /// skipped. Path keys appear in route registration order; methods that
    /// share a path land on the same path item.
    pub fn build(&self, table: &RouteTable, config: &DocumentConfig) -> Document {
        debug!("Building OpenAPI document from {} routes", table.routes().len());

        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        let mut tag_names: Vec<String> = Vec::new();

        for route in table.routes() {
            if route.is_internal() {
                debug!("Skipping internal route: {}", route.uri());
                continue;
            }

            let normalized = normalize_uri(route.uri());
            let group = table.owning_group(route.route_name());

            for (method, handler) in route.handlers() {
                let record = match self.operations.get(handler) {
                    Some(record) => record,
                    None => {
                        debug!("No metadata for handler {}, skipping", handler);
                        continue;
                    }
                };

                let operation = freeze_operation(record, method, route, group, config);

                for tag in &operation.tags {
                    if !tag_names.contains(tag) {
                        tag_names.push(tag.clone());
                    }
                }

                let item = paths.entry(normalized.clone()).or_default();
                match method {
                    HttpMethod::Get => item.get = Some(operation),
                    HttpMethod::Post => item.post = Some(operation),
                    HttpMethod::Put => item.put = Some(operation),
                    HttpMethod::Delete => item.delete = Some(operation),
                    HttpMethod::Patch => item.patch = Some(operation),
                    HttpMethod::Options => item.options = Some(operation),
                    HttpMethod::Head => item.head = Some(operation),
                }
            }
        }

        let tags = tag_names
            .into_iter()
            .map(|name| Tag {
                name,
                description: None,
            })
            .collect();

        Document {
            openapi: "3.0.0".to_string(),
            info: build_info(config),
            paths,
            components: self.components.snapshot(),
            tags,
        }
    }
}

/// Freeze one handler record into a document operation.
fn freeze_operation(
    record: &OperationRecord,
    method: HttpMethod,
    route: &Route,
    group: Option<&str>,
    config: &DocumentConfig,
) -> Operation {
    let operation_id = record
        .operation_id
        .clone()
        .unwrap_or_else(|| format!("{}_{}", method.as_str().to_lowercase(), route.route_name()));

    // Explicit tags win; otherwise the owning group's name is inherited.
    let tags = if record.tags.is_empty() {
        match group {
            Some(name) => vec![name.to_string()],
            None => Vec::new(),
        }
    } else {
        record.tags.clone()
    };

    let mut parameters: Vec<Parameter> = record
        .parameters
        .iter()
        .map(|(name, parameter)| Parameter {
            name: name.clone(),
            location: parameter.location,
            required: parameter.required,
            schema: parameter.schema.clone(),
            description: parameter.description.clone(),
            deprecated: parameter.deprecated,
        })
        .collect();

    // Route-derived path parameters are appended after the declared ones,
    // never replacing a declared entry of the same name.
    for param in route.path_params() {
        parameters.push(Parameter {
            name: param.name.clone(),
            location: ParameterIn::Path,
            required: true,
            schema: param.kind.schema(),
            description: None,
            deprecated: false,
        });
    }

    let request_body = record.request_body.as_ref().map(|body| RequestBody {
        description: body.description.clone(),
        required: body.required,
        content: wrap_content(&body.content, config),
    });

    let mut responses = IndexMap::new();
    for (status, response) in &record.responses {
        responses.insert(
            status.clone(),
            Response {
                description: response
                    .description
                    .clone()
                    .unwrap_or_else(|| "Successful response".to_string()),
                content: response
                    .content
                    .as_ref()
                    .map(|content| wrap_content(content, config)),
            },
        );
    }

    Operation {
        operation_id,
        summary: record.summary.clone(),
        description: record.description.clone(),
        tags,
        parameters,
        request_body,
        responses,
        security: record.security.clone(),
        deprecated: record.deprecated,
    }
}

/// Bare content picks up the configured default media type; explicit media
/// maps pass through as declared.
fn wrap_content(
    content: &ResolvedContent,
    config: &DocumentConfig,
) -> IndexMap<String, MediaType> {
    let mut wrapped = IndexMap::new();
    match content {
        ResolvedContent::Bare(schema) => {
            wrapped.insert(
                config.default_media_type.clone(),
                MediaType {
                    schema: schema.clone(),
                },
            );
        }
        ResolvedContent::Media(entries) => {
            for (media_type, schema) in entries {
                wrapped.insert(
                    media_type.clone(),
                    MediaType {
                        schema: schema.clone(),
                    },
                );
            }
        }
    }
    wrapped
}

fn build_info(config: &DocumentConfig) -> Info {
    let has_contact = config.contact_name.is_some()
        || config.contact_url.is_some()
        || config.contact_email.is_some();
    let contact = if has_contact {
        Some(Contact {
            name: config.contact_name.clone(),
            url: config.contact_url.clone(),
            email: config.contact_email.clone(),
        })
    } else {
        None
    };

    let has_license = config.license_name.is_some() || config.license_url.is_some();
    let license = if has_license {
        Some(License {
            name: config.license_name.clone(),
            url: config.license_url.clone(),
        })
    } else {
        None
    };

    Info {
        title: config.title.clone(),
        version: config.version.clone(),
        description: config.description.clone(),
        terms_of_service: config.terms_of_service.clone(),
        contact,
        license,
    }
}
