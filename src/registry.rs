//! The registration facade handlers talk to.
//!
//! An [`ApiRegistry`] owns both halves of the registered state: the
//! per-handler operation records and the shared component registry. Handler
//! metadata arrives through [`OperationEntry`], a short-lived builder that
//! resolves declarations on the spot so the record only ever stores finished
//! schemas.

use crate::components::ComponentRegistry;
use crate::declaration::ApiModel;
use crate::document::ParameterIn;
use crate::operations::{
    BodyMeta, BodyRecord, Content, HandlerId, OperationRecord, OperationRegistry, ParameterMeta,
    ParameterRecord, ResolvedContent, ResponseMeta, ResponseRecord,
};
use crate::resolver::SchemaResolver;
use crate::schema::Schema;
use indexmap::IndexMap;
use log::debug;

/// Registered API metadata: operation records plus shared components.
#[derive(Debug)]
pub struct ApiRegistry {
    operations: OperationRegistry,
    components: ComponentRegistry,
}

impl ApiRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        debug!("Initializing ApiRegistry");
        Self {
            operations: OperationRegistry::new(),
            components: ComponentRegistry::new(),
        }
    }

    /// Open the registration entry for a handler.
    ///
    /// Calling this repeatedly for the same handler keeps appending to the
    /// same record.
    pub fn operation(&mut self, handler: impl Into<HandlerId>) -> OperationEntry<'_> {
        let Self {
            operations,
            components,
        } = self;
        OperationEntry {
            record: operations.get_or_create(handler.into()),
            components,
        }
    }

    /// Register a model type up front and get back a reference to its schema.
    pub fn model<M: ApiModel>(&mut self) -> Schema {
        self.components.model::<M>()
    }

    /// The collected operation records
    pub fn operations(&self) -> &OperationRegistry {
        &self.operations
    }

    /// The collected components
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Mutable access to the components, for registering named responses,
    /// parameters, examples, request bodies and security schemes directly.
    pub fn components_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.components
    }
}

impl Default for ApiRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Chainable registration handle for one handler's record.
pub struct OperationEntry<'a> {
    record: &'a mut OperationRecord,
    components: &'a mut ComponentRegistry,
}

impl<'a> OperationEntry<'a> {
    /// Set the summary line
    pub fn summary(self, text: impl Into<String>) -> Self {
        self.record.summary = Some(text.into());
        self
    }

    /// Set the longer description
    pub fn description(self, text: impl Into<String>) -> Self {
        self.record.description = Some(text.into());
        self
    }

    /// Set an explicit operation ID instead of the derived one
    pub fn operation_id(self, id: impl Into<String>) -> Self {
        self.record.operation_id = Some(id.into());
        self
    }

    /// Add a tag
    pub fn tag(self, tag: impl Into<String>) -> Self {
        self.record.add_tag(tag);
        self
    }

    /// Mark the handler as deprecated
    pub fn deprecated(self) -> Self {
        self.record.deprecated = true;
        self
    }

    /// Register a parameter.
    ///
    /// Path parameters are always required, whatever the metadata says.
    /// Registering a name a second time replaces the earlier entry in place.
    pub fn parameter(self, meta: ParameterMeta) -> Self {
        let schema = SchemaResolver::new(self.components).resolve(&meta.declaration);
        let required = meta.required || meta.location == ParameterIn::Path;
        self.record.parameters.insert(
            meta.name,
            ParameterRecord {
                location: meta.location,
                schema,
                required,
                description: meta.description,
                deprecated: meta.deprecated,
            },
        );
        self
    }

    /// Register the request body; a later registration replaces it.
    pub fn request_body(self, meta: BodyMeta) -> Self {
        let content = resolve_content(self.components, meta.content);
        self.record.request_body = Some(BodyRecord {
            content,
            description: meta.description,
            required: meta.required,
        });
        self
    }

    /// Register a response for a status code; a later registration for the
    /// same status replaces it.
    pub fn response(self, meta: ResponseMeta) -> Self {
        let content = match meta.content {
            Some(content) => Some(resolve_content(self.components, content)),
            None => None,
        };
        self.record.responses.insert(
            meta.status.to_string(),
            ResponseRecord {
                content,
                description: meta.description,
            },
        );
        self
    }

    /// Require a security scheme with no scopes
    pub fn secured(self, scheme: impl Into<String>) -> Self {
        self.secured_with(scheme, Vec::<String>::new())
    }

    /// Require a security scheme with the given scopes
    pub fn secured_with(
        self,
        scheme: impl Into<String>,
        scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.record
            .security
            .insert(scheme.into(), scopes.into_iter().map(Into::into).collect());
        self
    }
}

fn resolve_content(components: &mut ComponentRegistry, content: Content) -> ResolvedContent {
    match content {
        Content::Bare(declaration) => {
            ResolvedContent::Bare(SchemaResolver::new(components).resolve(&declaration))
        }
        Content::Media(entries) => {
            let mut resolved = IndexMap::new();
            for (media_type, declaration) in entries {
                resolved.insert(
                    media_type,
                    SchemaResolver::new(components).resolve(&declaration),
                );
            }
            ResolvedContent::Media(resolved)
        }
    }
}
