//! Named component storage shared by every registration call.
//!
//! The registry accumulates schemas, responses, parameters, examples, request
//! bodies and security schemes as handlers register their metadata. Each map
//! is keyed by component name and inserts are idempotent: the first
//! registration under a name wins and later ones are ignored. Model schemas
//! additionally track the Rust type they came from, so the same type is only
//! ever expanded once no matter how many declarations mention it.

use crate::declaration::ApiModel;
use crate::document::{Components, Example, Parameter, RequestBody, Response, SecurityScheme};
use crate::resolver::SchemaResolver;
use crate::schema::Schema;
use indexmap::IndexMap;
use log::debug;
use std::any::TypeId;
use std::collections::HashMap;

/// Registry of reusable components, filled during handler registration.
#[derive(Debug)]
pub struct ComponentRegistry {
    schemas: IndexMap<String, Schema>,
    schema_names: HashMap<TypeId, String>,
    responses: IndexMap<String, Response>,
    parameters: IndexMap<String, Parameter>,
    examples: IndexMap<String, Example>,
    request_bodies: IndexMap<String, RequestBody>,
    security_schemes: IndexMap<String, SecurityScheme>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        debug!("Initializing ComponentRegistry");
        Self {
            schemas: IndexMap::new(),
            schema_names: HashMap::new(),
            responses: IndexMap::new(),
            parameters: IndexMap::new(),
            examples: IndexMap::new(),
            request_bodies: IndexMap::new(),
            security_schemes: IndexMap::new(),
        }
    }

    /// Register a named schema and get back a reference to it.
    ///
    /// The first registration under a name wins; a later call with the same
    /// name leaves the stored schema untouched.
    pub fn schema(&mut self, name: impl Into<String>, schema: Schema) -> Schema {
        let name = name.into();
        if !self.schemas.contains_key(&name) {
            debug!("Registering component schema: {}", name);
            self.schemas.insert(name.clone(), schema);
        }
        Schema::reference(&name)
    }

    /// Register a named response and get back its reference pointer.
    pub fn response(&mut self, name: impl Into<String>, response: Response) -> String {
        let name = name.into();
        if !self.responses.contains_key(&name) {
            debug!("Registering component response: {}", name);
            self.responses.insert(name.clone(), response);
        }
        format!("#/components/responses/{}", name)
    }

    /// Register a named parameter and get back its reference pointer.
    pub fn parameter(&mut self, name: impl Into<String>, parameter: Parameter) -> String {
        let name = name.into();
        if !self.parameters.contains_key(&name) {
            debug!("Registering component parameter: {}", name);
            self.parameters.insert(name.clone(), parameter);
        }
        format!("#/components/parameters/{}", name)
    }

    /// Register a named example and get back its reference pointer.
    pub fn example(&mut self, name: impl Into<String>, example: Example) -> String {
        let name = name.into();
        if !self.examples.contains_key(&name) {
            debug!("Registering component example: {}", name);
            self.examples.insert(name.clone(), example);
        }
        format!("#/components/examples/{}", name)
    }

    /// Register a named request body and get back its reference pointer.
    pub fn body(&mut self, name: impl Into<String>, body: RequestBody) -> String {
        let name = name.into();
        if !self.request_bodies.contains_key(&name) {
            debug!("Registering component request body: {}", name);
            self.request_bodies.insert(name.clone(), body);
        }
        format!("#/components/requestBodies/{}", name)
    }

    /// Register a named security scheme and get back its reference pointer.
    pub fn security(&mut self, name: impl Into<String>, scheme: SecurityScheme) -> String {
        let name = name.into();
        if !self.security_schemes.contains_key(&name) {
            debug!("Registering security scheme: {}", name);
            self.security_schemes.insert(name.clone(), scheme);
        }
        format!("#/components/securitySchemes/{}", name)
    }

    /// Register a model type up front and get back a reference to its schema.
    ///
    /// Useful for making a schema appear in the components section even when
    /// no operation mentions it yet.
    pub fn model<M: ApiModel>(&mut self) -> Schema {
        let declaration = M::declaration();
        SchemaResolver::new(self).resolve(&declaration);
        match self.schema_names.get(&TypeId::of::<M>()) {
            Some(name) => Schema::reference(name),
            None => Schema::empty(),
        }
    }

    /// The component name a model type resolved under, if it has been seen.
    pub(crate) fn schema_name(&self, identity: TypeId) -> Option<&str> {
        self.schema_names.get(&identity).map(|name| name.as_str())
    }

    /// Reserve a schema slot for a model before its fields are resolved.
    ///
    /// The slot is filled with an empty placeholder so a self-referential
    /// field resolved in the meantime already finds the name and emits a
    /// reference instead of recursing forever. Returns the name actually
    /// assigned, which gets a numeric suffix when the requested one is taken
    /// by a different type.
    pub(crate) fn claim_schema_name(&mut self, identity: TypeId, requested: &str) -> String {
        let name = self.unique_schema_name(requested);
        debug!("Claiming schema slot: {}", name);
        self.schemas.insert(name.clone(), Schema::empty());
        self.schema_names.insert(identity, name.clone());
        name
    }

    /// Replace a claimed placeholder with the fully resolved schema.
    pub(crate) fn fill_schema(&mut self, name: &str, schema: Schema) {
        self.schemas.insert(name.to_string(), schema);
    }

    fn unique_schema_name(&self, requested: &str) -> String {
        if !self.schemas.contains_key(requested) {
            return requested.to_string();
        }
        let mut counter = 2;
        loop {
            let candidate = format!("{}{}", requested, counter);
            if !self.schemas.contains_key(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Registered schemas, in registration order
    pub fn schemas(&self) -> &IndexMap<String, Schema> {
        &self.schemas
    }

    /// Whether nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
            && self.responses.is_empty()
            && self.parameters.is_empty()
            && self.examples.is_empty()
            && self.request_bodies.is_empty()
            && self.security_schemes.is_empty()
    }

    /// Copy the registered components into the frozen document form.
    ///
    /// Returns `None` when every map is empty so the document can omit the
    /// components key entirely.
    pub fn snapshot(&self) -> Option<Components> {
        if self.is_empty() {
            return None;
        }
        Some(Components {
            schemas: self.schemas.clone(),
            responses: self.responses.clone(),
            parameters: self.parameters.clone(),
            examples: self.examples.clone(),
            request_bodies: self.request_bodies.clone(),
            security_schemes: self.security_schemes.clone(),
        })
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
