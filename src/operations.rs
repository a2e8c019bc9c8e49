//! Per-handler operation metadata.
//!
//! Handlers register what they accept and return before any route is known.
//! The records collected here stay keyed by handler identifier until the
//! document build pairs them with route table entries. Schemas inside the
//! records are already resolved; nothing in this module touches the
//! component registry.

use crate::declaration::Declaration;
use crate::document::ParameterIn;
use crate::schema::Schema;
use indexmap::IndexMap;
use std::fmt;

/// Identifier tying registered metadata to a route table handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId(String);

impl HandlerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for HandlerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything registered for one handler.
///
/// Fields hold resolved schemas and plain values in registration order, ready
/// to be frozen into document operations.
#[derive(Debug, Clone, Default)]
pub struct OperationRecord {
    /// Explicit operation ID, overriding the derived one
    pub operation_id: Option<String>,
    /// Short summary
    pub summary: Option<String>,
    /// Longer description
    pub description: Option<String>,
    /// Tags in first-assigned order, without duplicates
    pub tags: Vec<String>,
    /// Parameters keyed by name; re-registration replaces in place
    pub parameters: IndexMap<String, ParameterRecord>,
    /// Request body, last registration wins
    pub request_body: Option<BodyRecord>,
    /// Responses keyed by status code, last registration per status wins
    pub responses: IndexMap<String, ResponseRecord>,
    /// Security requirements: scheme name to scopes
    pub security: IndexMap<String, Vec<String>>,
    /// Whether the handler is deprecated
    pub deprecated: bool,
}

impl OperationRecord {
    /// Add a tag unless the handler already carries it.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}

/// A registered parameter, schema already resolved.
#[derive(Debug, Clone)]
pub struct ParameterRecord {
    pub location: ParameterIn,
    pub schema: Schema,
    pub required: bool,
    pub description: Option<String>,
    pub deprecated: bool,
}

/// A registered request body, content already resolved.
#[derive(Debug, Clone)]
pub struct BodyRecord {
    pub content: ResolvedContent,
    pub description: Option<String>,
    pub required: bool,
}

/// A registered response, content already resolved.
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    pub content: Option<ResolvedContent>,
    pub description: Option<String>,
}

/// Resolved payload content, either a bare schema awaiting the configured
/// default media type or an explicit media-type map.
#[derive(Debug, Clone)]
pub enum ResolvedContent {
    Bare(Schema),
    Media(IndexMap<String, Schema>),
}

/// Payload content as declared by a handler.
#[derive(Debug, Clone)]
pub enum Content {
    /// A single declaration; the media type is filled in from configuration
    /// at build time.
    Bare(Declaration),
    /// Explicit media types, each with its own declaration.
    Media(Vec<(String, Declaration)>),
}

impl Content {
    /// Content with explicit media-type entries
    pub fn media(
        entries: impl IntoIterator<Item = (impl Into<String>, Declaration)>,
    ) -> Self {
        Content::Media(
            entries
                .into_iter()
                .map(|(media_type, declaration)| (media_type.into(), declaration))
                .collect(),
        )
    }
}

impl From<Declaration> for Content {
    fn from(declaration: Declaration) -> Self {
        Content::Bare(declaration)
    }
}

/// Parameter metadata handed to [`crate::registry::OperationEntry::parameter`].
#[derive(Debug, Clone)]
pub struct ParameterMeta {
    pub(crate) name: String,
    pub(crate) location: ParameterIn,
    pub(crate) declaration: Declaration,
    pub(crate) required: bool,
    pub(crate) description: Option<String>,
    pub(crate) deprecated: bool,
}

impl ParameterMeta {
    /// A parameter at an explicit location
    pub fn new(
        name: impl Into<String>,
        location: ParameterIn,
        declaration: impl Into<Declaration>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            declaration: declaration.into(),
            required: false,
            description: None,
            deprecated: false,
        }
    }

    /// A query parameter, the most common case
    pub fn query(name: impl Into<String>, declaration: impl Into<Declaration>) -> Self {
        Self::new(name, ParameterIn::Query, declaration)
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a description
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Mark the parameter as deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

/// Request body metadata handed to [`crate::registry::OperationEntry::request_body`].
#[derive(Debug, Clone)]
pub struct BodyMeta {
    pub(crate) content: Content,
    pub(crate) description: Option<String>,
    pub(crate) required: bool,
}

impl BodyMeta {
    /// A required body described by a single declaration
    pub fn new(content: impl Into<Declaration>) -> Self {
        Self {
            content: Content::Bare(content.into()),
            description: None,
            required: true,
        }
    }

    /// A required body with explicit media-type entries
    pub fn media(entries: impl IntoIterator<Item = (impl Into<String>, Declaration)>) -> Self {
        Self {
            content: Content::media(entries),
            description: None,
            required: true,
        }
    }

    /// Attach a description
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Mark the body as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Response metadata handed to [`crate::registry::OperationEntry::response`].
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub(crate) status: u16,
    pub(crate) content: Option<Content>,
    pub(crate) description: Option<String>,
}

impl ResponseMeta {
    /// A response whose body is described by a single declaration
    pub fn new(status: u16, content: impl Into<Declaration>) -> Self {
        Self {
            status,
            content: Some(Content::Bare(content.into())),
            description: None,
        }
    }

    /// A response with explicit media-type entries
    pub fn media(
        status: u16,
        entries: impl IntoIterator<Item = (impl Into<String>, Declaration)>,
    ) -> Self {
        Self {
            status,
            content: Some(Content::media(entries)),
            description: None,
        }
    }

    /// A response without a body, e.g. 204
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content: None,
            description: None,
        }
    }

    /// Attach a description
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// All operation records, keyed by handler identifier.
#[derive(Debug, Default)]
pub struct OperationRegistry {
    records: IndexMap<HandlerId, OperationRecord>,
}

impl OperationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }

    /// The record for a handler, created on first access.
    pub fn get_or_create(&mut self, handler: HandlerId) -> &mut OperationRecord {
        self.records.entry(handler).or_default()
    }

    /// The record for a handler, if it registered anything.
    pub fn get(&self, handler: &HandlerId) -> Option<&OperationRecord> {
        self.records.get(handler)
    }

    /// Number of handlers with registered metadata
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no handler has registered anything
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
