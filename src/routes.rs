//! The route table the document build walks.
//!
//! Routes use the framework-style placeholder syntax `<name>` or
//! `<name:kind>` in their URIs. Path parameters are parsed out at insertion
//! time and URIs are normalized to the OpenAPI `{name}` form during the
//! build, so the table itself always holds what the application registered.

use crate::operations::HandlerId;
use crate::schema::Schema;
use indexmap::IndexMap;
use log::debug;

/// HTTP methods a route can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// The method name in upper case
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

/// Converter kind attached to a path placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Str,
    Int,
    Float,
    Uuid,
    Path,
}

impl ParamKind {
    /// Map a placeholder converter token to a kind; unknown tokens fall back
    /// to plain strings.
    pub fn from_token(token: &str) -> Self {
        match token {
            "int" => ParamKind::Int,
            "float" | "number" => ParamKind::Float,
            "uuid" => ParamKind::Uuid,
            "path" => ParamKind::Path,
            _ => ParamKind::Str,
        }
    }

    /// The schema a parameter of this kind carries
    pub fn schema(&self) -> Schema {
        match self {
            ParamKind::Int => Schema::integer(),
            ParamKind::Float => Schema::float(),
            ParamKind::Uuid => Schema::uuid(),
            ParamKind::Str | ParamKind::Path => Schema::string(),
        }
    }
}

/// A path parameter parsed from a route URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    pub name: String,
    pub kind: ParamKind,
}

/// How a route maps methods to handlers.
#[derive(Debug, Clone)]
pub enum HandlerBinding {
    /// One handler serves every method of the route
    Single(HandlerId),
    /// Each method has its own handler
    PerMethod(IndexMap<HttpMethod, HandlerId>),
}

/// One entry in the route table.
#[derive(Debug, Clone)]
pub struct Route {
    uri: String,
    methods: Vec<HttpMethod>,
    binding: HandlerBinding,
    path_params: Vec<PathParam>,
    name: Option<String>,
    internal: bool,
}

impl Route {
    /// A route serving the given methods through one handler
    pub fn new(
        uri: impl Into<String>,
        methods: impl IntoIterator<Item = HttpMethod>,
        handler: impl Into<HandlerId>,
    ) -> Self {
        let uri = uri.into();
        let path_params = parse_path_params(&uri);
        Self {
            uri,
            methods: methods.into_iter().collect(),
            binding: HandlerBinding::Single(handler.into()),
            path_params,
            name: None,
            internal: false,
        }
    }

    /// A GET route
    pub fn get(uri: impl Into<String>, handler: impl Into<HandlerId>) -> Self {
        Self::new(uri, [HttpMethod::Get], handler)
    }

    /// A POST route
    pub fn post(uri: impl Into<String>, handler: impl Into<HandlerId>) -> Self {
        Self::new(uri, [HttpMethod::Post], handler)
    }

    /// A PUT route
    pub fn put(uri: impl Into<String>, handler: impl Into<HandlerId>) -> Self {
        Self::new(uri, [HttpMethod::Put], handler)
    }

    /// A DELETE route
    pub fn delete(uri: impl Into<String>, handler: impl Into<HandlerId>) -> Self {
        Self::new(uri, [HttpMethod::Delete], handler)
    }

    /// A PATCH route
    pub fn patch(uri: impl Into<String>, handler: impl Into<HandlerId>) -> Self {
        Self::new(uri, [HttpMethod::Patch], handler)
    }

    /// A route dispatching each method to its own handler
    pub fn dispatch<H: Into<HandlerId>>(
        uri: impl Into<String>,
        handlers: impl IntoIterator<Item = (HttpMethod, H)>,
    ) -> Self {
        let uri = uri.into();
        let path_params = parse_path_params(&uri);
        let bindings: IndexMap<HttpMethod, HandlerId> = handlers
            .into_iter()
            .map(|(method, handler)| (method, handler.into()))
            .collect();
        let methods = bindings.keys().copied().collect();
        Self {
            uri,
            methods,
            binding: HandlerBinding::PerMethod(bindings),
            path_params,
            name: None,
            internal: false,
        }
    }

    /// Give the route an explicit name, used for grouping and derived
    /// operation IDs.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Exclude the route from generated documents.
    pub fn mark_internal(mut self) -> Self {
        self.internal = true;
        self
    }

    /// Append a path parameter the URI syntax could not express.
    pub fn param(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.path_params.push(PathParam {
            name: name.into(),
            kind,
        });
        self
    }

    /// The registered URI, placeholders included
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The methods this route serves
    pub fn methods(&self) -> &[HttpMethod] {
        &self.methods
    }

    /// Path parameters in URI order
    pub fn path_params(&self) -> &[PathParam] {
        &self.path_params
    }

    /// Whether the route is excluded from documents
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// The name used for grouping and derived operation IDs: the explicit
    /// name when set, otherwise the first handler's identifier.
    pub fn route_name(&self) -> &str {
        if let Some(name) = &self.name {
            return name;
        }
        match &self.binding {
            HandlerBinding::Single(handler) => handler.as_str(),
            HandlerBinding::PerMethod(handlers) => handlers
                .values()
                .next()
                .map(|handler| handler.as_str())
                .unwrap_or("unnamed"),
        }
    }

    /// The (method, handler) pairs this route exposes, in method order.
    pub fn handlers(&self) -> Vec<(HttpMethod, &HandlerId)> {
        match &self.binding {
            HandlerBinding::Single(handler) => self
                .methods
                .iter()
                .map(|method| (*method, handler))
                .collect(),
            HandlerBinding::PerMethod(handlers) => handlers
                .iter()
                .map(|(method, handler)| (*method, handler))
                .collect(),
        }
    }
}

/// Parse `<name>` and `<name:kind>` placeholders out of a URI.
pub fn parse_path_params(uri: &str) -> Vec<PathParam> {
    uri.split('/')
        .filter_map(|segment| {
            let inner = segment.strip_prefix('<')?.strip_suffix('>')?;
            let (name, kind) = match inner.split_once(':') {
                Some((name, token)) => (name, ParamKind::from_token(token)),
                None => (inner, ParamKind::Str),
            };
            Some(PathParam {
                name: name.to_string(),
                kind,
            })
        })
        .collect()
}

/// Normalize a registered URI to its OpenAPI form.
///
/// Placeholders lose their converter (`<todo_id:int>` becomes `{todo_id}`)
/// and one trailing slash is stripped, except from the root path.
pub fn normalize_uri(uri: &str) -> String {
    let trimmed = if uri.len() > 1 {
        uri.strip_suffix('/').unwrap_or(uri)
    } else {
        uri
    };

    trimmed
        .split('/')
        .map(|segment| {
            match segment
                .strip_prefix('<')
                .and_then(|rest| rest.strip_suffix('>'))
            {
                Some(inner) => {
                    let name = inner.split(':').next().unwrap_or(inner);
                    format!("{{{}}}", name)
                }
                None => segment.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The live route table a document is generated from.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    groups: IndexMap<String, Vec<String>>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            groups: IndexMap::new(),
        }
    }

    /// Add a route
    pub fn add(&mut self, route: Route) {
        debug!("Adding route: {}", route.uri());
        self.routes.push(route);
    }

    /// Declare a named group over route names. Grouped routes inherit the
    /// group name as their default tag.
    pub fn group(
        &mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.groups.insert(
            name.into(),
            members.into_iter().map(Into::into).collect(),
        );
    }

    /// The registered routes, in registration order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The declared groups, in declaration order
    pub fn groups(&self) -> &IndexMap<String, Vec<String>> {
        &self.groups
    }

    /// The group a route belongs to; the first group declaring the route
    /// name wins.
    pub fn owning_group(&self, route_name: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, members)| members.iter().any(|member| member == route_name))
            .map(|(name, _)| name.as_str())
    }
}
