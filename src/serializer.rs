//! Serialization module for converting OpenAPI documents to YAML or JSON format.
//!
//! This module provides functions to serialize generated documents into standard
//! formats and write them to files or return them as strings.

use crate::document::Document;
use crate::error::Result;
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes an OpenAPI document to YAML format.
///
/// The output is formatted as standard YAML, suitable for use with OpenAPI tools
/// and documentation generators.
///
/// # Arguments
///
/// * `document` - The document to serialize
///
/// # Returns
///
/// Returns the YAML string representation of the document.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Example
///
/// ```ignore
/// use openapi_from_routes::builder::DocumentBuilder;
/// use openapi_from_routes::config::DocumentConfig;
/// use openapi_from_routes::registry::ApiRegistry;
/// use openapi_from_routes::routes::RouteTable;
/// use openapi_from_routes::serializer::serialize_yaml;
///
/// let api = ApiRegistry::new();
/// let table = RouteTable::new();
/// let document = DocumentBuilder::new(&api).build(&table, &DocumentConfig::new());
/// let yaml = serialize_yaml(&document).unwrap();
/// println!("{}", yaml);
/// ```
pub fn serialize_yaml(document: &Document) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    Ok(serde_yaml::to_string(document)?)
}

/// Serializes an OpenAPI document to JSON format with pretty printing.
///
/// The output is formatted with indentation for readability, making it suitable
/// for human review and version control.
///
/// # Arguments
///
/// * `document` - The document to serialize
///
/// # Returns
///
/// Returns the JSON string representation of the document.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Example
///
/// ```ignore
/// use openapi_from_routes::builder::DocumentBuilder;
/// use openapi_from_routes::config::DocumentConfig;
/// use openapi_from_routes::registry::ApiRegistry;
/// use openapi_from_routes::routes::RouteTable;
/// use openapi_from_routes::serializer::serialize_json;
///
/// let api = ApiRegistry::new();
/// let table = RouteTable::new();
/// let document = DocumentBuilder::new(&api).build(&table, &DocumentConfig::new());
/// let json = serialize_json(&document).unwrap();
/// println!("{}", json);
/// ```
pub fn serialize_json(document: &Document) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    Ok(serde_json::to_string_pretty(document)?)
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Missing parent directories are created first.
///
/// # Arguments
///
/// * `content` - The string content to write
/// * `path` - The file path to write to
///
/// # Returns
///
/// Returns `Ok(())` on success.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, content)?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
