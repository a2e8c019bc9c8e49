//! Document-level configuration.

/// Settings applied when a document is built.
///
/// Everything has a usable default, so `DocumentConfig::new()` alone yields a
/// valid document.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// API title
    pub title: String,
    /// API version string
    pub version: String,
    /// API description
    pub description: Option<String>,
    /// Terms-of-service URL
    pub terms_of_service: Option<String>,
    /// Contact name
    pub contact_name: Option<String>,
    /// Contact URL
    pub contact_url: Option<String>,
    /// Contact email
    pub contact_email: Option<String>,
    /// License name
    pub license_name: Option<String>,
    /// License URL
    pub license_url: Option<String>,
    /// Path the document is served under
    pub serve_path: String,
    /// Media type used for content declared without one
    pub default_media_type: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            description: None,
            terms_of_service: None,
            contact_name: None,
            contact_url: None,
            contact_email: None,
            license_name: None,
            license_url: None,
            serve_path: "openapi.json".to_string(),
            default_media_type: "*/*".to_string(),
        }
    }
}

impl DocumentConfig {
    /// Configuration with every default in place
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the API version string
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the API description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the terms-of-service URL
    pub fn with_terms_of_service(mut self, url: impl Into<String>) -> Self {
        self.terms_of_service = Some(url.into());
        self
    }

    /// Set the contact name
    pub fn with_contact_name(mut self, name: impl Into<String>) -> Self {
        self.contact_name = Some(name.into());
        self
    }

    /// Set the contact URL
    pub fn with_contact_url(mut self, url: impl Into<String>) -> Self {
        self.contact_url = Some(url.into());
        self
    }

    /// Set the contact email
    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    /// Set the license name
    pub fn with_license_name(mut self, name: impl Into<String>) -> Self {
        self.license_name = Some(name.into());
        self
    }

    /// Set the license URL
    pub fn with_license_url(mut self, url: impl Into<String>) -> Self {
        self.license_url = Some(url.into());
        self
    }

    /// Set the path the document is served under
    pub fn with_serve_path(mut self, path: impl Into<String>) -> Self {
        self.serve_path = path.into();
        self
    }

    /// Set the media type used for content declared without one
    pub fn with_default_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.default_media_type = media_type.into();
        self
    }
}
