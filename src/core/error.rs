//! Custom error types for the crate.
//!
//! Provides structured error handling with one enum per domain:
//!
//! - [`FetchError`] - Network/fetch-related errors for API requests
//! - [`DomError`] - Document lookups and mutations
//! - [`WidgetError`] - Chart and map library calls
//! - [`DateError`] - Timestamp conversion
//!
//! Form validation failures are not errors; they are returned as data.

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request: {0}")]
    RequestCreationFailed(String),
    /// Network request failed (CORS, connection refused, etc.)
    #[error("Network error: {0}")]
    Network(String),
    /// Failed to read response body
    #[error("Failed to read response: {0}")]
    ResponseReadFailed(String),
    /// Request body could not be serialized
    #[error("JSON serialize error: {0}")]
    JsonSerialize(String),
    /// Response body is not the expected JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

/// Errors raised while reading or changing the document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomError {
    /// Browser window or document not available
    #[error("Document not available")]
    NoDocument,
    /// Selector or id did not resolve
    #[error("Element not found: {0}")]
    ElementNotFound(String),
    /// A DOM call threw
    #[error("DOM operation failed: {0}")]
    Js(String),
}

/// Errors raised by chart and map widget construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    /// Canvas or map container id did not resolve
    #[error("Element not found: #{0}")]
    ElementNotFound(String),
    /// Widget configuration could not be converted for the library
    #[error("Invalid widget configuration: {0}")]
    InvalidConfig(String),
    /// The widget library threw or is not loaded
    #[error("Widget library error: {0}")]
    Library(String),
}

/// Timestamp conversion errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DateError {
    /// Timestamp outside the representable range
    #[error("Timestamp out of range: {0}")]
    OutOfRange(i64),
}

impl From<DomError> for WidgetError {
    fn from(err: DomError) -> Self {
        match err {
            DomError::ElementNotFound(id) => Self::ElementNotFound(id),
            other => Self::Library(other.to_string()),
        }
    }
}
