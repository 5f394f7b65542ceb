//! Error types for repository operations.
//!
//! Every backend reports failures through [`RepositoryError`]. Callers match on
//! the variant, never on the message text: [`RepositoryError::NotFound`] is the
//! only variant the HTTP layer treats specially.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
///
/// Provides additional information about where and why an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "get_device", "update_device")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "device")
    pub entity: Option<String>,
    /// The entity ID if applicable
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Shorthand for a device operation on a given id.
    pub fn device(operation: impl Into<String>, id: impl ToString) -> Self {
        Self::new(operation).with_entity("device").with_entity_id(id)
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// The backing store rejected or failed the operation.
    #[error("Storage error: {message} {context}")]
    StorageError {
        message: String,
        context: ErrorContext,
    },

    /// A record could not be converted to or from the store representation.
    #[error("Serialization error: {message} {context}")]
    SerializationError {
        message: String,
        context: ErrorContext,
    },

    /// Invalid backend selection or missing connection parameters.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Create a not found error with context.
    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Shorthand for the not-found error of a device id.
    pub fn device_not_found(operation: &str, id: &str) -> Self {
        Self::not_found_with_context(
            format!("device '{}' not found", id),
            ErrorContext::device(operation, id),
        )
    }

    /// Whether this is a [`RepositoryError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The bare message, without variant prefix or context.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::StorageError { message, .. }
            | Self::SerializationError { message, .. }
            | Self::ConfigurationError { message, .. }
            | Self::InternalError { message, .. } => message,
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::NotFound { context, .. }
            | Self::StorageError { context, .. }
            | Self::SerializationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    /// Replace the error context.
    pub fn with_context(mut self, new_context: ErrorContext) -> Self {
        match &mut self {
            Self::NotFound { context, .. }
            | Self::StorageError { context, .. }
            | Self::SerializationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => *context = new_context,
        }
        self
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::NotFound { context, .. }
            | Self::StorageError { context, .. }
            | Self::SerializationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let ctx = ErrorContext::device("get_device", "/devices/abc").with_details("missing");
        assert_eq!(
            ctx.to_string(),
            "[operation=get_device, entity=device, id=/devices/abc, details=missing]"
        );
        assert_eq!(ErrorContext::default().to_string(), "[]");
    }

    #[test]
    fn test_device_not_found() {
        let err = RepositoryError::device_not_found("delete_device", "/devices/x1");
        assert!(err.is_not_found());
        assert_eq!(err.message(), "device '/devices/x1' not found");
        assert_eq!(err.context().operation.as_deref(), Some("delete_device"));
        assert_eq!(err.context().entity_id.as_deref(), Some("/devices/x1"));
        assert!(err.to_string().starts_with("Not found: device '/devices/x1' not found"));
    }

    #[test]
    fn test_only_not_found_is_not_found() {
        assert!(!RepositoryError::storage("disk full").is_not_found());
        assert!(!RepositoryError::serialization("bad item").is_not_found());
        assert!(!RepositoryError::configuration("no table").is_not_found());
        assert!(!RepositoryError::internal("boom").is_not_found());
    }

    #[test]
    fn test_with_operation() {
        let err = RepositoryError::storage("io").with_operation("create_device");
        assert_eq!(err.context().operation.as_deref(), Some("create_device"));
        assert_eq!(err.message(), "io");
    }
}
