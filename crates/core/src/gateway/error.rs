//! Gateway error types.

use thiserror::Error;

use crate::codec::CodecError;

/// Gateway operation errors.
///
/// Every failure crossing the gateway boundary is one of these variants; no
/// vendor type leaks past it. [`GatewayError::status_code`] selects the HTTP
/// status the handler layer responds with.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Gateway construction input is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller input is missing or empty.
    #[error("validation error: {0}")]
    Validation(String),

    /// Payload is not valid base64.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The blob does not exist.
    #[error("blob not found: {name}")]
    NotFound {
        /// Name of the missing blob.
        name: String,
    },

    /// The vendor rejected the operation with a classifiable status.
    #[error("storage rejected the operation ({status}): {message}")]
    Storage {
        /// Vendor-reported status, passed through to the caller.
        status: u16,
        /// Vendor-reported message.
        message: String,
    },

    /// Copy succeeded but the source delete failed; both blobs remain.
    /// Retrying the rename resumes at the delete-only phase.
    #[error(
        "rename of '{source_name}' to '{dest_name}' incomplete: copy succeeded, source delete failed: {message}"
    )]
    RenameIncomplete {
        /// Source blob name, still present.
        source_name: String,
        /// Destination blob name, holding the copied content.
        dest_name: String,
        /// Vendor-reported reason the delete failed.
        message: String,
    },

    /// Transport failure or any other unclassified vendor error.
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Encoding(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Storage { status, .. } => *status,
            Self::Config(_) | Self::RenameIncomplete { .. } | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Encoding(_) => "ENCODING_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Storage { .. } => "STORAGE_ERROR",
            Self::RenameIncomplete { .. } => "RENAME_INCOMPLETE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<CodecError> for GatewayError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Encoding(e) => Self::Encoding(e.to_string()),
            CodecError::Stream(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::Config(String::new()).status_code(), 500);
        assert_eq!(GatewayError::validation("x").status_code(), 400);
        assert_eq!(GatewayError::Encoding(String::new()).status_code(), 400);
        assert_eq!(GatewayError::not_found("a").status_code(), 404);
        assert_eq!(
            GatewayError::Storage {
                status: 403,
                message: String::new()
            }
            .status_code(),
            403
        );
        assert_eq!(
            GatewayError::RenameIncomplete {
                source_name: "a".into(),
                dest_name: "b".into(),
                message: String::new()
            }
            .status_code(),
            500
        );
        assert_eq!(GatewayError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(GatewayError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(GatewayError::not_found("a").error_code(), "NOT_FOUND");
        assert_eq!(
            GatewayError::Storage {
                status: 429,
                message: String::new()
            }
            .error_code(),
            "STORAGE_ERROR"
        );
        assert_eq!(
            GatewayError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_rename_incomplete_keeps_vendor_message() {
        let err = GatewayError::RenameIncomplete {
            source_name: "a.txt".into(),
            dest_name: "b.txt".into(),
            message: "delete timed out".into(),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "RENAME_INCOMPLETE");
        assert!(err.to_string().contains("delete timed out"));
    }

    #[test]
    fn test_codec_error_classification() {
        let encoding: GatewayError = crate::codec::decode("not base64!!")
            .expect_err("invalid base64")
            .into();
        assert!(matches!(encoding, GatewayError::Encoding(_)));

        let stream: GatewayError = CodecError::Stream("reset".into()).into();
        assert!(matches!(stream, GatewayError::Internal(_)));
    }
}
