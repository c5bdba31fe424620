//! Classified error type shared by every layer of the crate.
//!
//! Each variant names the stage that failed so callers (and the CLI) can
//! report "key service unreachable" vs "malformed ciphertext" vs
//! "row 7 redirect missing Location header" without string matching.

/// Application error with one variant per failure class.
///
/// Leaf errors are never retried anywhere in the crate. A
/// [`AppError::Decryption`] carries an optional boxed cause so a key-service
/// failure inside the DLC path stays classified while the payload as a whole
/// is reported as undecryptable.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input to a value constructor.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// A payload reference or metadata could not be scraped from the page.
    #[error("extraction failed: {message}")]
    Extraction { message: String },

    /// A payload could not be decrypted; treated as "payload absent" by the
    /// container build.
    #[error("payload decryption failed: {message}")]
    Decryption {
        message: String,
        #[source]
        source: Option<Box<AppError>>,
    },

    /// The key-derivation service returned an unusable response or the
    /// request failed at the transport level.
    #[error("key service request failed: {message}; check your internet connection")]
    KeyService { message: String },

    /// A single row's two-stage redirect resolution failed.
    #[error("link resolution failed: {message}")]
    Resolution { message: String },

    /// Invariant violation while assembling the container.
    #[error("container assembly failed: {message}")]
    Assembly { message: String },

    /// Transport failure outside the key-service and resolution scopes
    /// (container page or package download).
    #[error("http request failed: {message}")]
    Http { message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    pub fn decryption(message: impl Into<String>) -> Self {
        Self::Decryption {
            message: message.into(),
            source: None,
        }
    }

    /// Decryption failure with the underlying classified error preserved.
    pub fn decryption_caused_by(message: impl Into<String>, cause: AppError) -> Self {
        Self::Decryption {
            message: message.into(),
            source: Some(Box::new(cause)),
        }
    }

    pub fn key_service(message: impl Into<String>) -> Self {
        Self::KeyService {
            message: message.into(),
        }
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            message: message.into(),
        }
    }

    pub fn assembly(message: impl Into<String>) -> Self {
        Self::Assembly {
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    /// The stage-specific message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Extraction { message }
            | Self::Decryption { message, .. }
            | Self::KeyService { message }
            | Self::Resolution { message }
            | Self::Assembly { message }
            | Self::Http { message } => message,
        }
    }

    /// Short name of the failed stage, used in user-facing reports.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Extraction { .. } => "extraction",
            Self::Decryption { .. } => "decryption",
            Self::KeyService { .. } => "key service",
            Self::Resolution { .. } => "resolution",
            Self::Assembly { .. } => "assembly",
            Self::Http { .. } => "http",
        }
    }
}
