// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the key-value store.
//!
//! Every failure surfaced by a store, a backend or the registry is a [`KvError`].
//! Each variant maps onto an [`ErrorKind`], which in turn carries a stable
//! numeric code so callers that only care about the class of failure (or that
//! need to report it across a process boundary) do not have to match on the
//! full enum.

use thiserror::Error;

/// The class of a [`KvError`].
///
/// Codes follow the POSIX errno values the store has always reported, so a
/// shell wrapper can pass them straight through as exit statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No backend is registered for a scheme, or the registry itself is misconfigured.
    InvalidConfiguration,
    /// The storage medium could not be read or written.
    BackendUnavailable,
    /// Malformed input: a bad key path, a bad URL, or mismatched key/value counts.
    InvalidArguments,
    /// A delete targeted a key that does not exist.
    KeyNotFound,
    /// A set tried to descend through a value that is not a mapping.
    TypeConflict,
}

impl ErrorKind {
    /// Returns the numeric code for this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexkv::domain::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::KeyNotFound.code(), 2);
    /// assert_eq!(ErrorKind::InvalidArguments.code(), 22);
    /// ```
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::KeyNotFound => 2,
            ErrorKind::BackendUnavailable => 5,
            ErrorKind::TypeConflict => 20,
            ErrorKind::InvalidConfiguration | ErrorKind::InvalidArguments => 22,
        }
    }
}

/// The main error type for key-value store operations.
///
/// Marked `#[non_exhaustive]` so new backends can grow the taxonomy without
/// breaking downstream matches.
///
/// # Examples
///
/// ```
/// use hexkv::domain::{ErrorKind, KvError};
///
/// let err = KvError::KeyNotFound {
///     key: "database.host".to_string(),
/// };
/// assert_eq!(err.kind(), ErrorKind::KeyNotFound);
/// assert_eq!(err.to_string(), "Key not found: database.host");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KvError {
    /// The registry cannot provide a store for the scheme.
    #[error("Invalid store type '{scheme}': {reason}")]
    InvalidConfiguration {
        /// The scheme that could not be served
        scheme: String,
        /// Why it could not be served
        reason: String,
    },

    /// A backend failed to load or dump its document.
    #[error("Backend '{backend}' unavailable: {message}")]
    BackendUnavailable {
        /// The name of the backend that failed
        backend: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The caller passed malformed input.
    #[error("Invalid arguments: {message}")]
    InvalidArguments {
        /// The error message
        message: String,
    },

    /// The final segment of a key path does not exist.
    #[error("Key not found: {key}")]
    KeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// An intermediate segment of a key path holds a non-mapping value.
    #[error("Type conflict at '{segment}' while setting '{key}': existing value is not a mapping")]
    TypeConflict {
        /// The full key being set
        key: String,
        /// The segment holding the non-mapping value
        segment: String,
    },
}

impl KvError {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KvError::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            KvError::BackendUnavailable { .. } => ErrorKind::BackendUnavailable,
            KvError::InvalidArguments { .. } => ErrorKind::InvalidArguments,
            KvError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            KvError::TypeConflict { .. } => ErrorKind::TypeConflict,
        }
    }

    /// Returns the numeric code of this error's kind.
    pub fn code(&self) -> i32 {
        self.kind().code()
    }

    /// Creates a `BackendUnavailable` error wrapping an underlying cause.
    pub fn backend<E>(backend: impl Into<String>, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        KvError::BackendUnavailable {
            backend: backend.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a `BackendUnavailable` error with no underlying cause.
    pub fn backend_msg(backend: impl Into<String>, message: impl Into<String>) -> Self {
        KvError::BackendUnavailable {
            backend: backend.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates an `InvalidArguments` error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        KvError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Creates an `InvalidConfiguration` error for a scheme with no registered backend.
    pub fn unknown_scheme(scheme: impl Into<String>) -> Self {
        KvError::InvalidConfiguration {
            scheme: scheme.into(),
            reason: "no backend is registered for this scheme".to_string(),
        }
    }
}

/// A specialized Result type for key-value store operations.
pub type Result<T> = std::result::Result<T, KvError>;
