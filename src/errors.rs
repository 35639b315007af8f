//! Unified error types for the `ofans` crate.
//!
//! This module centralizes all failures that can occur while using the client
//! and provides a single top-level [`Error`] enum plus the convenient
//! [`Result`] alias. Errors from lower layers (`reqwest`, URL parsing, rules
//! loading) are mapped into structured variants so callers can handle them
//! precisely.

use thiserror::Error;

// --- Build-Time Error ---

/// Errors that can occur while building an [`OfClient`](crate::OfClient).
#[derive(Debug, Error)]
pub enum BuildError {
    /// Failed to build the HTTP client (reqwest configuration).
    #[error("Failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to fetch or validate the remote signing rules.
    #[error("Failed to load signing rules: {0}")]
    Rules(#[from] RulesError),

    /// The configured base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    Parse(#[from] url::ParseError),
}

// --- Signing Rules Errors ---

/// Errors produced while fetching or validating the dynamic signing rules.
///
/// All of these are fatal at client construction: the client never retries
/// or falls back, and rules are never refreshed afterwards.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Network/protocol failure while fetching the rules document.
    #[error("HTTP transport error fetching signing rules: {0}")]
    Transport(#[from] reqwest::Error),

    /// The rules endpoint returned a non-success status.
    #[error("Rules endpoint responded with an error: {status} - {message}")]
    Server {
        /// The HTTP status code returned by the rules endpoint.
        status: reqwest::StatusCode,
        /// The response body captured for context.
        message: String,
    },

    /// The rules document was not valid JSON of the expected shape.
    #[error("Signing rules decode error: {message}")]
    Decode {
        /// Error message from the JSON deserializer.
        message: String,
    },

    /// A checksum index points outside the 40-character SHA-1 hex digest.
    ///
    /// Catching this at load time keeps signing itself infallible.
    #[error("Checksum index {index} is out of range for a SHA-1 hex digest")]
    ChecksumIndexOutOfRange {
        /// The offending index from the `checksum_indexes` array.
        index: usize,
    },
}

// --- The Main Operational Error Enum ---

/// The crate's top-level error type.
///
/// It groups failures into high-level categories:
/// - [`Error::Request`] — HTTP transport/server/decoding issues
/// - [`Error::Parse`] — URL parsing failures
/// - [`Error::Build`] — construction of the client failed
///
/// Lower-level errors automatically convert into this enum via `From`.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request/response failed (transport, server, validation, JSON).
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// URL parsing failed while preparing a request.
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] url::ParseError),

    /// Building the client failed (reqwest or rules configuration).
    #[error("Client build failed: {0}")]
    Build(#[from] BuildError),
}

// --- Consolidated Request Error ---

/// Transport and server-side HTTP errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network/protocol failure from reqwest (timeouts, TLS, I/O, etc.).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a non-success status. Includes status and body.
    #[error("Server responded with an error: {status} - {message}")]
    Server {
        /// The HTTP status code returned by the server.
        status: reqwest::StatusCode,
        /// The server response body captured for context.
        message: String,
    },

    /// Caller supplied an invalid path or credential value for this request.
    #[error("Invalid request: {message}")]
    Validation {
        /// Human-readable explanation of what was invalid.
        message: String,
    },

    /// JSON decoding failed when parsing a server response.
    #[error("JSON decode error: {message}")]
    DecodeJson {
        /// Error message from the JSON deserializer.
        message: String,
    },
}

/// A specialized `Result` type for `ofans` operations.
pub type Result<T> = std::result::Result<T, Error>;

// Ergonomic "Staircase" From Implementations ---
// A macro to reduce boilerplate for converting base errors into the top-level Error.
macro_rules! impl_from_for_error {
    ($from_type:ty, $to_variant:path) => {
        impl From<$from_type> for Error {
            fn from(err: $from_type) -> Self {
                $to_variant(err.into())
            }
        }
    };
}

// Request Errors
impl_from_for_error!(reqwest::Error, Error::Request);

// Build Errors
impl_from_for_error!(RulesError, Error::Build);
