#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod account;
mod client;
mod credentials;
pub mod errors;
mod rules;
mod signer;
mod util;

// --- PUBLIC API EXPORTS ---
// Transport
pub use client::core::{OfClient, OfClientBuilder};
// Session inputs and signing
pub use credentials::Credentials;
pub use rules::{DEFAULT_RULES_URL, SigningRules};
pub use signer::RequestSigner;

// Errors
pub use errors::{BuildError, Error, RequestError, Result, RulesError};

// Constants
pub use account::PAGE_SIZE;

// Re-exports
pub use reqwest::StatusCode;
