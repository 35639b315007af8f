use std::time::Duration;

use url::Url;

use crate::credentials::Credentials;
use crate::errors::BuildError;
use crate::rules::{DEFAULT_RULES_URL, SigningRules};
use crate::signer::RequestSigner;

const DEFAULT_BASE_URL: &str = "https://onlyfans.com";

/// Courtesy pause before every request so sequential fetches don't hammer
/// the remote service.
const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(10);

/// Configures an [`OfClient`] before construction.
///
/// Customize the rules source, base URL, timeout, and inter-request delay.
/// Most code obtains this via [`OfClient::builder`].
///
/// # Defaults
/// - Rules source: [`DEFAULT_RULES_URL`], fetched once during
///   [`Self::build`]
/// - Base URL: `https://onlyfans.com`
/// - HTTP request timeout: reqwest default (no global timeout) unless set
///   via [`Self::request_timeout`]
/// - Inter-request delay: 10 ms
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// # use ofans::{Credentials, OfClient};
/// # async fn run() -> Result<(), ofans::BuildError> {
/// let credentials = Credentials::new("auth_id=...", "x-bc", "agent");
/// let client = OfClient::builder(credentials)
///     .request_timeout(Duration::from_secs(10))
///     .build()
///     .await?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct OfClientBuilder {
    credentials: Credentials,
    rules: Option<SigningRules>,
    rules_url: Option<String>,
    base_url: Option<String>,
    request_timeout: Option<Duration>,
    request_delay: Option<Duration>,
}

impl OfClientBuilder {
    pub(crate) fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            rules: None,
            rules_url: None,
            base_url: None,
            request_timeout: None,
            request_delay: None,
        }
    }

    /// Fetch the signing rules from a custom URL instead of
    /// [`DEFAULT_RULES_URL`].
    pub fn rules_url<S: Into<String>>(&mut self, url: S) -> &mut Self {
        self.rules_url = Some(url.into());
        self
    }

    /// Use already-obtained signing rules instead of fetching them.
    ///
    /// Skips the remote fetch entirely; useful for embedders that cache the
    /// rules document and for tests.
    pub fn signing_rules(&mut self, rules: SigningRules) -> &mut Self {
        self.rules = Some(rules);
        self
    }

    /// Target a different API host (primarily for tests).
    pub fn base_url<S: Into<String>>(&mut self, url: S) -> &mut Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set HTTP requests timeout.
    pub fn request_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Override the fixed pause applied before every request.
    pub fn request_delay(&mut self, delay: Duration) -> &mut Self {
        self.request_delay = Some(delay);
        self
    }

    /// Build an [`OfClient`].
    ///
    /// Unless rules were supplied via [`Self::signing_rules`], this fetches
    /// the rules document. An unreachable or malformed document, or one with
    /// out-of-range checksum indexes, fails construction; there is no
    /// fallback.
    pub async fn build(&self) -> Result<OfClient, BuildError> {
        let mut http_builder =
            reqwest::Client::builder().user_agent(self.credentials.user_agent());
        if let Some(timeout) = self.request_timeout {
            http_builder = http_builder.timeout(timeout);
        }
        let http = http_builder.build()?;

        let rules = match &self.rules {
            Some(rules) => {
                rules.validate()?;
                rules.clone()
            }
            None => {
                let url = self.rules_url.as_deref().unwrap_or(DEFAULT_RULES_URL);
                SigningRules::fetch(&http, url).await?
            }
        };

        let signer = RequestSigner::new(self.credentials.clone(), rules)?;
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        Ok(OfClient {
            http,
            signer,
            base_url,
            request_delay: self.request_delay.unwrap_or(DEFAULT_REQUEST_DELAY),
        })
    }
}

/// Signed HTTP client for the onlyfans.com API.
///
/// Owns a `reqwest` client and a [`RequestSigner`] bound to one session's
/// credentials and the signing rules fetched at construction. All requests
/// are sequential GETs with a small fixed delay between them; there is no
/// retrying, caching, or session renewal.
///
/// ### Construction
/// - [`OfClient::new`] fetches the rules from [`DEFAULT_RULES_URL`].
/// - [`OfClient::builder`] exposes the knobs (rules source, base URL,
///   timeout, delay).
/// - [`OfClient::with_rules`] constructs offline from cached rules.
///
/// ### Endpoints
/// See [`OfClient::me`] and [`OfClient::expired_subscribers`] for the
/// account wrappers, or [`OfClient::get_json`] for any other GET path.
#[derive(Debug, Clone)]
pub struct OfClient {
    pub(crate) http: reqwest::Client,
    pub(crate) signer: RequestSigner,
    pub(crate) base_url: Url,
    pub(crate) request_delay: Duration,
}

impl OfClient {
    /// Create a client with default settings, fetching the signing rules
    /// from [`DEFAULT_RULES_URL`].
    pub async fn new(credentials: Credentials) -> Result<OfClient, BuildError> {
        Self::builder(credentials).build().await
    }

    /// Returns a builder to edit settings before creating an [`OfClient`].
    pub fn builder(credentials: Credentials) -> OfClientBuilder {
        OfClientBuilder::new(credentials)
    }

    /// Create a client from already-obtained signing rules, without any
    /// network access.
    pub fn with_rules(
        credentials: Credentials,
        rules: SigningRules,
    ) -> Result<OfClient, BuildError> {
        let http = reqwest::Client::builder()
            .user_agent(credentials.user_agent())
            .build()?;
        let signer = RequestSigner::new(credentials, rules)?;

        Ok(OfClient {
            http,
            signer,
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            request_delay: DEFAULT_REQUEST_DELAY,
        })
    }

    // === Getters ===

    /// Returns a reference to the internal [`RequestSigner`].
    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }
}
