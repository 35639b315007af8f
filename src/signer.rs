use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use sha1::{Digest, Sha1};

use crate::credentials::Credentials;
use crate::errors::{RequestError, RulesError};
use crate::rules::SigningRules;

const ACCEPT_JSON: &str = "application/json, text/plain, */*";

/// Produces the header set that authenticates one GET request.
///
/// A signer binds [`Credentials`] to a validated set of [`SigningRules`] and
/// precomputes the account identifier from the `auth_id` cookie pair. Given a
/// request path it emits the full header map: `accept`, `app-token`,
/// `cookie`, `sign`, `time`, `user-id`, `user-agent`, and `x-bc`.
///
/// The signature over a path is deterministic for a fixed timestamp, which is
/// what [`RequestSigner::sign_at`] exposes; [`RequestSigner::headers`] stamps
/// the current wall-clock time and is therefore not repeatable across calls.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
    rules: SigningRules,
    account_id: String,
}

impl RequestSigner {
    /// Bind credentials to signing rules.
    ///
    /// Validates the rules' checksum indexes up front so signing itself never
    /// has to handle an out-of-range access.
    pub fn new(
        credentials: Credentials,
        rules: SigningRules,
    ) -> std::result::Result<Self, RulesError> {
        rules.validate()?;
        let account_id = credentials.auth_id();

        Ok(Self {
            credentials,
            rules,
            account_id,
        })
    }

    /// The account identifier extracted from the cookie at construction.
    ///
    /// Empty when the cookie carried no `auth_id` pair.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Compute the `sign` header value for `path` at a fixed timestamp.
    ///
    /// The digest is the hex SHA-1 of the newline-joined static parameter,
    /// decimal millisecond timestamp, request path, and account identifier.
    /// The checksum sums the digest's character codes at the rules' index
    /// positions plus the checksum constant, rendered as lowercase hex inside
    /// the `prefix:digest:checksum:suffix` envelope.
    pub fn sign_at(&self, path: &str, unix_ms: u64) -> String {
        let timestamp = unix_ms.to_string();
        let message = [
            self.rules.static_param.as_str(),
            timestamp.as_str(),
            path,
            self.account_id.as_str(),
        ]
        .join("\n");

        let digest = hex::encode(Sha1::digest(message.as_bytes()));
        let checksum = checksum(&digest, &self.rules.checksum_indexes, self.rules.checksum_constant);

        format!(
            "{}:{}:{:x}:{}",
            self.rules.prefix, digest, checksum, self.rules.suffix
        )
    }

    /// Build the full authentication header map for `path` at a fixed
    /// timestamp.
    ///
    /// Fails with [`RequestError::Validation`] when a credential value is not
    /// valid HTTP header text (embedded newlines and the like).
    pub fn headers_at(
        &self,
        path: &str,
        unix_ms: u64,
    ) -> std::result::Result<HeaderMap, RequestError> {
        let sign = self.sign_at(path, unix_ms);
        let time = unix_ms.to_string();

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(
            HeaderName::from_static("app-token"),
            header_value("app-token", &self.rules.app_token)?,
        );
        headers.insert(
            header::COOKIE,
            header_value("cookie", self.credentials.cookie())?,
        );
        headers.insert(HeaderName::from_static("sign"), header_value("sign", &sign)?);
        headers.insert(HeaderName::from_static("time"), header_value("time", &time)?);
        headers.insert(
            HeaderName::from_static("user-id"),
            header_value("user-id", &self.account_id)?,
        );
        headers.insert(
            header::USER_AGENT,
            header_value("user-agent", self.credentials.user_agent())?,
        );
        headers.insert(
            HeaderName::from_static("x-bc"),
            header_value("x-bc", self.credentials.x_bc())?,
        );

        Ok(headers)
    }

    /// Build the authentication header map for `path` stamped with the
    /// current wall-clock time.
    pub fn headers(&self, path: &str) -> std::result::Result<HeaderMap, RequestError> {
        self.headers_at(path, unix_ms_now())
    }
}

/// Sum the digest's character codes at `indexes`, plus `constant`.
///
/// Indexes are bounds-checked against the digest at rules-load time.
fn checksum(digest: &str, indexes: &[usize], constant: i64) -> i64 {
    let bytes = digest.as_bytes();
    indexes.iter().map(|&i| i64::from(bytes[i])).sum::<i64>() + constant
}

fn header_value(name: &str, value: &str) -> std::result::Result<HeaderValue, RequestError> {
    HeaderValue::from_str(value).map_err(|_| RequestError::Validation {
        message: format!("{name} header contains invalid characters"),
    })
}

/// Current Unix time in milliseconds.
fn unix_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
