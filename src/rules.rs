use serde::Deserialize;

use crate::errors::RulesError;

/// Default location of the maintained dynamic-rules document.
pub const DEFAULT_RULES_URL: &str =
    "https://raw.githubusercontent.com/SneakyOvis/onlyfans-dynamic-rules/main/rules.json";

/// A SHA-1 digest rendered as lowercase hex is always 40 characters.
const DIGEST_HEX_LEN: usize = 40;

/// Parameters controlling how request signatures are constructed.
///
/// These rotate with the site's frontend bundle and are published as a JSON
/// document. They are fetched exactly once per client lifetime and treated as
/// immutable configuration; there is no refresh.
///
/// Expected document shape:
///
/// ```json
/// {
///   "app-token": "33d57ade8c02dbc5a333db99ff9ae26a",
///   "static_param": "...",
///   "checksum_constant": 123,
///   "checksum_indexes": [2, 3, 5, 7],
///   "prefix": "...",
///   "suffix": "..."
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SigningRules {
    /// Application token sent as the `app-token` header.
    #[serde(rename = "app-token")]
    pub app_token: String,
    /// Static parameter prepended to every signed message.
    pub static_param: String,
    /// Constant added to the checksum sum. May be negative: the upstream
    /// extractor records both additions and subtractions.
    pub checksum_constant: i64,
    /// Positions in the hex digest whose character codes are summed.
    pub checksum_indexes: Vec<usize>,
    /// Fixed prefix of the signature envelope.
    pub prefix: String,
    /// Fixed suffix of the signature envelope.
    pub suffix: String,
}

impl SigningRules {
    /// Fetch and validate the rules document from `url`.
    pub(crate) async fn fetch(
        http: &reqwest::Client,
        url: &str,
    ) -> std::result::Result<Self, RulesError> {
        let response = http.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown Error")
                    .to_string()
            });
            return Err(RulesError::Server { status, message });
        }

        let rules: SigningRules = response.json().await.map_err(|e| RulesError::Decode {
            message: e.to_string(),
        })?;
        rules.validate()?;

        Ok(rules)
    }

    /// Check that every checksum index lands inside the hex digest.
    ///
    /// Performed at load time so an out-of-range index is a configuration
    /// error rather than something signing has to defend against per call.
    pub fn validate(&self) -> std::result::Result<(), RulesError> {
        if let Some(&index) = self.checksum_indexes.iter().find(|&&i| i >= DIGEST_HEX_LEN) {
            return Err(RulesError::ChecksumIndexOutOfRange { index });
        }

        Ok(())
    }
}
