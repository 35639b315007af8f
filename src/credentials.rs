use std::fmt;

/// Session credentials lifted from a logged-in browser session.
///
/// Holds the raw cookie header (a semicolon-delimited set of `name=value`
/// pairs), the secondary `x-bc` session token, and the user-agent string the
/// session was established with. All three are sent verbatim on every
/// request and are immutable for the lifetime of the client.
#[derive(Clone)]
pub struct Credentials {
    cookie: String,
    x_bc: String,
    user_agent: String,
}

impl Credentials {
    /// Construct credentials from the raw cookie string, the `x-bc` token,
    /// and the user-agent.
    pub fn new(
        cookie: impl Into<String>,
        x_bc: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            cookie: cookie.into(),
            x_bc: x_bc.into(),
            user_agent: user_agent.into(),
        }
    }

    /// The raw cookie header value.
    pub fn cookie(&self) -> &str {
        &self.cookie
    }

    /// The secondary `x-bc` session token.
    pub fn x_bc(&self) -> &str {
        &self.x_bc
    }

    /// The user-agent the session was established with.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The account identifier, extracted from the `auth_id` cookie pair.
    ///
    /// Returns an empty string when the cookie has no `auth_id` pair. That is
    /// not a local error: signatures are still computed (and will be rejected
    /// by the remote service).
    pub fn auth_id(&self) -> String {
        for pair in self.cookie.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == "auth_id" {
                    return value.to_string();
                }
            }
        }

        String::new()
    }
}

// Cookie and token are secrets; keep them out of Debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cookie", &"<redacted>")
            .field("x_bc", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
