use serde_json::Value;

use crate::Result;
use crate::client::core::OfClient;

/// Fixed number of records requested per pagination call.
pub const PAGE_SIZE: usize = 10;

impl OfClient {
    /// Fetch the current account profile.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn example(client: ofans::OfClient) -> ofans::Result<()> {
    /// let me = client.me().await?;
    /// println!("{}", me["username"]);
    /// # Ok(()) }
    /// ```
    pub async fn me(&self) -> Result<Value> {
        self.get_json("/api2/v2/users/me").await
    }

    /// Fetch the full list of expired subscribers.
    ///
    /// Walks the subscribers listing (sorted descending by last activity,
    /// filtered to the `expired` type) in pages of [`PAGE_SIZE`], advancing
    /// the offset until the listing is exhausted. A page with fewer records
    /// than [`PAGE_SIZE`] is the last page, even when non-empty.
    ///
    /// A failed page fetch is logged and ends the walk with whatever was
    /// accumulated so far: by contract, failure and normal termination are
    /// indistinguishable from the return value alone.
    pub async fn expired_subscribers(&self) -> Vec<Value> {
        let mut offset = 0;
        let mut subscribers = Vec::new();

        loop {
            let path = format!(
                "/api2/v2/subscriptions/subscribers?limit={PAGE_SIZE}&offset={offset}&sort=desc&field=last_activity&type=expired"
            );

            let page: Vec<Value> = match self.get_json(&path).await {
                Ok(page) => page,
                Err(error) => {
                    tracing::error!(%error, offset, "expired subscribers page fetch failed");
                    break;
                }
            };

            let count = page.len();
            subscribers.extend(page);
            offset += PAGE_SIZE;

            if count == 0 || count < PAGE_SIZE {
                break;
            }
        }

        subscribers
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use serde_json::{Value, json};

    use super::PAGE_SIZE;
    use crate::errors::{Error, RequestError};
    use crate::{Credentials, OfClient, SigningRules};

    const SUBSCRIBERS_PATH: &str = "/api2/v2/subscriptions/subscribers";

    fn test_rules() -> SigningRules {
        SigningRules {
            app_token: "33d57ade8c02dbc5a333db99ff9ae26a".to_string(),
            static_param: "test_static_param".to_string(),
            checksum_constant: 1234,
            checksum_indexes: vec![0, 1, 2, 3],
            prefix: "abc".to_string(),
            suffix: "xyz".to_string(),
        }
    }

    async fn test_client(server: &MockServer) -> OfClient {
        let credentials = Credentials::new("sess=abc; auth_id=555", "xbc-token", "agent/1.0");
        let mut builder = OfClient::builder(credentials);
        builder
            .base_url(server.base_url())
            .signing_rules(test_rules())
            .request_delay(Duration::ZERO);
        builder.build().await.unwrap()
    }

    fn page(count: usize, offset: usize) -> Value {
        Value::Array(
            (0..count)
                .map(|i| json!({ "id": offset + i, "username": format!("user{}", offset + i) }))
                .collect(),
        )
    }

    #[tokio::test]
    async fn me_sends_signed_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api2/v2/users/me")
                    .header("app-token", "33d57ade8c02dbc5a333db99ff9ae26a")
                    .header("cookie", "sess=abc; auth_id=555")
                    .header("user-id", "555")
                    .header("x-bc", "xbc-token")
                    .header("accept", "application/json, text/plain, */*")
                    .header_exists("sign")
                    .header_exists("time");
                then.status(200).json_body(json!({ "id": 555, "username": "ovis" }));
            })
            .await;

        let client = test_client(&server).await;
        let me = client.me().await.unwrap();

        mock.assert_async().await;
        assert_eq!(me["username"], "ovis");
    }

    #[tokio::test]
    async fn non_success_status_is_a_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api2/v2/users/me");
                then.status(403).body("Access denied");
            })
            .await;

        let client = test_client(&server).await;

        match client.me().await {
            Err(Error::Request(RequestError::Server { status, message })) => {
                assert_eq!(status, 403);
                assert_eq!(message, "Access denied");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn pagination_stops_after_a_short_page() {
        let server = MockServer::start_async().await;
        let m0 = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(SUBSCRIBERS_PATH)
                    .query_param("offset", "0")
                    .query_param("limit", "10")
                    .query_param("sort", "desc")
                    .query_param("field", "last_activity")
                    .query_param("type", "expired");
                then.status(200).json_body(page(PAGE_SIZE, 0));
            })
            .await;
        let m1 = server
            .mock_async(|when, then| {
                when.method(GET).path(SUBSCRIBERS_PATH).query_param("offset", "10");
                then.status(200).json_body(page(PAGE_SIZE, 10));
            })
            .await;
        let m2 = server
            .mock_async(|when, then| {
                when.method(GET).path(SUBSCRIBERS_PATH).query_param("offset", "20");
                then.status(200).json_body(page(3, 20));
            })
            .await;
        let m3 = server
            .mock_async(|when, then| {
                when.method(GET).path(SUBSCRIBERS_PATH).query_param("offset", "30");
                then.status(200).json_body(page(0, 30));
            })
            .await;

        let client = test_client(&server).await;
        let subscribers = client.expired_subscribers().await;

        assert_eq!(subscribers.len(), 23);
        // Order is preserved across pages.
        assert_eq!(subscribers[0]["id"], 0);
        assert_eq!(subscribers[22]["id"], 22);

        m0.assert_async().await;
        m1.assert_async().await;
        m2.assert_async().await;
        // The short page ended the walk; offset 30 was never requested.
        m3.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn pagination_stops_on_an_empty_page() {
        let server = MockServer::start_async().await;
        let m0 = server
            .mock_async(|when, then| {
                when.method(GET).path(SUBSCRIBERS_PATH).query_param("offset", "0");
                then.status(200).json_body(page(PAGE_SIZE, 0));
            })
            .await;
        let m1 = server
            .mock_async(|when, then| {
                when.method(GET).path(SUBSCRIBERS_PATH).query_param("offset", "10");
                then.status(200).json_body(page(0, 10));
            })
            .await;

        let client = test_client(&server).await;
        let subscribers = client.expired_subscribers().await;

        assert_eq!(subscribers.len(), 10);
        m0.assert_async().await;
        m1.assert_async().await;
    }

    #[tokio::test]
    async fn pagination_stops_when_the_first_page_fails() {
        let server = MockServer::start_async().await;
        let m0 = server
            .mock_async(|when, then| {
                when.method(GET).path(SUBSCRIBERS_PATH).query_param("offset", "0");
                then.status(500).body("Internal Server Error");
            })
            .await;

        let client = test_client(&server).await;
        let subscribers = client.expired_subscribers().await;

        assert!(subscribers.is_empty());
        m0.assert_async().await;
    }

    #[tokio::test]
    async fn pagination_keeps_accumulated_records_on_a_later_failure() {
        let server = MockServer::start_async().await;
        let m0 = server
            .mock_async(|when, then| {
                when.method(GET).path(SUBSCRIBERS_PATH).query_param("offset", "0");
                then.status(200).json_body(page(PAGE_SIZE, 0));
            })
            .await;
        let m1 = server
            .mock_async(|when, then| {
                when.method(GET).path(SUBSCRIBERS_PATH).query_param("offset", "10");
                then.status(500).body("Internal Server Error");
            })
            .await;

        let client = test_client(&server).await;
        let subscribers = client.expired_subscribers().await;

        assert_eq!(subscribers.len(), 10);
        m0.assert_async().await;
        m1.assert_async().await;
    }

    #[tokio::test]
    async fn builder_fetches_rules_from_custom_url() {
        let server = MockServer::start_async().await;
        let rules_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/rules.json");
                then.status(200).json_body(json!({
                    "app-token": "33d57ade8c02dbc5a333db99ff9ae26a",
                    "static_param": "test_static_param",
                    "checksum_constant": 1234,
                    "checksum_indexes": [0, 1, 2, 3],
                    "prefix": "abc",
                    "suffix": "xyz"
                }));
            })
            .await;

        let credentials = Credentials::new("auth_id=555", "xbc-token", "agent/1.0");
        let mut builder = OfClient::builder(credentials);
        builder
            .base_url(server.base_url())
            .rules_url(server.url("/rules.json"))
            .request_delay(Duration::ZERO);
        let client = builder.build().await.unwrap();

        rules_mock.assert_async().await;
        assert_eq!(client.signer().account_id(), "555");
    }

    #[tokio::test]
    async fn unreachable_rules_fail_construction() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rules.json");
                then.status(404).body("Not Found");
            })
            .await;

        let credentials = Credentials::new("auth_id=555", "", "agent/1.0");
        let mut builder = OfClient::builder(credentials);
        builder.rules_url(server.url("/rules.json"));

        assert!(builder.build().await.is_err());
    }
}
