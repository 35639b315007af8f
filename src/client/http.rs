use reqwest::Response;
use url::Url;

use super::core::OfClient;

use crate::Result;
use crate::errors::RequestError;
use crate::util::check_http_status;

impl OfClient {
    /// Resolve `path` against the client's base URL.
    ///
    /// The path is appended byte-for-byte: the same string that goes into
    /// the signature goes on the wire, with no extra encoding pass.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// Signed HTTP `GET`.
    ///
    /// Waits the fixed inter-request delay, signs the path, and issues the
    /// request. Non-2xx responses surface as
    /// [`RequestError::Server`] with the status and body captured.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn example(client: ofans::OfClient) -> ofans::Result<()> {
    /// let resp = client.get("/api2/v2/users/me").await?;
    /// let body = resp.text().await?;
    /// # Ok(()) }
    /// ```
    pub async fn get(&self, path: &str) -> Result<Response> {
        tokio::time::sleep(self.request_delay).await;

        let headers = self.signer.headers(path)?;
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");

        let response = self.http.get(url).headers(headers).send().await?;
        check_http_status(response).await
    }

    /// Signed GET, deserializing the JSON response body.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn example(client: ofans::OfClient) -> ofans::Result<()> {
    /// let me: serde_json::Value = client.get_json("/api2/v2/users/me").await?;
    /// # Ok(()) }
    /// ```
    pub async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.get(path).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| {
                RequestError::DecodeJson {
                    message: e.to_string(),
                }
                .into()
            })
    }
}
