// Transit API HTTP client.
// Wraps reqwest with a configurable base URL and typed error mapping.

use reqwest::{Client, Response};

use crate::error::{DeparturesError, Result};

/// Stop index of the OTP router this application was built against.
pub const DEFAULT_BASE_URL: &str = "http://beta.digitransit.fi/otp/routers/hsl/index";

/// HTTP client for the transit stop-index API.
pub struct TransitClient {
    client: Client,
    base_url: String,
}

impl TransitClient {
    /// Create a client against the given stop-index base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The stop-index base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request to an endpoint path under the base URL.
    pub(crate) async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(DeparturesError::Network)?;

        check_response(response).await
    }
}

impl Default for TransitClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Check response status; a non-success response becomes an error carrying
/// the status code, requested URL, and body text.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(DeparturesError::Http {
        status: status.as_u16(),
        url,
        body,
    })
}
