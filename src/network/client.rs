//! HTTP client wrapper - one round trip per call, no retries, no caching

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{ContactSubmission, Property};

/// Thin client for the BH Investment API
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, None)
    }

    /// Build a client; `timeout` of `None` keeps reqwest's default
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Self {
        ApiClient {
            http: create_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn properties_url(&self) -> String {
        format!("{}/properties", self.base_url)
    }

    /// `{base}/properties/{id}`, with `id` encoded as a single path segment
    pub fn property_url(&self, id: &str) -> Result<Url, ApiError> {
        let invalid = |detail: String| ApiError::Network(format!("Invalid API URL: {}", detail));
        let mut url = Url::parse(&self.properties_url()).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }

    pub fn contact_url(&self) -> String {
        format!("{}/contact", self.base_url)
    }

    /// `GET /properties`
    pub async fn list_properties(&self) -> Result<Vec<Property>, ApiError> {
        let resp = self
            .http
            .get(self.properties_url())
            .send()
            .await
            .map_err(|e| ApiError::Network(describe_transport_error(&e)))?;
        let status = resp.status().as_u16();
        let body = read_body(resp).await?;
        check_status(status, &body, Endpoint::List)?;
        decode(&body)
    }

    /// `GET /properties/{id}`
    pub async fn get_property(&self, id: &str) -> Result<Property, ApiError> {
        let resp = self
            .http
            .get(self.property_url(id)?)
            .send()
            .await
            .map_err(|e| ApiError::Network(describe_transport_error(&e)))?;
        let status = resp.status().as_u16();
        let body = read_body(resp).await?;
        check_status(status, &body, Endpoint::Detail)?;
        decode(&body)
    }

    /// `POST /contact`; the created record in the response is not needed
    pub async fn submit_contact(&self, payload: &ContactSubmission) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.contact_url())
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Network(describe_transport_error(&e)))?;
        let status = resp.status().as_u16();
        let body = read_body(resp).await?;
        check_status(status, &body, Endpoint::Contact)
    }
}

/// Which call a status code belongs to; decides how non-2xx is classified
#[derive(Clone, Copy, Debug, PartialEq)]
enum Endpoint {
    List,
    Detail,
    Contact,
}

async fn read_body(resp: reqwest::Response) -> Result<String, ApiError> {
    resp.text()
        .await
        .map_err(|e| ApiError::Network(format!("Error reading body: {}", e)))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Network(format!("Invalid response body: {}", e)))
}

/// Map a status code to the error taxonomy
fn check_status(status: u16, body: &str, endpoint: Endpoint) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    match (endpoint, status) {
        (Endpoint::Detail, 404) => Err(ApiError::NotFound),
        (Endpoint::Contact, 400 | 422) => Err(ApiError::Validation(
            server_detail(body).unwrap_or_else(|| format!("Request rejected (HTTP {})", status)),
        )),
        _ => Err(ApiError::Network(match server_detail(body) {
            Some(detail) => format!("HTTP {}: {}", status, detail),
            None => format!("HTTP {}", status),
        })),
    }
}

/// Pull the `detail` field out of an error body.
///
/// Accepts both `{"detail": "text"}` and the list form
/// `{"detail": [{"msg": "..."}, ...]}` produced for schema violations.
fn server_detail(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    match json.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Create an HTTP client, optionally with an overall timeout
fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_strip_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/api/");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.properties_url(), "http://localhost:8000/api/properties");
        assert_eq!(client.property_url("42").unwrap().as_str(), "http://localhost:8000/api/properties/42");
        assert_eq!(client.contact_url(), "http://localhost:8000/api/contact");
    }

    #[test]
    fn test_property_id_is_one_path_segment() {
        let client = ApiClient::new("http://localhost:8000/api");
        assert_eq!(
            client.property_url("unit 4/B?x=1#top").unwrap().as_str(),
            "http://localhost:8000/api/properties/unit%204%2FB%3Fx=1%23top"
        );
    }

    #[test]
    fn test_unparsable_base_is_network_error() {
        let client = ApiClient::new("not a url");
        assert!(matches!(client.property_url("42"), Err(ApiError::Network(_))));
    }

    #[test]
    fn test_404_is_not_found_only_for_detail() {
        assert_eq!(check_status(404, "", Endpoint::Detail), Err(ApiError::NotFound));
        assert!(matches!(check_status(404, "", Endpoint::List), Err(ApiError::Network(_))));
        assert!(matches!(check_status(404, "", Endpoint::Contact), Err(ApiError::Network(_))));
    }

    #[test]
    fn test_success_range() {
        assert!(check_status(200, "", Endpoint::List).is_ok());
        assert!(check_status(201, "", Endpoint::Contact).is_ok());
        assert!(check_status(204, "", Endpoint::Contact).is_ok());
    }

    #[test]
    fn test_contact_rejection_is_validation() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required","type":"missing"}]}"#;
        assert_eq!(
            check_status(422, body, Endpoint::Contact),
            Err(ApiError::Validation("field required".into()))
        );
        assert_eq!(
            check_status(400, "", Endpoint::Contact),
            Err(ApiError::Validation("Request rejected (HTTP 400)".into()))
        );
    }

    #[test]
    fn test_server_error_keeps_detail() {
        assert_eq!(
            check_status(500, r#"{"detail":"database down"}"#, Endpoint::Detail),
            Err(ApiError::Network("HTTP 500: database down".into()))
        );
        assert_eq!(
            check_status(502, "<html>bad gateway</html>", Endpoint::List),
            Err(ApiError::Network("HTTP 502".into()))
        );
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let result: Result<Vec<Property>, _> = decode(r#"{"not":"a list"}"#);
        assert!(matches!(result, Err(ApiError::Network(msg)) if msg.starts_with("Invalid response body")));
    }
}
