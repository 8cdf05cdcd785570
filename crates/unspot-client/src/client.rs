//! Booking API client implementation.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::types::CheckinListResponse;
use crate::{Booking, UnspotError};

/// Client for the Unspot booking API.
pub struct UnspotClient {
    http: Client,
    endpoint: String,
    secret: String,
}

impl UnspotClient {
    /// Create a new client for the given API endpoint and bearer secret.
    pub fn new(endpoint: impl Into<String>, secret: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
            secret: secret.into(),
        }
    }

    /// The configured API endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the bookings currently eligible for check-in.
    pub async fn checkin_available(&self) -> Result<Vec<Booking>, UnspotError> {
        let url = format!(
            "{}/api/bookings/checkin-available-list?select=",
            self.endpoint
        );

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.secret))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await?;
            return Err(UnspotError::Api { status, message });
        }

        let list: CheckinListResponse = response.json().await?;
        debug!(count = list.body.bookings.len(), "fetched check-in list");
        Ok(list.body.bookings)
    }

    /// Check in a single booking.
    pub async fn checkin(&self, booking_id: &str) -> Result<(), UnspotError> {
        let url = format!("{}/api/bookings/{}/checkin", self.endpoint, booking_id);

        let response = self
            .http
            .patch(&url)
            .header("Authorization", format!("Bearer {}", self.secret))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await?;
            return Err(UnspotError::Api { status, message });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn checkin_list_body() -> serde_json::Value {
        serde_json::json!({
            "body": {
                "bookings": [
                    { "id": "A1", "spaces": [{ "name": "Desk1" }] },
                    { "id": "A2", "spaces": [{ "name": "Desk2" }, { "name": "Desk3" }] }
                ]
            }
        })
    }

    #[test]
    fn test_client_creation() {
        let client = UnspotClient::new("https://example.com", "s3cret");
        assert_eq!(client.endpoint(), "https://example.com");
    }

    #[tokio::test]
    async fn test_checkin_available_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/bookings/checkin-available-list"))
            .and(query_param("select", ""))
            .and(header("Authorization", "Bearer s3cret"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(checkin_list_body()))
            .mount(&mock_server)
            .await;

        let client = UnspotClient::new(mock_server.uri(), "s3cret");
        let bookings = client.checkin_available().await.unwrap();

        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].id, "A1");
        assert_eq!(bookings[0].space_names(), "Desk1");
        assert_eq!(bookings[1].space_names(), "Desk2,Desk3");
    }

    #[tokio::test]
    async fn test_checkin_available_empty_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/bookings/checkin-available-list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "body": { "bookings": [] }
            })))
            .mount(&mock_server)
            .await;

        let client = UnspotClient::new(mock_server.uri(), "s3cret");
        let bookings = client.checkin_available().await.unwrap();

        assert!(bookings.is_empty());
    }

    #[tokio::test]
    async fn test_checkin_available_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/bookings/checkin-available-list"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&mock_server)
            .await;

        let client = UnspotClient::new(mock_server.uri(), "wrong-secret");
        let err = client.checkin_available().await.unwrap_err();

        match err {
            UnspotError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "unauthorized");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_checkin_available_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/bookings/checkin-available-list"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "unexpected": "shape" })),
            )
            .mount(&mock_server)
            .await;

        let client = UnspotClient::new(mock_server.uri(), "s3cret");
        let err = client.checkin_available().await.unwrap_err();

        assert!(matches!(err, UnspotError::Http(_)));
    }

    #[tokio::test]
    async fn test_checkin_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/api/bookings/A1/checkin"))
            .and(header("Authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = UnspotClient::new(mock_server.uri(), "s3cret");
        client.checkin("A1").await.unwrap();
    }

    #[tokio::test]
    async fn test_checkin_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/api/bookings/A1/checkin"))
            .respond_with(ResponseTemplate::new(409).set_body_string("already checked in"))
            .mount(&mock_server)
            .await;

        let client = UnspotClient::new(mock_server.uri(), "s3cret");
        let err = client.checkin("A1").await.unwrap_err();

        assert!(matches!(err, UnspotError::Api { status: 409, .. }));
    }
}
