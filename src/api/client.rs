use anyhow::{Context, Result};
use std::time::Duration;

use crate::core::config::BackendConfig;
use crate::core::error::ApiError;
use crate::models::role::Role;
use crate::models::user::{User, UserPayload};

/// HTTP client for the admin REST backend.
///
/// Role association travels as repeated `roleIds` query parameters on
/// create and update; the JSON body never carries a roles array.
pub struct AdminApi {
    client: reqwest::Client,
    endpoint: String,
}

impl AdminApi {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            config.api_path
        );

        Ok(Self { client, endpoint })
    }

    /// GET the full user collection
    pub async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self
            .client
            .get(format!("{}/users", self.endpoint))
            .send()
            .await?;

        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// GET a single user by id
    pub async fn fetch_user(&self, id: i64) -> Result<User, ApiError> {
        let response = self
            .client
            .get(format!("{}/users/{}", self.endpoint, id))
            .send()
            .await?;

        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// GET the role collection
    pub async fn fetch_roles(&self) -> Result<Vec<Role>, ApiError> {
        let response = self
            .client
            .get(format!("{}/roles", self.endpoint))
            .send()
            .await?;

        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// POST a new user with the selected role ids
    pub async fn create_user(
        &self,
        payload: &UserPayload,
        role_ids: &[i64],
    ) -> Result<User, ApiError> {
        let response = self
            .client
            .post(format!("{}/users", self.endpoint))
            .query(&role_id_params(role_ids))
            .json(payload)
            .send()
            .await?;

        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// PUT an existing user with the selected role ids
    pub async fn update_user(
        &self,
        id: i64,
        payload: &UserPayload,
        role_ids: &[i64],
    ) -> Result<User, ApiError> {
        let response = self
            .client
            .put(format!("{}/users/{}", self.endpoint, id))
            .query(&role_id_params(role_ids))
            .json(payload)
            .send()
            .await?;

        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// DELETE a user by id; success responses carry no body
    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!("{}/users/{}", self.endpoint, id))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

fn role_id_params(role_ids: &[i64]) -> Vec<(&'static str, String)> {
    role_ids
        .iter()
        .map(|id| ("roleIds", id.to_string()))
        .collect()
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| server_message(&body));

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Pull a human-readable message out of an error body, if the backend sent
/// one under the conventional "error" or "message" keys.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    for key in ["error", "message"] {
        if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base_url: &str) -> BackendConfig {
        BackendConfig {
            base_url: base_url.to_string(),
            api_path: "/api/admin".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_api_client_creation() {
        let client = AdminApi::new(&backend("http://localhost:8080"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = AdminApi::new(&backend("http://localhost:8080/")).unwrap();
        assert_eq!(client.endpoint, "http://localhost:8080/api/admin");
    }

    #[test]
    fn test_role_id_params_repeat_key() {
        let params = role_id_params(&[1, 3]);
        assert_eq!(
            params,
            vec![
                ("roleIds", "1".to_string()),
                ("roleIds", "3".to_string())
            ]
        );
    }

    #[test]
    fn test_server_message_prefers_error_key() {
        let body = r#"{"error": "username already taken", "message": "other"}"#;
        assert_eq!(
            server_message(body),
            Some("username already taken".to_string())
        );
    }

    #[test]
    fn test_server_message_falls_back_to_message_key() {
        let body = r#"{"message": "validation failed"}"#;
        assert_eq!(server_message(body), Some("validation failed".to_string()));
    }

    #[test]
    fn test_server_message_none_for_other_bodies() {
        assert_eq!(server_message("not json"), None);
        assert_eq!(server_message(r#"{"detail": "nope"}"#), None);
        assert_eq!(server_message(r#"{"error": ""}"#), None);
    }
}
