// Centralized error handling for the admin console

use thiserror::Error;

/// Errors from talking to the backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned status {status}")]
    Status {
        status: u16,
        /// Message extracted from the error body, when the backend sent one
        message: Option<String>,
    },

    #[error("Failed to decode backend response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Message to surface in the alert region: the server-provided one when
    /// present, otherwise the caller's generic fallback.
    pub fn ui_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Client-side form validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_message_prefers_server_message() {
        let err = ApiError::Status {
            status: 400,
            message: Some("username already taken".to_string()),
        };

        assert_eq!(err.ui_message("Error saving user"), "username already taken");
    }

    #[test]
    fn test_ui_message_falls_back_without_server_message() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };

        assert_eq!(err.ui_message("Error saving user"), "Error saving user");
    }

    #[test]
    fn test_ui_message_falls_back_on_empty_server_message() {
        let err = ApiError::Status {
            status: 500,
            message: Some(String::new()),
        };

        assert_eq!(err.ui_message("Error loading users"), "Error loading users");
    }

    #[test]
    fn test_form_error_names_field() {
        let err = FormError::MissingField("email");
        assert_eq!(err.to_string(), "Missing required field: email");
    }
}
