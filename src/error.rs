/// All errors that can occur while talking to the assessment portal API.
#[derive(thiserror::Error, Debug)]
pub enum PortalError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}{}", api_message(.message))]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
        message: Option<String>,
    },

    /// Failed to read the response body.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// Login was attempted without a roll number or password.
    #[error("roll number and password are required")]
    MissingCredentials,

    /// A required configuration value is not set.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}

fn api_message(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_includes_api_message() {
        let err = PortalError::UnexpectedStatus {
            url: "http://localhost/auth/login".to_string(),
            status: reqwest::StatusCode::UNAUTHORIZED,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "unexpected status 401 Unauthorized for http://localhost/auth/login: Invalid credentials"
        );
    }

    #[test]
    fn test_unexpected_status_without_message() {
        let err = PortalError::UnexpectedStatus {
            url: "http://localhost/students".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(
            err.to_string(),
            "unexpected status 500 Internal Server Error for http://localhost/students"
        );
    }
}
