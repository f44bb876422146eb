pub(crate) mod assessments;
pub(crate) mod auth;
pub(crate) mod students;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{PortalError, Result};
use crate::model::ApiMessage;

/// Send a GET request and decode the JSON response body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T> {
    debug!(url, "fetching");
    let response = client.get(url).send().await.map_err(|e| PortalError::Http {
        url: url.to_owned(),
        source: e,
    })?;
    read_json(url, response).await
}

/// Send a JSON POST request and decode the JSON response body.
pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
    token: Option<&str>,
) -> Result<T> {
    debug!(url, "posting");
    let mut request = client.post(url).json(body);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    let response = request.send().await.map_err(|e| PortalError::Http {
        url: url.to_owned(),
        source: e,
    })?;
    read_json(url, response).await
}

async fn read_json<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(|e| PortalError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiMessage>(&body)
            .ok()
            .and_then(|m| m.message);
        return Err(PortalError::UnexpectedStatus {
            url: url.to_owned(),
            status,
            message,
        });
    }

    // some endpoints answer success with an empty body
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(body).map_err(|e| PortalError::Decode {
        url: url.to_owned(),
        source: e,
    })
}

/// Join `path` onto the API base URL.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        assert_eq!(
            endpoint("http://localhost:5000/api/", "/tests/all"),
            "http://localhost:5000/api/tests/all"
        );
        assert_eq!(
            endpoint("http://localhost:5000/api", "students"),
            "http://localhost:5000/api/students"
        );
    }
}
