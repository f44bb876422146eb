use tracing::{debug, instrument};

use crate::api::{endpoint, post_json};
use crate::error::{PortalError, Result};
use crate::model::{LoginRequest, LoginResponse, Registration, Session};

#[instrument(skip(client, request), fields(rollno = %request.rollno))]
pub(crate) async fn login(
    client: &reqwest::Client,
    base_url: &str,
    request: &LoginRequest,
) -> Result<Session> {
    if request.rollno.trim().is_empty() || request.password.is_empty() {
        return Err(PortalError::MissingCredentials);
    }
    let url = endpoint(base_url, "auth/login");
    let response: LoginResponse = post_json(client, &url, request, None).await?;
    debug!(student_id = %response.student.id, "logged in");
    Ok(Session {
        token: response.token,
        student: response.student,
    })
}

#[instrument(skip(client, registration), fields(rollno = %registration.rollno))]
pub(crate) async fn register(
    client: &reqwest::Client,
    base_url: &str,
    registration: &Registration,
) -> Result<()> {
    let url = endpoint(base_url, "auth/register");
    let _: serde_json::Value = post_json(client, &url, registration, None).await?;
    debug!("registered");
    Ok(())
}
