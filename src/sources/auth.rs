//! Account endpoints: login, registration, and profile.

use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use tracing::{debug, info};

use super::envelope::decode_user;
use super::{ApiClient, ApiError, AuthApi, AuthPayload, RegisterForm, Result};
use crate::state::User;
use crate::util::secret_preview;

/// File name and MIME type the backend expects for profile photos.
const PROFILE_FILE_NAME: &str = "photo.jpg";
const PROFILE_MIME: &str = "image/jpeg";

impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload> {
        let body = json!({ "email": email, "password": password });
        let v = self
            .send_json(self.post("/api/users/login", None).json(&body), "login")
            .await?;
        let payload = auth_payload(&v)?;
        info!(user = %payload.user.id, token = %secret_preview(&payload.token), "[Auth] login accepted");
        Ok(payload)
    }

    async fn register(&self, form: &RegisterForm) -> Result<AuthPayload> {
        if form.profile_photo.as_os_str().is_empty() {
            return Err(ApiError::MissingInput("Profile photo"));
        }
        let bytes = tokio::fs::read(&form.profile_photo)
            .await
            .map_err(|e| ApiError::local_file(&form.profile_photo, &e))?;
        debug!(
            email = %form.email,
            user_name = %form.user_name,
            photo_bytes = bytes.len(),
            "[Auth] sending registration"
        );
        let part = Part::bytes(bytes)
            .file_name(PROFILE_FILE_NAME)
            .mime_str(PROFILE_MIME)?;
        let multipart = Form::new()
            .text("email", form.email.clone())
            .text("password", form.password.clone())
            .text("userName", form.user_name.clone())
            .part("profile", part);
        let v = self
            .send_json(self.post("/api/users/register", None).multipart(multipart), "register")
            .await?;
        let payload = auth_payload(&v)?;
        info!(user = %payload.user.id, "[Auth] registration accepted");
        Ok(payload)
    }

    async fn my_profile(&self, token: &str) -> Result<User> {
        let v = self
            .send_json(self.get("/api/users/myProfile", Some(token)), "myProfile")
            .await?;
        decode_user(&v).ok_or_else(|| ApiError::Malformed("profile response has no user".into()))
    }
}

/// What: Pull `{token, user}` out of a login or registration response.
///
/// # Errors
/// - `Malformed` when either part is missing or the user does not decode.
fn auth_payload(v: &Value) -> Result<AuthPayload> {
    let token = crate::util::ss(v, &["token"])
        .ok_or_else(|| ApiError::Malformed("response has no token".into()))?;
    let user = v
        .get("user")
        .and_then(|u| serde_json::from_value::<User>(u.clone()).ok())
        .ok_or_else(|| ApiError::Malformed("response has no user".into()))?;
    Ok(AuthPayload { token, user })
}
