//! Typed HTTP client for the REST API, used by the UI on every platform.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::models::{NewNote, Note, NotePatch, Theme};

use crate::models::{
    AuthResponse, ErrorBody, LoginRequest, MessageResponse, ProfileImageBody, RegisterRequest, ThemeBody,
    UsernameRequest, UsernameResponse,
};

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// The request never produced a response, or the body could not be decoded.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with an error status.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// The session token was rejected and the user has to sign in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Client bound to the base URL of the API, e.g. `http://localhost:3000/api`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(http: reqwest::Client, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { http, base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base, path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        Err(Self::error_from(status, response).await)
    }

    async fn error_from(status: StatusCode, response: reqwest::Response) -> ClientError {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };
        tracing::debug!(status = status.as_u16(), %message, "API request failed");
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }

    async fn json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> ClientResult<T> {
        Self::send(self.request(method, path, token).json(body)).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.json(Method::POST, "/register", None, req).await
    }

    pub async fn login(&self, req: &LoginRequest) -> ClientResult<AuthResponse> {
        self.json(Method::POST, "/login", None, req).await
    }

    pub async fn list_notes(&self, token: &str) -> ClientResult<Vec<Note>> {
        Self::send(self.request(Method::GET, "/notes", Some(token))).await
    }

    pub async fn create_note(&self, token: &str, note: &NewNote) -> ClientResult<Note> {
        self.json(Method::POST, "/notes", Some(token), note).await
    }

    /// `None` when the server no longer has the note.
    pub async fn update_note(&self, token: &str, id: &str, patch: &NotePatch) -> ClientResult<Option<Note>> {
        self.json(Method::PUT, &format!("/notes/{id}"), Some(token), patch)
            .await
    }

    pub async fn delete_note(&self, token: &str, id: &str) -> ClientResult<MessageResponse> {
        Self::send(self.request(Method::DELETE, &format!("/notes/{id}"), Some(token))).await
    }

    pub async fn set_theme(&self, token: &str, theme: Theme) -> ClientResult<Theme> {
        let body: ThemeBody = self
            .json(Method::PUT, "/user/theme", Some(token), &ThemeBody { theme })
            .await?;
        Ok(body.theme)
    }

    pub async fn set_profile_image(&self, token: &str, image: Option<String>) -> ClientResult<Option<String>> {
        let body: ProfileImageBody = self
            .json(
                Method::PUT,
                "/user/profile-image",
                Some(token),
                &ProfileImageBody { profile_image: image },
            )
            .await?;
        Ok(body.profile_image)
    }

    pub async fn set_username(&self, token: &str, username: &str) -> ClientResult<UsernameResponse> {
        let body = UsernameRequest {
            username: Some(username.to_string()),
        };
        self.json(Method::PUT, "/user/username", Some(token), &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_trailing_slash() {
        assert_eq!(ApiClient::new("http://localhost:3000/api/").base(), "http://localhost:3000/api");
    }

    #[test]
    fn test_unauthorized() {
        let err = ClientError::Api {
            status: 403,
            message: "Invalid token".into(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid token");
        let err = ClientError::Api {
            status: 400,
            message: "Image too large".into(),
        };
        assert!(!err.is_unauthorized());
    }
}
