//! Implements SessionPort over `/api/auth/*`.
//!
//! The session credential is an HTTP-only cookie set by the backend; it lives in the
//! shared client's cookie jar and is never handled explicitly here.

use super::response::{connectivity, decode, expect_success};
use crate::domain::{DomainError, UserProfile};
use crate::ports::SessionPort;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

/// `{"message": "...", "user": {...}}` returned by every auth endpoint that yields a user.
#[derive(Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

/// HTTP session client. Clone the `reqwest::Client` from `build_client` so the
/// memory client sees the same cookies.
pub struct HttpSessionClient {
    client: Client,
    base_url: String,
}

impl HttpSessionClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_for_user<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> Result<UserProfile, DomainError> {
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(connectivity)?;
        let envelope: UserEnvelope = decode(response, fallback).await?;
        Ok(envelope.user)
    }
}

#[async_trait]
impl SessionPort for HttpSessionClient {
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, DomainError> {
        debug!(email, "login request");
        let user = self
            .post_for_user(
                "/api/auth/login",
                Some(&LoginRequest { email, password }),
                "Login failed",
            )
            .await?;
        info!(user_id = user.id, "logged in");
        Ok(user)
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, DomainError> {
        debug!(email, "register request");
        let user = self
            .post_for_user(
                "/api/auth/register",
                Some(&RegisterRequest {
                    email,
                    password,
                    name,
                }),
                "Registration failed",
            )
            .await?;
        info!(user_id = user.id, "registered");
        Ok(user)
    }

    async fn logout(&self) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.url("/api/auth/logout"))
            .send()
            .await
            .map_err(connectivity)?;
        expect_success(response, "Logout failed").await?;
        info!("logged out");
        Ok(())
    }

    async fn current_user(&self) -> Result<UserProfile, DomainError> {
        let response = self
            .client
            .get(self.url("/api/auth/me"))
            .send()
            .await
            .map_err(connectivity)?;
        let envelope: UserEnvelope = decode(response, "Not authenticated").await?;
        Ok(envelope.user)
    }

    async fn refresh_token(&self) -> Result<UserProfile, DomainError> {
        let user = self
            .post_for_user::<()>("/api/auth/refresh", None, "Token refresh failed")
            .await?;
        debug!(user_id = user.id, "session refreshed");
        Ok(user)
    }
}
