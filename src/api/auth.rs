//! Auth collaborator
//!
//! The controller validates locally and then delegates the actual
//! authentication/registration to the course backend through this
//! trait. Tests substitute a mock; the flow never observes anything
//! but an outcome.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::api::client::{error_reason, ApiClient};
use crate::core::validate::{LoginRequest, RegisterRequest, RoleExtras};
use crate::error::{LecternError, Result};

/// Successful auth outcome; failure travels as an error with a
/// human-readable reason
#[derive(Debug, Clone)]
pub struct AuthSuccess {
    /// Role as resolved by the backend (may differ in spelling from
    /// the requested one, e.g. "teacher")
    pub role: String,
}

/// External authentication/registration service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Attempt a sign-in with validated credentials
    async fn login(&self, request: &LoginRequest) -> Result<AuthSuccess>;

    /// Attempt to create an account with validated details
    async fn register(&self, request: &RegisterRequest) -> Result<AuthSuccess>;
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
    role: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    role: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    journey: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    track: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    success: bool,
    error: Option<String>,
    role: Option<String>,
}

/// HTTP implementation against the course backend
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, request: &LoginRequest) -> Result<AuthSuccess> {
        let body = LoginBody {
            email: &request.email,
            password: request.password.expose_secret(),
            role: request.role.as_str(),
        };

        let response = self
            .api
            .http()
            .post(self.api.endpoint("auth/login")?)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LecternError::AuthFailed(error_reason(response).await));
        }

        let outcome: AuthResponse = response.json().await?;
        if !outcome.success {
            return Err(LecternError::AuthFailed(
                outcome.error.unwrap_or_else(|| "Login failed.".to_string()),
            ));
        }

        Ok(AuthSuccess {
            role: outcome
                .role
                .unwrap_or_else(|| request.role.as_str().to_string()),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthSuccess> {
        let (journey, track) = match request.extras {
            RoleExtras::Professor => (None, None),
            RoleExtras::Student { journey, track } => {
                (Some(journey.as_str()), Some(track.as_str()))
            }
        };

        let body = RegisterBody {
            name: &request.display_name,
            email: &request.email,
            password: request.password.expose_secret(),
            role: request.role.as_str(),
            journey,
            track,
        };

        let response = self
            .api
            .http()
            .post(self.api.endpoint("auth/register")?)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LecternError::RegistrationFailed(
                error_reason(response).await,
            ));
        }

        let outcome: AuthResponse = response.json().await?;
        if !outcome.success {
            return Err(LecternError::RegistrationFailed(
                outcome
                    .error
                    .unwrap_or_else(|| "Registration failed.".to_string()),
            ));
        }

        Ok(AuthSuccess {
            role: outcome
                .role
                .unwrap_or_else(|| request.role.as_str().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flow::{Journey, Role, Track};
    use secrecy::SecretString;

    #[test]
    fn test_register_body_skips_extras_for_professors() {
        let request = RegisterRequest {
            display_name: "Ada Lovelace".to_string(),
            email: "ada@asu.edu".to_string(),
            password: SecretString::from("hunter2".to_string()),
            role: Role::Professor,
            extras: RoleExtras::Professor,
        };
        let body = RegisterBody {
            name: &request.display_name,
            email: &request.email,
            password: "hunter2",
            role: request.role.as_str(),
            journey: None,
            track: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["role"], "professor");
        assert!(json.get("journey").is_none());
        assert!(json.get("track").is_none());
    }

    #[test]
    fn test_register_body_carries_student_extras() {
        let body = RegisterBody {
            name: "Sparky",
            email: "sparky@asu.edu",
            password: "hunter2",
            role: Role::Student.as_str(),
            journey: Some(Journey::ComputerScience.as_str()),
            track: Some(Track::RiscV.as_str()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["journey"], "cs");
        assert_eq!(json["track"], "riscv");
    }

    #[test]
    fn test_auth_response_shapes() {
        let ok: AuthResponse =
            serde_json::from_str(r#"{"success": true, "role": "teacher"}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.role.as_deref(), Some("teacher"));

        let failed: AuthResponse =
            serde_json::from_str(r#"{"success": false, "error": "Unknown credentials."}"#)
                .unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("Unknown credentials."));
    }
}
