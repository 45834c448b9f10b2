use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Respuesta de /auth/v1/token
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

/// /auth/v1/signup devuelve una sesión o solo el usuario (confirmación por email)
#[derive(Clone, PartialEq, Deserialize, Debug)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(TokenResponse),
    User(AuthUser),
}

impl SignUpResponse {
    pub fn user(&self) -> &AuthUser {
        match self {
            SignUpResponse::Session(session) => &session.user,
            SignUpResponse::User(user) => user,
        }
    }
}

/// Sesión persistida en localStorage
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Epoch en segundos
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    pub fn from_token(token: TokenResponse, now_secs: i64) -> Self {
        let expires_at = token
            .expires_at
            .unwrap_or_else(|| now_secs + token.expires_in.unwrap_or(3600));
        Self {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at,
            user: token.user,
        }
    }

    /// Expirada (con 60s de margen)
    pub fn is_expired(&self, now_secs: i64) -> bool {
        now_secs + 60 >= self.expires_at
    }
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct PasswordGrant {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct RefreshGrant {
    pub refresh_token: String,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub data: SignUpMetadata,
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct SignUpMetadata {
    pub nome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_response_variants() {
        let with_session: SignUpResponse = serde_json::from_str(
            r#"{"access_token":"a","refresh_token":"r","expires_in":3600,"user":{"id":"u1","email":"a@b.c"}}"#,
        )
        .unwrap();
        assert!(matches!(with_session, SignUpResponse::Session(_)));
        assert_eq!(with_session.user().id, "u1");

        let user_only: SignUpResponse =
            serde_json::from_str(r#"{"id":"u2","email":"d@e.f","confirmation_sent_at":"2024-01-01"}"#).unwrap();
        assert!(matches!(user_only, SignUpResponse::User(_)));
        assert_eq!(user_only.user().id, "u2");
    }

    #[test]
    fn test_session_expiry_from_expires_in() {
        let token = TokenResponse {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_in: Some(3600),
            expires_at: None,
            user: AuthUser { id: "u1".into(), email: None },
        };
        let session = AuthSession::from_token(token, 1_000);
        assert_eq!(session.expires_at, 4_600);
        assert!(!session.is_expired(1_000));
        assert!(session.is_expired(4_550));
    }
}
