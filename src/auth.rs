//! Session-cookie authentication.
//!
//! The identity cookie stores a serialized [`AuthenticatedUser`]; handlers
//! receive it through the `FromRequest` extractor. Requests without a valid
//! identity are redirected to the login form.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

/// Authenticated admin identity carried by the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Serialized form stored as the identity id.
    pub fn to_session_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Whether `roles` contains `role`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

/// Role gate for handlers that render no page of their own.
///
/// On failure returns a redirect to `redirect_to` when given, otherwise a bare
/// 401 response (used by the JSON API).
pub fn ensure_role(
    user: &AuthenticatedUser,
    role: &str,
    redirect_to: Option<&str>,
) -> Result<(), HttpResponse> {
    if check_role(role, &user.roles) {
        return Ok(());
    }
    match redirect_to {
        Some(location) => Err(HttpResponse::SeeOther()
            .append_header(("Location", location.to_string()))
            .finish()),
        None => Err(HttpResponse::Unauthorized().finish()),
    }
}

fn login_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header(("Location", "/login"))
        .finish()
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let user = Identity::from_request(req, payload)
            .into_inner()
            .ok()
            .and_then(|identity| identity.id().ok())
            .and_then(|id| serde_json::from_str::<AuthenticatedUser>(&id).ok());

        ready(match user {
            Some(user) => Ok(user),
            None => Err(InternalError::from_response("unauthenticated", login_redirect()).into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_role_matches_exact_name() {
        let roles = vec!["editor".to_string(), "viewer".to_string()];
        assert!(check_role("editor", &roles));
        assert!(!check_role("edit", &roles));
    }

    #[test]
    fn session_string_round_trips() {
        let user = AuthenticatedUser {
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            roles: vec!["editor".to_string()],
        };
        let encoded = user.to_session_string().unwrap();
        let decoded: AuthenticatedUser = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, user);
    }
}
