//! JWT authentication extractors

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::{Principal, Role};

/// Any authenticated account
#[derive(Debug, Clone)]
pub struct RequireAccount(pub Principal);

/// An authenticated patient
#[derive(Debug, Clone)]
pub struct RequirePatient(pub Principal);

/// An authenticated doctor
#[derive(Debug, Clone)]
pub struct RequireDoctor(pub Principal);

impl FromRequestParts<AppState> for RequireAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;
        authenticate(&token, state).map(RequireAccount)
    }
}

/// Present when a valid token was sent; a missing or invalid token yields `None`
impl OptionalFromRequestParts<AppState> for RequireAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let Ok(token) = extract_bearer_token(&parts.headers) else {
            return Ok(None);
        };

        Ok(authenticate(&token, state).ok().map(RequireAccount))
    }
}

impl FromRequestParts<AppState> for RequirePatient {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAccount(principal) =
            <RequireAccount as FromRequestParts<AppState>>::from_request_parts(parts, state)
                .await?;
        require_role(principal, Role::Patient).map(RequirePatient)
    }
}

impl FromRequestParts<AppState> for RequireDoctor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAccount(principal) =
            <RequireAccount as FromRequestParts<AppState>>::from_request_parts(parts, state)
                .await?;
        require_role(principal, Role::Doctor).map(RequireDoctor)
    }
}

fn authenticate(token: &str, state: &AppState) -> Result<Principal, ApiError> {
    debug!("Validating JWT token");

    let claims = state.jwt_service.validate(token)?;
    Ok(claims.principal()?)
}

fn require_role(principal: Principal, role: Role) -> Result<Principal, ApiError> {
    if principal.role == role {
        Ok(principal)
    } else {
        Err(ApiError::forbidden(format!(
            "This action requires a {} account",
            role
        )))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = value.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>'",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer  abc.def.ghi ".parse().unwrap());

        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_or_wrong_scheme() {
        let headers = HeaderMap::new();
        assert_eq!(
            extract_bearer_token(&headers).unwrap_err().status,
            StatusCode::UNAUTHORIZED
        );

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn test_require_role() {
        let doctor = Principal::new(1, "Dr. Rao", "rao@clinic.test", Role::Doctor);

        assert!(require_role(doctor.clone(), Role::Doctor).is_ok());
        assert_eq!(
            require_role(doctor, Role::Patient).unwrap_err().status,
            StatusCode::FORBIDDEN
        );
    }
}
