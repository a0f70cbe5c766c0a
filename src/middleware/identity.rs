//! Extractors for the gate-injected identity headers.
//!
//! Handlers behind the gate read the caller's identity from these headers
//! and trust them: the gate strips client-supplied values and re-injects
//! verified ones, so a handler seeing them means the token already passed
//! signature and role checks.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::error::ApiError;

pub const HEADER_USER_ID: &str = "x-user-id";
pub const HEADER_USER_ROLE: &str = "x-user-role";

/// Verified caller identity, required. Rejects with 401 when the gate did
/// not inject headers (i.e. the request was anonymous).
#[derive(Clone, Debug)]
pub struct GateUser {
    pub id: Uuid,
    pub role: String,
}

impl GateUser {
    pub fn is_admin(&self) -> bool {
        self.role == crate::auth::ROLE_ADMIN
    }
}

pub fn gate_user_from_headers(headers: &HeaderMap) -> Option<GateUser> {
    let id = headers
        .get(HEADER_USER_ID)?
        .to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s).ok())?;
    let role = headers
        .get(HEADER_USER_ROLE)?
        .to_str()
        .ok()?
        .to_string();

    Some(GateUser { id, role })
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for GateUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        gate_user_from_headers(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Caller identity when present; anonymous requests extract as `None`.
#[derive(Clone, Debug)]
pub struct MaybeGateUser(pub Option<GateUser>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeGateUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeGateUser(gate_user_from_headers(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_identity_from_headers() {
        let mut headers = HeaderMap::new();
        let id = Uuid::new_v4();
        headers.insert(HEADER_USER_ID, id.to_string().parse().unwrap());
        headers.insert(HEADER_USER_ROLE, "admin".parse().unwrap());

        let user = gate_user_from_headers(&headers).unwrap();
        assert_eq!(user.id, id);
        assert!(user.is_admin());
    }

    #[test]
    fn malformed_id_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_USER_ID, "not-a-uuid".parse().unwrap());
        headers.insert(HEADER_USER_ROLE, "admin".parse().unwrap());
        assert!(gate_user_from_headers(&headers).is_none());
    }

    #[test]
    fn missing_headers_yield_none() {
        assert!(gate_user_from_headers(&HeaderMap::new()).is_none());
    }
}
