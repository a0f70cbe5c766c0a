//! The request gate: every request passes through here before any route
//! handler runs. Admin UI paths require a valid cookie token; content and
//! upload API paths require an admin token for writes. On success the
//! verified identity is forwarded as `x-user-id` / `x-user-role` request
//! headers, which downstream handlers trust without re-verifying.

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{self, Claims, ROLE_ADMIN};
use crate::error::ApiError;
use crate::middleware::identity::{HEADER_USER_ID, HEADER_USER_ROLE};

const ADMIN_LOGIN_PATH: &str = "/admin/login";

pub async fn request_gate(mut request: Request, next: Next) -> Response {
    // Preflight never reaches auth checks
    if request.method() == Method::OPTIONS {
        return preflight_response();
    }

    // Identity headers are gate-issued only; drop anything client-supplied
    request.headers_mut().remove(HEADER_USER_ID);
    request.headers_mut().remove(HEADER_USER_ROLE);

    let path = request.uri().path().to_string();

    if is_admin_ui_path(&path) {
        return match auth::cookie_token(request.headers()) {
            None => login_redirect(false),
            Some(token) => match auth::verify_jwt(&token) {
                Ok(claims) => {
                    inject_identity(&mut request, &claims);
                    next.run(request).await
                }
                Err(_) => login_redirect(true),
            },
        };
    }

    if is_gated_api_path(&path) {
        let token =
            auth::bearer_token(request.headers()).or_else(|| auth::cookie_token(request.headers()));
        let write = is_write_method(request.method());

        match token {
            None if write => {
                return ApiError::unauthorized("Authentication required").into_response();
            }
            // Anonymous read of public content
            None => {}
            Some(token) => match auth::verify_jwt(&token) {
                Err(reason) => return ApiError::unauthorized(reason).into_response(),
                Ok(claims) => {
                    if write && claims.role != ROLE_ADMIN {
                        return ApiError::forbidden("Admin role required").into_response();
                    }
                    inject_identity(&mut request, &claims);
                }
            },
        }
    }

    next.run(request).await
}

fn inject_identity(request: &mut Request, claims: &Claims) {
    if let Ok(value) = HeaderValue::from_str(&claims.user_id.to_string()) {
        request.headers_mut().insert(HEADER_USER_ID, value);
    }
    if let Ok(value) = HeaderValue::from_str(&claims.role) {
        request.headers_mut().insert(HEADER_USER_ROLE, value);
    }
}

fn preflight_response() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, PATCH, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("authorization, content-type"),
    );
    response
}

fn login_redirect(clear_cookie: bool) -> Response {
    let mut response = StatusCode::TEMPORARY_REDIRECT.into_response();
    response
        .headers_mut()
        .insert(header::LOCATION, HeaderValue::from_static(ADMIN_LOGIN_PATH));
    if clear_cookie {
        response.headers_mut().insert(
            header::SET_COOKIE,
            HeaderValue::from_static("admin_token=; Path=/; Max-Age=0"),
        );
    }
    response
}

fn is_admin_ui_path(path: &str) -> bool {
    (path == "/admin" || path.starts_with("/admin/")) && path != ADMIN_LOGIN_PATH
}

fn is_gated_api_path(path: &str) -> bool {
    path.starts_with("/api/content/")
        || path == "/api/content"
        || path.starts_with("/api/upload/")
        || path == "/api/upload"
}

fn is_write_method(method: &Method) -> bool {
    method == Method::POST
        || method == Method::PUT
        || method == Method::DELETE
        || method == Method::PATCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_ui_paths() {
        assert!(is_admin_ui_path("/admin"));
        assert!(is_admin_ui_path("/admin/partners"));
        assert!(!is_admin_ui_path("/admin/login"));
        assert!(!is_admin_ui_path("/administrator"));
        assert!(!is_admin_ui_path("/"));
    }

    #[test]
    fn gated_api_paths() {
        assert!(is_gated_api_path("/api/content/partners"));
        assert!(is_gated_api_path("/api/upload"));
        assert!(is_gated_api_path("/api/upload/images"));
        assert!(!is_gated_api_path("/api/auth/login"));
        assert!(!is_gated_api_path("/api/health"));
        assert!(!is_gated_api_path("/api/contents"));
    }

    #[test]
    fn write_methods() {
        assert!(is_write_method(&Method::POST));
        assert!(is_write_method(&Method::PUT));
        assert!(is_write_method(&Method::DELETE));
        assert!(is_write_method(&Method::PATCH));
        assert!(!is_write_method(&Method::GET));
        assert!(!is_write_method(&Method::HEAD));
    }
}
