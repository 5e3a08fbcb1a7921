// SPDX-License-Identifier: MIT

//! User identity middleware.
//!
//! Authentication lives in the upstream auth provider; by the time a
//! request reaches this service, the authenticating proxy has already
//! verified the caller and injected an opaque user identity in the
//! `X-User-Id` header. This middleware only requires that the header
//! is present and sane, and exposes it to handlers as an extension.

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Header carrying the opaque user identity.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Longest identity the upstream provider issues.
const MAX_USER_ID_LEN: usize = 128;

/// Authenticated caller, extracted from the identity header.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

/// Middleware that requires an identity header on the request.
pub async fn require_identity(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_USER_ID_LEN);

    let Some(user_id) = user_id else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let identity = Identity {
        user_id: user_id.to_string(),
    };
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt; // for oneshot

    fn app() -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|Extension(identity): Extension<Identity>| async move { identity.user_id }),
            )
            .layer(middleware::from_fn(require_identity))
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let response = app()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/whoami")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_blank_header_is_unauthorized() {
        let response = app()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/whoami")
                    .header(USER_ID_HEADER, "   ")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_identity_reaches_handler() {
        let response = app()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/whoami")
                    .header(USER_ID_HEADER, "user-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"user-42");
    }
}
