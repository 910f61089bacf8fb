//! Bearer-secret guard for the cron trigger.
//!
//! ```text
//! Request → cron_auth_middleware → secret configured? bearer matches? → handler
//! ```
//!
//! The secret lives in configuration. When it is absent every request is
//! refused with 500; a missing or mismatched bearer gets 401. Both happen
//! before any subscription data is read.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::adapters::http::error::ApiError;

/// Middleware state: the configured cron secret, if any.
#[derive(Clone)]
pub struct CronAuth {
    secret: Option<Arc<SecretString>>,
}

impl CronAuth {
    pub fn new(secret: Option<SecretString>) -> Self {
        Self {
            secret: secret.map(Arc::new),
        }
    }

    /// Checks a presented bearer token against the secret.
    fn verify(&self, presented: Option<&str>) -> Result<(), ApiError> {
        let secret = self
            .secret
            .as_ref()
            .ok_or_else(|| ApiError::internal("Cron secret not configured"))?;

        let presented = presented.ok_or_else(ApiError::unauthorized)?;
        let expected = secret.expose_secret().as_bytes();
        if bool::from(presented.as_bytes().ct_eq(expected)) {
            Ok(())
        } else {
            Err(ApiError::unauthorized())
        }
    }
}

impl std::fmt::Debug for CronAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronAuth")
            .field("configured", &self.secret.is_some())
            .finish()
    }
}

/// Rejects requests whose `Authorization: Bearer` does not match the secret.
pub async fn cron_auth_middleware(
    State(auth): State<CronAuth>,
    request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match auth.verify(token) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            if err.status.is_client_error() {
                tracing::warn!("Cron trigger rejected: bad bearer token");
            }
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app(secret: Option<&str>) -> Router {
        let auth = CronAuth::new(secret.map(|s| SecretString::new(s.to_string())));
        Router::new()
            .route("/cron", get(|| async { "ran" }))
            .layer(middleware::from_fn_with_state(auth, cron_auth_middleware))
    }

    async fn status(app: Router, header: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri("/cron");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn matching_bearer_passes() {
        assert_eq!(status(app(Some("s3cret")), Some("Bearer s3cret")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_or_missing_bearer_is_unauthorized() {
        assert_eq!(
            status(app(Some("s3cret")), Some("Bearer nope")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(app(Some("s3cret")), Some("Basic s3cret")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status(app(Some("s3cret")), None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn prefix_of_secret_is_rejected() {
        assert_eq!(
            status(app(Some("s3cret")), Some("Bearer s3c")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn unconfigured_secret_is_server_error() {
        assert_eq!(
            status(app(None), Some("Bearer anything")).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
