//! Identity middleware
//!
//! There is no sign-in yet: every request acts as the configured placeholder
//! user. The user is resolved once per request and handlers read it through
//! the `CurrentUser` extractor, so swapping in real authentication only
//! touches this module.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use uuid::Uuid;

use crate::error::{ErrorDetail, ErrorResponse};
use crate::AppState;

/// Identity of the user making a request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

/// Attach the placeholder identity to the request
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = Identity {
        user_id: state.config.identity.placeholder_user_id,
    };
    request.extensions_mut().insert(identity);

    next.run(request).await
}

/// Extractor for the requesting user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Identity);

impl CurrentUser {
    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message: "No user identity on request".to_string(),
                        field: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request as HttpRequest;

    #[test]
    fn test_extracts_identity_from_extensions() {
        let user_id = Uuid::from_u128(7);
        let (mut parts, _) = HttpRequest::builder()
            .uri("/api/v1/profile")
            .extension(Identity { user_id })
            .body(())
            .unwrap()
            .into_parts();

        let user = tokio_test::block_on(CurrentUser::from_request_parts(&mut parts, &()))
            .unwrap();
        assert_eq!(user.user_id(), user_id);
    }

    #[test]
    fn test_missing_identity_is_rejected() {
        let (mut parts, _) = HttpRequest::builder()
            .uri("/api/v1/profile")
            .body(())
            .unwrap()
            .into_parts();

        let rejection = tokio_test::block_on(CurrentUser::from_request_parts(&mut parts, &()))
            .unwrap_err();
        assert_eq!(rejection.0, StatusCode::UNAUTHORIZED);
    }
}
