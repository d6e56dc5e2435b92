//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{domain::identity::UserIdentity, error::AppError, state::AppState};

/// Resolves `Authorization: Bearer <token>` to the calling user.
///
/// The token's HMAC hash is looked up via [`crate::application::services::AuthService`];
/// on success the owner's [`UserIdentity`] is inserted into the request
/// extensions, where handlers pick it up with `Extension<UserIdentity>`.
///
/// # Errors
///
/// `401 Unauthorized` with `WWW-Authenticate: Bearer` when the header is
/// missing or malformed, or the token is unknown or revoked.
///
/// ```rust,ignore
/// let protected = api::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await.inspect_err(|e| {
        tracing::debug!(path = %parts.uri.path(), error = %e, "Request rejected");
    })?;
    tracing::debug!(user = %user.uid, "Request authenticated");

    parts.extensions.insert::<UserIdentity>(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
