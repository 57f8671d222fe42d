//! Permission-based authorization middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::application::services::REDIRECTS_EDIT;
use crate::{error::AppError, state::AppState};

/// Gates mutating redirect endpoints behind the `redirects:edit` permission.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authorization Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Hash it and look up the granted permission set
/// 3. Require `redirects:edit`
/// 4. Continue to the handler
///
/// Handlers behind this layer never run on a rejected request; the
/// authorization decision is opaque to them.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, malformed, or the
/// token is unknown; `403 Forbidden` if the token does not grant the
/// permission.
pub async fn require_edit(
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

    let req = Request::from_parts(parts, body);

    st.auth.authorize(&token, REDIRECTS_EDIT)?;

    Ok(next.run(req).await)
}
