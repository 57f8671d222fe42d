//! API route configuration.
//!
//! Read endpoints are public; mutating endpoints require the
//! `redirects:edit` permission via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    delete_redirect_handler, get_redirect_handler, list_redirects_handler, upsert_redirect_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{Router, handler::Handler, middleware, routing::get};

/// Versioned redirect routes.
///
/// # Endpoints
///
/// - `GET    /redirects`       - List redirects (paginated)
/// - `GET    /redirects/{id}`  - Retrieve a single redirect
/// - `PUT    /redirects/{id}`  - Create or update a redirect (auth)
/// - `DELETE /redirects/{id}`  - Delete a redirect (auth)
pub fn routes(state: AppState) -> Router<AppState> {
    let require_edit = middleware::from_fn_with_state(state, auth::require_edit);

    Router::new()
        .route("/redirects", get(list_redirects_handler))
        .route(
            "/redirects/{id}",
            get(get_redirect_handler)
                .put(upsert_redirect_handler.layer(require_edit.clone()))
                .delete(delete_redirect_handler.layer(require_edit)),
        )
}
