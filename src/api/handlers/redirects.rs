//! Handlers for the redirect resource endpoints (get, list, upsert, delete).

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::redirects::UpsertRedirectRequest;
use crate::domain::entities::{Redirect, RedirectPage};
use crate::error::{AppError, map_backend_error};
use crate::state::AppState;
use crate::utils::id_codec::{decode_id, encode_id};
use crate::utils::link_builder::LinkBuilder;
use crate::utils::path::is_valid_relative_path;

/// Decodes a path-segment id into the source path it names.
///
/// Every redirect operation starts here; an id that fails to decode is
/// rejected before any backend call is made.
fn decode_id_param(id: &str) -> Result<String, AppError> {
    decode_id(id).ok_or_else(|| {
        tracing::warn!(redirect_id = %id, "invalid base64 id");
        AppError::bad_request("Invalid base64 id", json!({ "id": id }))
    })
}

/// Retrieves a single redirect by its encoded id.
///
/// # Endpoint
///
/// `GET /v1/redirects/{id}`
///
/// # Errors
///
/// - 400 if the id is not valid base64
/// - 404 if no redirect is stored for the decoded path
/// - 500 on any other backend failure
pub async fn get_redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Redirect>, AppError> {
    let from = decode_id_param(&id)?;

    let to = state
        .redirects
        .get_redirect(&from)
        .await
        .map_err(map_backend_error)?;

    Ok(Json(Redirect::new(from, to)))
}

/// Retrieves a page of redirects.
///
/// # Endpoint
///
/// `GET /v1/redirects?count=&cursor=`
///
/// # Query Parameters
///
/// - `count` (default `"10"`): requested page size; zero is accepted
/// - `cursor` (default `"0"`): continuation token from a previous page
///
/// # Response
///
/// A page of `{from, to, id, links}` items plus the echoed `cursor`, the
/// backend's `next_cursor` (`"0"` when iteration is exhausted), and a
/// separately computed `total_count`. Items follow backend scan order and
/// are not contractually sorted; `total_count` can disagree with the page
/// under concurrent writes.
///
/// # Errors
///
/// - 400 for an invalid count or cursor
/// - 500 on backend or link-building failure
pub async fn list_redirects_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    headers: HeaderMap,
) -> Result<Json<RedirectPage>, AppError> {
    let (count, cursor) = params.validate().map_err(|e| {
        tracing::warn!(
            count = params.count_or_default(),
            cursor = params.cursor_or_default(),
            "invalid pagination parameters"
        );
        AppError::bad_request(
            e.to_string(),
            json!({
                "count": params.count_or_default(),
                "cursor": params.cursor_or_default(),
            }),
        )
    })?;

    let page = state
        .redirects
        .list_redirects(count, cursor)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "listing redirects from backend failed");
            AppError::internal("Backend error", json!({}))
        })?;

    tracing::info!(num_redirects = page.pairs.len(), "redirects retrieved");

    // Fail fast: if the per-request link base cannot be derived, no partial
    // page is returned.
    let links = if state.enable_url_rewriting {
        LinkBuilder::from_headers_or_default(&headers, state.links.api_url()).map_err(|e| {
            tracing::error!(error = %e, "could not build self link base");
            AppError::internal("Could not build self links", json!({}))
        })?
    } else {
        state.links.clone()
    };

    let items: Vec<Redirect> = page
        .pairs
        .into_iter()
        .map(|(from, to)| {
            let id = encode_id(&from);
            let href = links.build_redirect_self_url(&id);
            Redirect::resource(from, to, id, href)
        })
        .collect();

    let total_count = state.redirects.total_count().await.map_err(|e| {
        tracing::error!(error = %e, "getting total count of redirects failed");
        AppError::internal("Backend error", json!({}))
    })?;

    Ok(Json(RedirectPage {
        count,
        items,
        cursor: params.cursor_or_default().to_string(),
        next_cursor: page.next_cursor.to_string(),
        total_count,
    }))
}

/// Creates or updates a redirect.
///
/// # Endpoint
///
/// `PUT /v1/redirects/{id}` (requires the `redirects:edit` permission)
///
/// # Validation chain
///
/// 1. `{id}` must decode; the body must be valid JSON
/// 2. `from` must equal the decoded id exactly
/// 3. `from` and `to` must be relative paths starting with a single `/`
/// 4. `from` and `to` must differ (no redirect loops)
///
/// All validation happens before any backend call.
///
/// # Status codes
///
/// The backend's set operation cannot report create-vs-overwrite, so an
/// existence probe runs first: 201 when the probe found nothing, 200 when a
/// prior value was overwritten. Only a not-found probe result permits
/// proceeding with a create; any other probe failure aborts with 500 and
/// the write is not attempted. The probe-then-write sequence is not atomic
/// (see [`crate::application::services::RedirectService::upsert_redirect`]).
pub async fn upsert_redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let from_decoded = decode_id_param(&id)?;

    let redirect: UpsertRedirectRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "invalid redirect request body");
        AppError::bad_request("Invalid request body", json!({}))
    })?;

    if redirect.from != from_decoded {
        return Err(AppError::bad_request(
            "The 'from' field does not match the base64-decoded 'id' in the URL",
            json!({ "from": redirect.from, "id": id }),
        ));
    }

    if !is_valid_relative_path(&redirect.from) || !is_valid_relative_path(&redirect.to) {
        return Err(AppError::bad_request(
            "'from' and 'to' must be relative paths starting with '/'",
            json!({ "from": redirect.from, "to": redirect.to }),
        ));
    }

    if redirect.from == redirect.to {
        return Err(AppError::bad_request(
            "'from' and 'to' cannot be the same",
            json!({ "from": redirect.from }),
        ));
    }

    let existing = match state.redirects.get_redirect(&redirect.from).await {
        Ok(value) => Some(value),
        Err(e) if e.is_not_found() => {
            tracing::info!(from = %redirect.from, "redirect not found, creating a new one");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to check redirect existence");
            return Err(AppError::internal("Backend error", json!({})));
        }
    };

    state
        .redirects
        .upsert_redirect(&redirect.from, &redirect.to)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to upsert redirect");
            AppError::internal("Backend error", json!({}))
        })?;

    if existing.is_none() {
        Ok(StatusCode::CREATED)
    } else {
        Ok(StatusCode::OK)
    }
}

/// Deletes a redirect.
///
/// # Endpoint
///
/// `DELETE /v1/redirects/{id}` (requires the `redirects:edit` permission)
///
/// An existence probe runs first so an absent key reports 404 without the
/// delete operation ever being issued.
///
/// # Errors
///
/// - 400 if the id is not valid base64
/// - 404 if no redirect is stored for the decoded path
/// - 500 on any other backend failure
pub async fn delete_redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let from = decode_id_param(&id)?;

    state
        .redirects
        .get_redirect(&from)
        .await
        .map_err(map_backend_error)?;

    state
        .redirects
        .delete_redirect(&from)
        .await
        .map_err(map_backend_error)?;

    Ok(StatusCode::NO_CONTENT)
}
