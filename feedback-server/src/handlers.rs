//! HTTP handlers: the public form workflow and the operator-gated admin
//! viewer. The anti-forgery check always precedes validation; validation
//! always precedes persistence.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::{
        header::{AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use feedback_storage::FeedbackQuery;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::error::AppError;
use crate::render::{render_admin_list, render_admin_stats, render_form, render_thanks};
use crate::state::AppState;
use crate::validate::{validate, FieldErrors, SubmittedFields, RATING_MAX, RATING_MIN};

const SESSION_COOKIE: &str = "feedback_session";

/// Extracts the session id from the request's Cookie header, if present.
fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

fn session_cookie_value(session_id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, session_id
    ))
    .ok()
}

/// GET /feedback/ — renders the empty form with a fresh token; starts a
/// session if the browser has none yet.
#[instrument(skip(state, headers))]
pub async fn feedback_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (session_id, is_new_session) = match session_from_headers(&headers) {
        Some(id) => (id, false),
        None => (Uuid::new_v4().to_string(), true),
    };

    let token = state
        .signer
        .issue(&session_id)
        .map_err(|e| AppError::Store(e.to_string()))?;

    let html = render_form(&SubmittedFields::default(), &FieldErrors::default(), &token);
    let mut response = Html(html).into_response();

    if is_new_session {
        if let Some(cookie) = session_cookie_value(&session_id) {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
    }

    Ok(response)
}

/// POST /feedback/ — token check, then validation, then a single insert.
///
/// Exactly one record is persisted per successful validated submission and
/// none on any failure. Success redirects so a refresh issues a GET.
#[instrument(skip(state, headers, fields))]
pub async fn feedback_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(fields): Form<SubmittedFields>,
) -> Result<Response, AppError> {
    let session_id = session_from_headers(&headers)
        .ok_or_else(|| AppError::Security("missing session cookie".to_string()))?;

    state.signer.verify(&fields.csrf_token, &session_id)?;

    match validate(&fields) {
        Ok(feedback) => {
            let record = state.repo.insert(&feedback).await.map_err(|e| {
                error!(error = %e, "Failed to persist feedback");
                AppError::Store(e.to_string())
            })?;

            info!(id = %record.id, rating = record.rating, "Feedback accepted");
            Ok(Redirect::to("/feedback/thanks/").into_response())
        }
        Err(errors) => {
            info!(
                error_count = errors.iter().count(),
                "Feedback rejected by validation"
            );

            // Verbatim echo of all submitted fields, with a fresh token.
            let token = state
                .signer
                .issue(&session_id)
                .map_err(|e| AppError::Store(e.to_string()))?;
            Ok(Html(render_form(&fields, &errors, &token)).into_response())
        }
    }
}

/// GET /feedback/thanks/ — static confirmation page.
pub async fn feedback_thanks() -> Html<String> {
    Html(render_thanks())
}

/// Checks the operator bearer token; the authentication boundary itself
/// (issuing operator tokens) is external to this service.
fn require_operator(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let expected = format!("Bearer {}", state.config.admin_token);
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// GET /admin/feedback/ — operator listing, newest first, with optional
/// `q` search and `rating` filter. Queries the store on every view.
#[instrument(skip(state, headers, params))]
pub async fn admin_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    require_operator(&state, &headers)?;

    let search = params.get("q").cloned().unwrap_or_default();
    let rating = params
        .get("rating")
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|r| (RATING_MIN..=RATING_MAX).contains(r));

    let query = FeedbackQuery {
        rating,
        search: (!search.is_empty()).then(|| search.clone()),
        limit: None,
        offset: None,
    };

    let records = state.repo.list(&query).await.map_err(|e| {
        error!(error = %e, "Failed to list feedback");
        AppError::Store(e.to_string())
    })?;

    Ok(Html(render_admin_list(&records, &search, rating)).into_response())
}

/// GET /admin/feedback/stats — operator aggregate view.
#[instrument(skip(state, headers))]
pub async fn admin_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    require_operator(&state, &headers)?;

    let stats = state.repo.get_stats().await.map_err(|e| {
        error!(error = %e, "Failed to compute feedback stats");
        AppError::Store(e.to_string())
    })?;

    Ok(Html(render_admin_stats(&stats)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_parsed_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("other=1; feedback_session=abc-123; x=y"),
        );
        assert_eq!(session_from_headers(&headers), Some("abc-123".to_string()));
    }

    #[test]
    fn missing_or_empty_session_is_none() {
        let headers = HeaderMap::new();
        assert_eq!(session_from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("feedback_session="));
        assert_eq!(session_from_headers(&headers), None);
    }
}
