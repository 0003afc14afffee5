//! Axum glue for the request pipeline.
//!
//! Module routes are not registered with axum's router: every request goes
//! to one fallback handler that converts it into a [`WebRequest`] and runs
//! [`dispatch`]. Route tables stay exact-match and can be inspected at
//! runtime.

use std::str::FromStr;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info_span;
use uuid::Uuid;

use webmodule_core::{HttpError, Method, WebRequest};

use crate::dispatch::{dispatch, reject, Reply};
use crate::AppState;

/// Create the Axum router serving the shared state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(handle_request)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Fallback handler running every request through the pipeline.
async fn handle_request(
    State(state): State<AppState>,
    method: axum::http::Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4();
    let path = uri.path().to_string();

    // One render cycle at a time: the registry's current path is shared.
    let mut state = state.write().await;
    let span = info_span!("request", id = %request_id, method = %method, path = %path);
    let _enter = span.enter();

    let method = match Method::from_str(method.as_str()) {
        Ok(method) => method,
        Err(err) => {
            let error = HttpError::method_not_allowed(err.to_string());
            return reject(&mut state, &path, &error).into_response();
        }
    };
    let body = match String::from_utf8(body.to_vec()) {
        Ok(body) => body,
        Err(_) => {
            let error = HttpError::bad_request("Request body is not valid UTF-8");
            return reject(&mut state, &path, &error).into_response();
        }
    };

    let reply = dispatch(&mut state, to_web_request(method, &uri, &headers, body));
    reply.into_response()
}

fn to_web_request(method: Method, uri: &Uri, headers: &HeaderMap, body: String) -> WebRequest {
    let mut request = WebRequest::new(method, uri.path())
        .with_query(uri.query().unwrap_or_default())
        .with_body(body);
    for (name, value) in headers {
        // Non-UTF-8 header values are not visible to handlers
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }
    request.merge_form_params();
    request
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Redirect { location, .. } => {
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }
            Reply::Content {
                status,
                content_type,
                body,
            } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
            }
        }
    }
}
