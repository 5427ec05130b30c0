use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};

use catalog_core::DomainError;

use crate::app::errors;

/// Turns error responses into the JSON error body.
///
/// Responses produced from an `ApiError` carry their `DomainError`; statuses
/// the router emits on its own (405, 413, ...) arrive with an empty or plain
/// body and get the same shape. This is the single place where errors become
/// wire errors, and where they are logged.
pub async fn render_errors(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let response = next.run(req).await;

    let Some(err) = response.extensions().get::<DomainError>().cloned() else {
        if is_bare_error(&response) {
            return render_bare(response, &method, &path);
        }
        return response;
    };

    match &err {
        DomainError::Unexpected(detail) => {
            tracing::error!(%method, %path, detail = %detail, "request failed");
        }
        DomainError::NotFound(_) => tracing::info!(%method, %path, "{err}"),
        DomainError::InvalidArgument(_) | DomainError::Validation(_) => {
            tracing::warn!(%method, %path, "{err}");
        }
    }

    errors::json_error(&err, &path)
}

fn is_bare_error(response: &Response) -> bool {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return false;
    }
    !response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

fn render_bare(response: Response, method: &Method, path: &str) -> Response {
    let status = response.status();
    let message = if status == StatusCode::METHOD_NOT_ALLOWED {
        format!("Request method '{method}' is not supported")
    } else {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    };
    tracing::warn!(%method, %path, status = status.as_u16(), "{message}");

    let allow: Option<HeaderValue> = response.headers().get(header::ALLOW).cloned();
    let mut rendered = errors::status_error(status, message, path);
    if let Some(allow) = allow {
        rendered.headers_mut().insert(header::ALLOW, allow);
    }
    rendered
}
