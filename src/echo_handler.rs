use crate::errors::AppError;
use crate::models::EchoResponse;
use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderName, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

/// Marker header set on every echoed response.
pub const ECHO_HEADER: HeaderName = HeaderName::from_static("x-echoed-api");

/// Every path starting with this prefix is echoed, whatever follows it.
pub const ECHO_PREFIX: &str = "/apis/echo";

/// Router fallback: ANY /apis/echo* is echoed, everything else is a JSON 404.
///
/// Runs as the fallback so the prefix match is on the raw path rather than on
/// whole segments: `/apis/echo/`, `/apis/echoXYZ` and `/apis/echo-debug` all
/// reach the echo with `*` bound to the remainder after the prefix.
pub async fn echo_or_not_found(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    match uri.path().strip_prefix(ECHO_PREFIX) {
        Some(suffix) => {
            let suffix = suffix.to_string();
            echo(method, uri, suffix, headers, body).map(IntoResponse::into_response)
        }
        None => {
            tracing::debug!("No route for {} {}", method, uri.path());
            Err(AppError::NotFound(format!(
                "Route {}:{} not found",
                method,
                uri.path()
            )))
        }
    }
}

/// Reflect the request back as JSON. Never touches the store.
fn echo(
    method: Method,
    uri: Uri,
    suffix: String,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("{} {} (echo)", method, uri);

    let mut parameters = Map::new();
    parameters.insert("*".to_string(), Value::String(suffix));

    let response = EchoResponse {
        method: method.as_str().to_string(),
        url: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        parameters,
        query: parse_pairs(uri.query().unwrap_or_default().as_bytes()),
        headers: header_map(&headers),
        body: parse_body(&headers, &body)?,
    };

    Ok(([(ECHO_HEADER, "true")], Json(response)))
}

/// Decode `a=1&b=2` pairs. A key given more than once collects its values
/// into an array in arrival order.
pub fn parse_pairs(raw: &[u8]) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in url::form_urlencoded::parse(raw) {
        let value = Value::String(value.into_owned());
        match map.get_mut(key.as_ref()) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(key.into_owned(), value);
            }
        }
    }
    map
}

/// Header names are already lowercase; repeated headers are comma-joined.
pub fn header_map(headers: &HeaderMap) -> Map<String, Value> {
    headers
        .keys()
        .map(|name| {
            let joined = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_string(), Value::String(joined))
        })
        .collect()
}

/// Parse the body according to its content type. An empty body yields `None`.
pub fn parse_body(headers: &HeaderMap, body: &Bytes) -> Result<Option<Value>, AppError> {
    if body.is_empty() {
        return Ok(None);
    }

    let mime = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default();

    match mime.as_str() {
        "application/json" => parse_json(body),
        m if m.starts_with("application/") && m.ends_with("+json") => parse_json(body),
        "application/x-www-form-urlencoded" => Ok(Some(Value::Object(parse_pairs(body)))),
        m if m.starts_with("text/") => Ok(Some(Value::String(
            String::from_utf8_lossy(body).into_owned(),
        ))),
        "" => Err(AppError::UnsupportedMediaType(
            "Missing Content-Type for request body".to_string(),
        )),
        other => Err(AppError::UnsupportedMediaType(format!(
            "Unsupported Media Type: {}",
            other
        ))),
    }
}

fn parse_json(body: &Bytes) -> Result<Option<Value>, AppError> {
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| AppError::BadRequest(format!("Body is not valid JSON: {}", e)))
}
