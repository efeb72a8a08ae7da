use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every request and response with an `x-request-id` header,
/// generating a fresh UUID when the caller did not supply one.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let request_id = match req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    };

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        req.headers_mut()
            .insert(REQUEST_ID_HEADER, header_value.clone());

        let mut response = next.run(req).await;
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
        return response;
    }

    next.run(req).await
}
