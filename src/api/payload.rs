use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Request body decoded from JSON or from an urlencoded form.
///
/// Anything else, or a body that does not decode, is a 400.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
                tracing::debug!("Rejected form body: {}", e.body_text());
                ApiError::bad_request(format!("Invalid request body: {}", e.body_text()))
            })?;
            return Ok(Payload(value));
        }

        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Rejected JSON body: {}", e.body_text());
            ApiError::bad_request(format!("Invalid request body: {}", e.body_text()))
        })?;
        Ok(Payload(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Credentials {
        username: Option<String>,
        password: Option<String>,
    }

    fn request(content_type: &str, body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/signin")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn decodes_json() {
        let req = request("application/json", r#"{"username":"neo","password":"pw"}"#);
        let Payload(creds) = Payload::<Credentials>::from_request(req, &()).await.unwrap();
        assert_eq!(creds.username.as_deref(), Some("neo"));
    }

    #[tokio::test]
    async fn decodes_urlencoded_form() {
        let req = request("application/x-www-form-urlencoded", "username=neo&password=pw");
        let Payload(creds) = Payload::<Credentials>::from_request(req, &()).await.unwrap();
        assert_eq!(creds.password.as_deref(), Some("pw"));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let req = request("application/json", "{not json");
        let err = Payload::<Credentials>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
