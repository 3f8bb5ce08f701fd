//! JSON extractor that validates before the handler runs

use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use locate_core::{Validate, Validated};
use serde::de::DeserializeOwned;

/// Deserializes a JSON body and checks its declared constraints.
///
/// Any failure short-circuits with a 422, so handlers only ever see a
/// [`Validated`] request.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub Validated<T>);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(Validated::new(value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{self, header::CONTENT_TYPE};
    use locate_core::IngestRequest;

    fn json_request(body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_valid_body() {
        let req = json_request(r#"{"repository_url":"https://github.com/facebook/react"}"#);
        let ValidatedJson(request) = ValidatedJson::<IngestRequest>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(request.repository_url, "https://github.com/facebook/react");
        assert!(request.github_token.is_none());
    }

    #[tokio::test]
    async fn test_rejects_constraint_violation() {
        let req = json_request(r#"{"repository_url":"https://gitlab.com/foo/bar"}"#);
        let err = ValidatedJson::<IngestRequest>::from_request(req, &())
            .await
            .unwrap_err();
        match err {
            ApiError::Validation(e) => assert!(e.has_field("repository_url")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejects_wrong_types_as_malformed() {
        let req = json_request(r#"{"repository_url": 42}"#);
        let err = ValidatedJson::<IngestRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn test_rejects_missing_content_type() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"repository_url":"https://github.com/a/b"}"#))
            .unwrap();
        let err = ValidatedJson::<IngestRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }
}
