use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use garde::{Report, Validate};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use crate::error::ApiError;

/// JSON body extractor, which does not care about `Content-Type`.
///
/// Clients do not always set the header, the body is parsed as JSON anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T> Deref for JsonBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(JsonBody(value))
    }
}

/// Extractor wrapper, which validates the extracted value with garde
#[derive(Debug, Clone, Copy, Default)]
pub struct Valid<E>(pub E);

impl<E> Deref for Valid<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E> Valid<E> {
    pub fn into_inner(self) -> E {
        self.0
    }
}

#[derive(Debug)]
pub enum ValidationRejection<E> {
    /// Extracted value did not pass validation
    Invalid(Report),
    /// Inner extractor failed
    Inner(E),
}

impl<E: Display> Display for ValidationRejection<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationRejection::Invalid(errors) => write!(f, "{errors}"),
            ValidationRejection::Inner(error) => write!(f, "{error}"),
        }
    }
}

impl<E: Error + 'static> Error for ValidationRejection<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ValidationRejection::Invalid(report) => Some(report),
            ValidationRejection::Inner(e) => Some(e),
        }
    }
}

impl<E> From<ValidationRejection<E>> for ApiError
where
    ApiError: From<E>,
{
    fn from(rejection: ValidationRejection<E>) -> Self {
        match rejection {
            ValidationRejection::Invalid(report) => ApiError::Validation(report),
            ValidationRejection::Inner(e) => e.into(),
        }
    }
}

impl<E> IntoResponse for ValidationRejection<E>
where
    ApiError: From<E>,
{
    fn into_response(self) -> Response {
        <ApiError as From<Self>>::from(self).into_response()
    }
}

impl<S, Extractor, T> FromRequest<S> for Valid<Extractor>
where
    S: Send + Sync,
    T: Validate<Context = ()>,
    Extractor: Deref<Target = T> + FromRequest<S>,
    ApiError: From<<Extractor as FromRequest<S>>::Rejection>,
{
    type Rejection = ValidationRejection<<Extractor as FromRequest<S>>::Rejection>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let inner = Extractor::from_request(req, state)
            .await
            .map_err(ValidationRejection::Inner)?;

        inner
            .deref()
            .validate()
            .map_err(ValidationRejection::Invalid)?;
        Ok(Valid(inner))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use feedback_types::Submission;
    use http::StatusCode;

    use super::*;

    fn request(content_type: Option<&str>, body: impl Into<Body>) -> Request {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(http::header::CONTENT_TYPE, content_type);
        }
        builder.body(body.into()).unwrap()
    }

    fn json_request(body: &'static str) -> Request {
        request(Some("application/json"), body)
    }

    async fn extract(req: Request) -> Result<Submission, ValidationRejection<ApiError>> {
        Valid::<JsonBody<Submission>>::from_request(req, &())
            .await
            .map(|valid| valid.into_inner().0)
    }

    #[tokio::test]
    async fn test_valid_payload() {
        let req = json_request(r#"{"name":"Ana","rating":4,"message":"Great!"}"#);
        let submission = extract(req).await.unwrap();
        assert_eq!(submission.name, "Ana");
        assert_eq!(submission.rating.value(), 4);
    }

    #[tokio::test]
    async fn test_payload_without_json_content_type() {
        let body = r#"{"rating":2,"message":"Meh"}"#;
        let submission = extract(request(None, body)).await.unwrap();
        assert_eq!(submission.message, "Meh");

        let submission = extract(request(Some("text/plain"), body)).await.unwrap();
        assert_eq!(submission.rating.value(), 2);
    }

    #[tokio::test]
    async fn test_invalid_payload() {
        let req = json_request(r#"{"name":"Ana","rating":0,"message":""}"#);
        match extract(req).await {
            Err(ValidationRejection::Invalid(report)) => {
                assert_eq!(report.iter().count(), 2);
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let req = json_request(r#"{"name":"Ana","rating":"#);
        assert!(matches!(
            extract(req).await,
            Err(ValidationRejection::Inner(ApiError::MalformedBody(_)))
        ));

        let req = json_request(r#"{"name":"Ana","rating":-1,"message":"hi"}"#);
        assert!(matches!(
            extract(req).await,
            Err(ValidationRejection::Inner(ApiError::MalformedBody(_)))
        ));
    }

    #[tokio::test]
    async fn test_unreadable_body_is_internal() {
        // over the default body limit of axum
        let body = vec![b' '; 3 * 1024 * 1024];
        let res = extract(request(None, body)).await;
        assert!(matches!(
            res,
            Err(ValidationRejection::Inner(ApiError::Internal(_)))
        ));
    }

    #[tokio::test]
    async fn test_rejection_response() {
        let req = json_request(r#"{"rating":3,"message":""}"#);
        let response = extract(req).await.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Invalid submission");
        assert_eq!(body["details"][0]["path"], "message");

        let req = json_request("not json");
        let response = extract(req).await.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
