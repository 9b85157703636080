//! `Json`, `Path` and `Query` wrappers that reject with `WebError`, so a
//! malformed body or parameter gets the same `{"error": ...}` shape as
//! every other failure.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::WebError;

pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

pub struct ApiPath<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request as HttpRequest, StatusCode, header},
        response::IntoResponse,
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    async fn error_body(err: WebError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_request(body: &'static str) -> Request {
        HttpRequest::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn well_formed_json_is_extracted() {
        let ApiJson(payload) = ApiJson::<Payload>::from_request(json_request(r#"{"name":"Ada"}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.name, "Ada");
    }

    #[tokio::test]
    async fn malformed_json_is_a_json_bad_request() {
        let Err(err) = ApiJson::<Payload>::from_request(json_request(r#"{"name":"#), &()).await else {
            panic!("malformed body was accepted");
        };

        let (status, body) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    #[tokio::test]
    async fn missing_content_type_is_a_json_bad_request() {
        let request = HttpRequest::post("/").body(Body::from(r#"{"name":"Ada"}"#)).unwrap();
        let Err(err) = ApiJson::<Payload>::from_request(request, &()).await else {
            panic!("body without content type was accepted");
        };

        let (status, body) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[derive(Debug, Deserialize)]
    struct Paging {
        page: u32,
    }

    #[tokio::test]
    async fn numeric_query_is_extracted() {
        let request = HttpRequest::get("/?page=3").body(Body::empty()).unwrap();
        let (mut parts, _) = request.into_parts();
        let ApiQuery(paging) = ApiQuery::<Paging>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(paging.page, 3);
    }

    #[tokio::test]
    async fn bad_query_is_a_json_bad_request() {
        let request = HttpRequest::get("/?page=first").body(Body::empty()).unwrap();
        let (mut parts, _) = request.into_parts();
        let Err(err) = ApiQuery::<Paging>::from_request_parts(&mut parts, &()).await else {
            panic!("non-numeric page was accepted");
        };

        let (status, body) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
