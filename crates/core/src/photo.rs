use crate::config::Settings;
use crate::error::GourmetError;
use anyhow::Context;
use reqwest::header::CONTENT_TYPE;

pub const MAX_PHOTO_PX: u32 = 400;
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";
pub const CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";

pub const MISSING_NAME_OR_KEY: &str = "Missing name or API key";
pub const UPSTREAM_FAILED: &str = "Failed to fetch image from Google";

/// Upstream image response whose body has not been read yet.
#[derive(Debug)]
pub struct PhotoStream {
    pub content_type: String,
    pub response: reqwest::Response,
}

#[derive(Debug, Clone)]
pub struct PhotoClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl PhotoClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            http: settings.http_client()?,
            api_key: settings.google_places_api_key.clone(),
            base_url: settings.places_base_url.clone(),
        })
    }

    // `name` is a resource path like `places/{id}/photos/{ref}` and goes into
    // the URL untouched.
    fn url(&self, name: &str, api_key: &str) -> String {
        format!(
            "{}/v1/{}/media?key={}&maxHeightPx={}&maxWidthPx={}",
            self.base_url.trim_end_matches('/'),
            name,
            api_key,
            MAX_PHOTO_PX,
            MAX_PHOTO_PX
        )
    }

    pub async fn fetch(&self, name: &str) -> Result<PhotoStream, GourmetError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !name.is_empty() => key,
            _ => return Err(GourmetError::InvalidInput(MISSING_NAME_OR_KEY.to_string())),
        };

        let response = self
            .http
            .get(self.url(name, api_key))
            .send()
            .await
            .context("photo media request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(GourmetError::upstream(
                Some(status.as_u16()),
                UPSTREAM_FAILED,
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        Ok(PhotoStream {
            content_type,
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{settings_for, spawn_upstream};
    use axum::extract::Query;
    use axum::http::{header, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;

    #[tokio::test]
    async fn missing_name_or_key_is_invalid_input() {
        let client = PhotoClient::from_settings(&settings_for("http://127.0.0.1:9", Some("k"))).unwrap();
        let err = client.fetch("").await.unwrap_err();
        assert!(matches!(&err, GourmetError::InvalidInput(m) if m == MISSING_NAME_OR_KEY));

        let client = PhotoClient::from_settings(&settings_for("http://127.0.0.1:9", None)).unwrap();
        let err = client.fetch("places/a/photos/b").await.unwrap_err();
        assert!(matches!(err, GourmetError::InvalidInput(_)));
    }

    #[test]
    fn url_requests_bounded_size() {
        let client = PhotoClient::from_settings(&settings_for("https://places.example/", Some("k"))).unwrap();
        assert_eq!(
            client.url("places/abc/photos/xyz", "k"),
            "https://places.example/v1/places/abc/photos/xyz/media?key=k&maxHeightPx=400&maxWidthPx=400"
        );
    }

    #[tokio::test]
    async fn failed_upstream_status_is_forwarded() {
        let router = Router::new().route(
            "/v1/places/:place/photos/:photo/media",
            get(|| async { StatusCode::FORBIDDEN }),
        );
        let base = spawn_upstream(router).await;
        let client = PhotoClient::from_settings(&settings_for(&base, Some("k"))).unwrap();

        let err = client.fetch("places/a/photos/b").await.unwrap_err();
        match err {
            GourmetError::Upstream { status, message } => {
                assert_eq!(status, Some(403));
                assert_eq!(message, UPSTREAM_FAILED);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn streams_body_and_content_type() {
        let router = Router::new().route(
            "/v1/places/:place/photos/:photo/media",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                use axum::response::IntoResponse;
                if q.get("maxHeightPx").map(String::as_str) == Some("400")
                    && q.get("maxWidthPx").map(String::as_str) == Some("400")
                    && q.get("key").map(String::as_str) == Some("k")
                {
                    ([(header::CONTENT_TYPE, "image/png")], b"png-bytes".to_vec()).into_response()
                } else {
                    StatusCode::BAD_REQUEST.into_response()
                }
            }),
        );
        let base = spawn_upstream(router).await;
        let client = PhotoClient::from_settings(&settings_for(&base, Some("k"))).unwrap();

        let photo = client.fetch("places/a/photos/b").await.unwrap();
        assert_eq!(photo.content_type, "image/png");
        let body = photo.response.bytes().await.unwrap();
        assert_eq!(&body[..], b"png-bytes");
    }

    #[tokio::test]
    async fn defaults_content_type_to_jpeg() {
        let router = Router::new().route(
            "/v1/places/:place/photos/:photo/media",
            get(|| async {
                axum::response::Response::builder()
                    .status(StatusCode::OK)
                    .body(axum::body::Body::from("raw"))
                    .unwrap()
            }),
        );
        let base = spawn_upstream(router).await;
        let client = PhotoClient::from_settings(&settings_for(&base, Some("k"))).unwrap();

        let photo = client.fetch("places/a/photos/b").await.unwrap();
        assert_eq!(photo.content_type, DEFAULT_CONTENT_TYPE);
    }
}
