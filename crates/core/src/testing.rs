use crate::config::Settings;
use std::time::Duration;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub(crate) async fn spawn_upstream(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Settings pointing every adapter at `base_url`.
pub(crate) fn settings_for(base_url: &str, api_key: Option<&str>) -> Settings {
    Settings {
        google_places_api_key: api_key.map(str::to_string),
        places_base_url: base_url.to_string(),
        geocode_base_url: base_url.to_string(),
        upstream_timeout: Duration::from_secs(5),
        fallback_delay: Duration::from_millis(1000),
        sentry_dsn: None,
    }
}
