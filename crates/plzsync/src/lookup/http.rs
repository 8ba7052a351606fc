use crate::{
    DEFAULT_LOOKUP_BASE_URL, DEFAULT_LOOKUP_TIMEOUT, LocalityRecord, Lookup, LookupError,
    LookupFilter, LookupResult,
};
use core::time::Duration;
use reqwest::{Client, Url};

/// [`Lookup`] implementation backed by the OpenPLZ HTTP API (or anything that
/// speaks the same `GET <base>?name=..` / `GET <base>?postalCode=..` shape).
#[derive(Debug, Clone)]
pub struct HttpLookup {
    client: Client,
    base_url: Url,
}

impl HttpLookup {
    /// Builds a lookup against `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` does not parse or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url).map_err(|e| LookupError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Builds a lookup against the public OpenPLZ endpoint with default
    /// settings.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn openplz() -> Result<Self, LookupError> {
        Self::new(DEFAULT_LOOKUP_BASE_URL, DEFAULT_LOOKUP_TIMEOUT)
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Lookup for HttpLookup {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(%filter)))]
    async fn lookup(&self, filter: LookupFilter) -> LookupResult {
        let (key, value) = filter.query_pair();
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[(key, value)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::debug!("lookup answered with non-success status {status}");
            return Ok(None);
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<Vec<LocalityRecord>>(&body)
            .map(Some)
            .map_err(|e| LookupError::Decode {
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
    };
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn localities(Query(params): Query<HashMap<String, String>>) -> Response {
        match (params.get("name"), params.get("postalCode")) {
            (Some(name), None) if name == "München" => {
                Json(vec![LocalityRecord::new("München", "80331")]).into_response()
            }
            (None, Some(code)) if code == "10115" => Json(vec![
                LocalityRecord::new("Berlin", "10115"),
                LocalityRecord::new("Berlin Mitte", "10115"),
            ])
            .into_response(),
            (Some(name), None) if name == "Broken" => "not json".into_response(),
            (Some(name), None) if name == "Down" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
            _ => Json(Vec::<LocalityRecord>::new()).into_response(),
        }
    }

    async fn serve() -> String {
        let app = Router::new().route("/de/Localities", get(localities));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/de/Localities")
    }

    fn lookup_for(base: &str) -> HttpLookup {
        HttpLookup::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn returns_records_for_url_encoded_name() {
        let lookup = lookup_for(&serve().await);
        let records = lookup
            .lookup(LookupFilter::Name("München".into()))
            .await
            .unwrap();
        assert_eq!(records, Some(vec![LocalityRecord::new("München", "80331")]));
    }

    #[tokio::test]
    async fn queries_by_postal_code() {
        let lookup = lookup_for(&serve().await);
        let records = lookup
            .lookup(LookupFilter::PostalCode("10115".into()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Berlin");
    }

    #[tokio::test]
    async fn empty_match_is_an_empty_list() {
        let lookup = lookup_for(&serve().await);
        let records = lookup
            .lookup(LookupFilter::Name("asdasdasd".into()))
            .await
            .unwrap();
        assert_eq!(records, Some(vec![]));
    }

    #[tokio::test]
    async fn non_success_status_is_none() {
        let lookup = lookup_for(&serve().await);
        let records = lookup
            .lookup(LookupFilter::Name("Down".into()))
            .await
            .unwrap();
        assert_eq!(records, None);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let lookup = lookup_for(&serve().await);
        let err = lookup
            .lookup(LookupFilter::Name("Broken".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Decode { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Bind and immediately drop to obtain a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let lookup = lookup_for(&format!("http://{addr}/de/Localities"));
        let err = lookup
            .lookup(LookupFilter::PostalCode("80331".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)), "{err:?}");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = HttpLookup::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, LookupError::InvalidBaseUrl { .. }));
    }
}
