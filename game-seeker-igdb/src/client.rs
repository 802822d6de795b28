use tokio::time::Duration;

use crate::credentials::Credentials;
use crate::error::IgdbError;
use crate::types::{CountResponse, CoverRecord, GameRecord, TokenErrorResponse, TokenResponse};

const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const BASE_URL: &str = "https://api.igdb.com/v4";
const COVER_URL_TEMPLATE: &str = "https://images.igdb.com/igdb/image/upload/t_cover_big";

/// Returned by [`IgdbClient::resolve_cover`] when the record has no cover id.
pub const COVER_NONE: &str = "No cover available";
/// Returned when the covers resource has no image identifier for the id.
pub const COVER_NOT_FOUND: &str = "Cover image not found";
/// Returned when the cover lookup request itself fails.
pub const COVER_FETCH_ERROR: &str = "Error fetching cover image";

/// HTTP client for the IGDB API.
///
/// Exchanges client credentials for a bearer token once at construction and
/// carries the resulting headers on every call. All requests share one
/// uniform timeout; expiry surfaces as a request failure like any other
/// transport error.
pub struct IgdbClient {
    http: reqwest::Client,
    client_id: String,
    access_token: String,
}

impl IgdbClient {
    /// Create a new client by exchanging the credentials for an access token
    /// via the Twitch OAuth client-credentials flow. Fatal on failure.
    pub async fn new(creds: Credentials) -> Result<Self, IgdbError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let resp = http
            .post(TOKEN_URL)
            .query(&[
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let token: TokenResponse = resp.json().await?;
            return Ok(Self {
                http,
                client_id: creds.client_id,
                access_token: token.access_token,
            });
        }

        // The token endpoint reports credential problems with a message
        // field; map the two known rejections to distinct errors.
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<TokenErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or_default();

        if status == reqwest::StatusCode::BAD_REQUEST && message.contains("invalid client") {
            return Err(IgdbError::InvalidClientId);
        }
        if status == reqwest::StatusCode::FORBIDDEN && message.contains("invalid client secret") {
            return Err(IgdbError::InvalidClientSecret);
        }
        Err(IgdbError::Upstream {
            status: status.as_u16(),
            body: if message.is_empty() { body } else { message },
        })
    }

    /// Issue one POST against a named resource with a textual IGDB query
    /// (`fields ...; search ...; limit ...; offset ...;`) and deserialize
    /// the JSON array response.
    ///
    /// A non-success status propagates as [`IgdbError::Upstream`] rather
    /// than an empty page, so callers can tell an outage from "no results".
    pub async fn query<T: serde::de::DeserializeOwned>(
        &self,
        resource: &str,
        body: &str,
    ) -> Result<Vec<T>, IgdbError> {
        let resp = self
            .http
            .post(format!("{}/{}", BASE_URL, resource))
            .header("Client-ID", &self.client_id)
            .bearer_auth(&self.access_token)
            .body(body.to_string())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            log::warn!("IGDB /{} returned {}: {}", resource, status, body);
            return Err(IgdbError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json().await?)
    }

    /// Fetch one page of game records.
    pub async fn games(&self, body: &str) -> Result<Vec<GameRecord>, IgdbError> {
        self.query("games", body).await
    }

    /// Total number of games in the IGDB database, via `/games/count`.
    pub async fn games_count(&self) -> Result<u64, IgdbError> {
        let resp = self
            .http
            .post(format!("{}/games/count", BASE_URL))
            .header("Client-ID", &self.client_id)
            .bearer_auth(&self.access_token)
            .body(String::new())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            log::warn!("IGDB /games/count returned {}: {}", status, body);
            return Err(IgdbError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let count: CountResponse = resp.json().await?;
        Ok(count.count)
    }

    /// Resolve an optional numeric cover id into a display URL.
    ///
    /// Always returns one of four strings: a CDN URL, [`COVER_NONE`],
    /// [`COVER_NOT_FOUND`], or [`COVER_FETCH_ERROR`]. The placeholders are
    /// shown verbatim to the user, so they stay distinct.
    pub async fn resolve_cover(&self, cover_id: Option<u64>) -> String {
        resolve_cover_with(cover_id, |id| {
            let body = format!("fields image_id; where id = {id};");
            async move { self.query::<CoverRecord>("covers", &body).await }
        })
        .await
    }
}

/// Cover resolution over an injected covers lookup, so the four-way result
/// contract stays testable without a live client.
pub(crate) async fn resolve_cover_with<F, Fut>(cover_id: Option<u64>, mut fetch: F) -> String
where
    F: FnMut(u64) -> Fut,
    Fut: std::future::Future<Output = Result<Vec<CoverRecord>, IgdbError>>,
{
    let Some(id) = cover_id else {
        return COVER_NONE.to_string();
    };

    match fetch(id).await {
        Ok(covers) => match covers.into_iter().next().and_then(|c| c.image_id) {
            Some(image_id) => format!("{}/{}.jpg", COVER_URL_TEMPLATE, image_id),
            None => COVER_NOT_FOUND.to_string(),
        },
        Err(e) => {
            log::warn!("Error fetching cover data for id {}: {}", id, e);
            COVER_FETCH_ERROR.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover(image_id: Option<&str>) -> CoverRecord {
        CoverRecord {
            image_id: image_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn missing_cover_id_skips_the_lookup() {
        let url = resolve_cover_with(None, |_| async {
            panic!("no lookup should be issued without a cover id")
        })
        .await;
        assert_eq!(url, COVER_NONE);
    }

    #[tokio::test]
    async fn present_image_id_builds_the_cdn_url() {
        let url = resolve_cover_with(Some(9), |_| async { Ok(vec![cover(Some("co1234"))]) }).await;
        assert_eq!(
            url,
            "https://images.igdb.com/igdb/image/upload/t_cover_big/co1234.jpg"
        );
    }

    #[tokio::test]
    async fn empty_page_or_missing_field_is_not_found() {
        let url = resolve_cover_with(Some(9), |_| async { Ok(Vec::new()) }).await;
        assert_eq!(url, COVER_NOT_FOUND);

        let url = resolve_cover_with(Some(9), |_| async { Ok(vec![cover(None)]) }).await;
        assert_eq!(url, COVER_NOT_FOUND);
    }

    #[tokio::test]
    async fn failed_lookup_is_the_fetch_error_placeholder() {
        let url = resolve_cover_with(Some(9), |_| async {
            Err(IgdbError::Upstream {
                status: 502,
                body: "bad gateway".to_string(),
            })
        })
        .await;
        assert_eq!(url, COVER_FETCH_ERROR);
    }
}
