// ABOUTME: reqwest-backed transport translating HTTP status codes into the error taxonomy
// ABOUTME: Bearer-authenticated requests against the configured Strava API base URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{ActivityTransport, AthleteTransport, SegmentTransport};
use crate::config::{shared_client, ApiConfig};
use crate::errors::{ApiError, ApiResult};
use crate::models::{
    Activity, ActivityUpdate, Athlete, AthleteUpdate, Segment, SegmentEffort, Statistics,
};
use crate::paging::Paging;

/// REST transport bound to one access token.
///
/// All instances share one pooled HTTP client. The transport performs no
/// caching and no retries; it only formats requests and translates failures.
pub struct RestTransport {
    client: Client,
    config: ApiConfig,
    access_token: String,
}

impl RestTransport {
    /// Create a transport for the given endpoints and access secret.
    #[must_use]
    pub fn new(config: ApiConfig, access_token: String) -> Self {
        Self {
            client: shared_client().clone(),
            config,
            access_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, resource: &str) -> ApiResult<T> {
        debug!(path, "GET {}", resource);
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        decode(response, resource).await
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        paging: Paging,
        resource: &str,
    ) -> ApiResult<Vec<T>> {
        debug!(
            path,
            page = paging.page(),
            per_page = paging.per_page(),
            "GET page of {}",
            resource
        );
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.access_token)
            .query(&[("page", paging.page()), ("per_page", paging.per_page())])
            .send()
            .await?;
        decode(response, resource).await
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        resource: &str,
    ) -> ApiResult<T> {
        debug!(path, "PUT {}", resource);
        let response = self
            .client
            .put(self.url(path))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;
        decode(response, resource).await
    }
}

/// Map the response status to the error taxonomy, then decode the body.
///
/// 404 is a confirmed absence, 401/403 an authorization failure, 429 a rate
/// limit; every other non-success status surfaces as a transport failure.
async fn decode<T: DeserializeOwned>(response: Response, resource: &str) -> ApiResult<T> {
    let status = response.status();
    match status {
        StatusCode::NOT_FOUND => Err(ApiError::not_found(resource)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            let message = response.text().await.unwrap_or_else(|e| {
                warn!("failed to read error response body: {e}");
                String::new()
            });
            Err(ApiError::unauthorized(message))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok());
            warn!(?retry_after, "rate limited by remote API");
            Err(ApiError::RateLimited { retry_after })
        }
        _ => {
            let response = response.error_for_status()?;
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        }
    }
}

#[async_trait]
impl AthleteTransport for RestTransport {
    async fn get_athlete(&self, id: i64) -> ApiResult<Athlete> {
        self.get_json(&format!("/athletes/{id}"), &format!("athlete {id}"))
            .await
    }

    async fn get_authenticated_athlete(&self) -> ApiResult<Athlete> {
        self.get_json("/athlete", "authenticated athlete").await
    }

    async fn list_athlete_friends(&self, id: i64, paging: Paging) -> ApiResult<Vec<Athlete>> {
        self.get_page(
            &format!("/athletes/{id}/friends"),
            paging,
            &format!("friends of athlete {id}"),
        )
        .await
    }

    async fn list_athletes_both_following(
        &self,
        id: i64,
        paging: Paging,
    ) -> ApiResult<Vec<Athlete>> {
        self.get_page(
            &format!("/athletes/{id}/both-following"),
            paging,
            &format!("athletes both following with {id}"),
        )
        .await
    }

    async fn list_authenticated_athlete_friends(&self, paging: Paging) -> ApiResult<Vec<Athlete>> {
        self.get_page("/athlete/friends", paging, "authenticated athlete friends")
            .await
    }

    async fn list_athlete_koms(&self, id: i64, paging: Paging) -> ApiResult<Vec<SegmentEffort>> {
        self.get_page(
            &format!("/athletes/{id}/koms"),
            paging,
            &format!("KOMs of athlete {id}"),
        )
        .await
    }

    async fn statistics(&self, id: i64) -> ApiResult<Statistics> {
        self.get_json(
            &format!("/athletes/{id}/stats"),
            &format!("statistics of athlete {id}"),
        )
        .await
    }

    async fn update_authenticated_athlete(&self, update: &AthleteUpdate) -> ApiResult<Athlete> {
        self.put_json("/athlete", update, "authenticated athlete")
            .await
    }
}

#[async_trait]
impl SegmentTransport for RestTransport {
    async fn get_segment(&self, id: i64) -> ApiResult<Segment> {
        self.get_json(&format!("/segments/{id}"), &format!("segment {id}"))
            .await
    }

    async fn list_authenticated_athlete_starred_segments(
        &self,
        paging: Paging,
    ) -> ApiResult<Vec<Segment>> {
        self.get_page("/segments/starred", paging, "starred segments")
            .await
    }

    async fn list_starred_segments(
        &self,
        athlete_id: i64,
        paging: Paging,
    ) -> ApiResult<Vec<Segment>> {
        self.get_page(
            &format!("/athletes/{athlete_id}/segments/starred"),
            paging,
            &format!("starred segments of athlete {athlete_id}"),
        )
        .await
    }

    async fn list_segment_efforts(
        &self,
        segment_id: i64,
        paging: Paging,
    ) -> ApiResult<Vec<SegmentEffort>> {
        self.get_page(
            &format!("/segments/{segment_id}/all_efforts"),
            paging,
            &format!("efforts on segment {segment_id}"),
        )
        .await
    }

    async fn star_segment(&self, segment_id: i64, starred: bool) -> ApiResult<Segment> {
        self.put_json(
            &format!("/segments/{segment_id}/starred"),
            &serde_json::json!({ "starred": starred }),
            &format!("segment {segment_id}"),
        )
        .await
    }
}

#[async_trait]
impl ActivityTransport for RestTransport {
    async fn get_activity(&self, id: i64) -> ApiResult<Activity> {
        self.get_json(&format!("/activities/{id}"), &format!("activity {id}"))
            .await
    }

    async fn list_authenticated_athlete_activities(
        &self,
        paging: Paging,
    ) -> ApiResult<Vec<Activity>> {
        self.get_page(
            "/athlete/activities",
            paging,
            "authenticated athlete activities",
        )
        .await
    }

    async fn update_activity(&self, id: i64, update: &ActivityUpdate) -> ApiResult<Activity> {
        self.put_json(
            &format!("/activities/{id}"),
            update,
            &format!("activity {id}"),
        )
        .await
    }
}
