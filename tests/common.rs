// ABOUTME: Shared test helpers: model builders, tokens, and mock transports
// ABOUTME: Mocks count calls per operation so tests can assert exact network activity
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use strava_client::auth::Token;
use strava_client::config::ApiConfig;
use strava_client::errors::{ApiError, ApiResult};
use strava_client::models::{
    Activity, ActivityUpdate, Athlete, AthleteUpdate, ResourceState, Segment, SegmentEffort,
    Statistics,
};
use strava_client::paging::Paging;
use strava_client::transport::{ActivityTransport, AthleteTransport, SegmentTransport};

pub fn athlete(id: i64, state: ResourceState) -> Athlete {
    Athlete {
        id,
        resource_state: state,
        username: Some(format!("athlete-{id}")),
        ..Athlete::default()
    }
}

pub fn segment(id: i64, state: ResourceState) -> Segment {
    Segment {
        id,
        resource_state: state,
        name: Some(format!("segment-{id}")),
        ..Segment::default()
    }
}

pub fn effort(id: i64, state: ResourceState) -> SegmentEffort {
    SegmentEffort {
        id,
        resource_state: state,
        ..SegmentEffort::default()
    }
}

pub fn activity(id: i64, state: ResourceState) -> Activity {
    Activity {
        id,
        resource_state: state,
        name: Some(format!("activity-{id}")),
        ..Activity::default()
    }
}

static TRACING: Once = Once::new();

/// Route library logs through the test harness; honors `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn valid_token() -> Arc<Token> {
    init_tracing();
    Token::new("test-access-token")
}

pub fn expired_token() -> Arc<Token> {
    init_tracing();
    Token::with_details(
        "stale-access-token",
        ApiConfig::default(),
        None,
        Some(Utc::now() - Duration::hours(1)),
        vec!["read".to_owned()],
    )
}

/// Scripted outcome for a mocked remote call.
#[derive(Clone)]
pub enum Outcome<T> {
    Ok(T),
    NotFound,
    Unauthorized,
}

impl<T: Clone> Outcome<T> {
    pub fn to_result(&self, resource: &str) -> ApiResult<T> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::NotFound => Err(ApiError::not_found(resource)),
            Self::Unauthorized => Err(ApiError::unauthorized("access denied")),
        }
    }
}

/// Mock athlete transport: scripted single-entity outcomes plus fixed pages
/// for list endpoints, with per-operation call counters.
pub struct MockAthleteTransport {
    pub athlete_outcome: Outcome<Athlete>,
    pub stats_outcome: Outcome<Statistics>,
    pub updated_athlete: Outcome<Athlete>,
    /// Pages served by every list endpoint, indexed by page number - 1;
    /// out-of-range pages are empty.
    pub friend_pages: Vec<Vec<Athlete>>,
    pub kom_pages: Vec<Vec<SegmentEffort>>,
    pub get_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
}

impl MockAthleteTransport {
    pub fn returning(athlete: Athlete) -> Self {
        Self::with_outcome(Outcome::Ok(athlete))
    }

    pub fn not_found() -> Self {
        Self::with_outcome(Outcome::NotFound)
    }

    pub fn unauthorized() -> Self {
        Self::with_outcome(Outcome::Unauthorized)
    }

    pub fn with_outcome(athlete_outcome: Outcome<Athlete>) -> Self {
        Self {
            athlete_outcome,
            stats_outcome: Outcome::Ok(Statistics::default()),
            updated_athlete: Outcome::NotFound,
            friend_pages: Vec::new(),
            kom_pages: Vec::new(),
            get_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            stats_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
        }
    }

    fn page_of<T: Clone>(pages: &[Vec<T>], paging: Paging) -> Vec<T> {
        pages
            .get(paging.page() as usize - 1)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl AthleteTransport for MockAthleteTransport {
    async fn get_athlete(&self, id: i64) -> ApiResult<Athlete> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.athlete_outcome.to_result(&format!("athlete {id}"))
    }

    async fn get_authenticated_athlete(&self) -> ApiResult<Athlete> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.athlete_outcome.to_result("authenticated athlete")
    }

    async fn list_athlete_friends(&self, _id: i64, paging: Paging) -> ApiResult<Vec<Athlete>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::page_of(&self.friend_pages, paging))
    }

    async fn list_athletes_both_following(
        &self,
        _id: i64,
        paging: Paging,
    ) -> ApiResult<Vec<Athlete>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::page_of(&self.friend_pages, paging))
    }

    async fn list_authenticated_athlete_friends(&self, paging: Paging) -> ApiResult<Vec<Athlete>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::page_of(&self.friend_pages, paging))
    }

    async fn list_athlete_koms(&self, _id: i64, paging: Paging) -> ApiResult<Vec<SegmentEffort>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::page_of(&self.kom_pages, paging))
    }

    async fn statistics(&self, id: i64) -> ApiResult<Statistics> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        self.stats_outcome
            .to_result(&format!("statistics of athlete {id}"))
    }

    async fn update_authenticated_athlete(&self, _update: &AthleteUpdate) -> ApiResult<Athlete> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.updated_athlete.to_result("authenticated athlete")
    }
}

/// Mock segment transport mirroring [`MockAthleteTransport`].
pub struct MockSegmentTransport {
    pub segment_outcome: Outcome<Segment>,
    pub starred_segment: Outcome<Segment>,
    pub segment_pages: Vec<Vec<Segment>>,
    pub effort_pages: Vec<Vec<SegmentEffort>>,
    pub get_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub star_calls: AtomicUsize,
}

impl MockSegmentTransport {
    pub fn returning(segment: Segment) -> Self {
        Self::with_outcome(Outcome::Ok(segment))
    }

    pub fn with_outcome(segment_outcome: Outcome<Segment>) -> Self {
        Self {
            segment_outcome,
            starred_segment: Outcome::NotFound,
            segment_pages: Vec::new(),
            effort_pages: Vec::new(),
            get_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            star_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SegmentTransport for MockSegmentTransport {
    async fn get_segment(&self, id: i64) -> ApiResult<Segment> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.segment_outcome.to_result(&format!("segment {id}"))
    }

    async fn list_authenticated_athlete_starred_segments(
        &self,
        paging: Paging,
    ) -> ApiResult<Vec<Segment>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(MockAthleteTransport::page_of(&self.segment_pages, paging))
    }

    async fn list_starred_segments(
        &self,
        _athlete_id: i64,
        paging: Paging,
    ) -> ApiResult<Vec<Segment>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(MockAthleteTransport::page_of(&self.segment_pages, paging))
    }

    async fn list_segment_efforts(
        &self,
        _segment_id: i64,
        paging: Paging,
    ) -> ApiResult<Vec<SegmentEffort>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(MockAthleteTransport::page_of(&self.effort_pages, paging))
    }

    async fn star_segment(&self, segment_id: i64, _starred: bool) -> ApiResult<Segment> {
        self.star_calls.fetch_add(1, Ordering::SeqCst);
        self.starred_segment
            .to_result(&format!("segment {segment_id}"))
    }
}

/// Mock activity transport mirroring [`MockAthleteTransport`].
pub struct MockActivityTransport {
    pub activity_outcome: Outcome<Activity>,
    pub updated_activity: Outcome<Activity>,
    pub activity_pages: Vec<Vec<Activity>>,
    pub get_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
}

impl MockActivityTransport {
    pub fn returning(activity: Activity) -> Self {
        Self::with_outcome(Outcome::Ok(activity))
    }

    pub fn with_outcome(activity_outcome: Outcome<Activity>) -> Self {
        Self {
            activity_outcome,
            updated_activity: Outcome::NotFound,
            activity_pages: Vec::new(),
            get_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ActivityTransport for MockActivityTransport {
    async fn get_activity(&self, id: i64) -> ApiResult<Activity> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.activity_outcome.to_result(&format!("activity {id}"))
    }

    async fn list_authenticated_athlete_activities(
        &self,
        paging: Paging,
    ) -> ApiResult<Vec<Activity>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(MockAthleteTransport::page_of(&self.activity_pages, paging))
    }

    async fn update_activity(&self, id: i64, _update: &ActivityUpdate) -> ApiResult<Activity> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.updated_activity.to_result(&format!("activity {id}"))
    }
}
