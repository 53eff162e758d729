// ABOUTME: Per-resource transport traits forming the remote collaborator boundary
// ABOUTME: Facades depend on these seams; tests substitute mocks, production uses RestTransport
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// REST implementation over reqwest.
pub mod rest;

use async_trait::async_trait;

use crate::errors::ApiResult;
use crate::models::{
    Activity, ActivityUpdate, Athlete, AthleteUpdate, Segment, SegmentEffort, Statistics,
};
use crate::paging::Paging;

/// Remote operations backing the athlete facade.
///
/// Failure modes are uniform across implementations: `NotFound` when the
/// remote confirms absence, `Unauthorized` when the token lacks rights,
/// `Transport`/`Decode` for everything the network or codec breaks.
#[async_trait]
pub trait AthleteTransport: Send + Sync {
    /// Fetch one athlete by identifier.
    async fn get_athlete(&self, id: i64) -> ApiResult<Athlete>;

    /// Fetch the athlete who owns the session token.
    async fn get_authenticated_athlete(&self) -> ApiResult<Athlete>;

    /// Fetch one page of the athlete's friends.
    async fn list_athlete_friends(&self, id: i64, paging: Paging) -> ApiResult<Vec<Athlete>>;

    /// Fetch one page of athletes both the given athlete and the
    /// authenticated athlete are following.
    async fn list_athletes_both_following(
        &self,
        id: i64,
        paging: Paging,
    ) -> ApiResult<Vec<Athlete>>;

    /// Fetch one page of the authenticated athlete's friends.
    async fn list_authenticated_athlete_friends(&self, paging: Paging) -> ApiResult<Vec<Athlete>>;

    /// Fetch one page of the athlete's KOM/QOM efforts.
    async fn list_athlete_koms(&self, id: i64, paging: Paging) -> ApiResult<Vec<SegmentEffort>>;

    /// Fetch aggregate statistics for an athlete.
    async fn statistics(&self, id: i64) -> ApiResult<Statistics>;

    /// Update the authenticated athlete's profile and return the new
    /// representation.
    async fn update_authenticated_athlete(&self, update: &AthleteUpdate) -> ApiResult<Athlete>;
}

/// Remote operations backing the segment facade.
#[async_trait]
pub trait SegmentTransport: Send + Sync {
    /// Fetch one segment by identifier.
    async fn get_segment(&self, id: i64) -> ApiResult<Segment>;

    /// Fetch one page of the authenticated athlete's starred segments.
    async fn list_authenticated_athlete_starred_segments(
        &self,
        paging: Paging,
    ) -> ApiResult<Vec<Segment>>;

    /// Fetch one page of another athlete's starred segments.
    async fn list_starred_segments(
        &self,
        athlete_id: i64,
        paging: Paging,
    ) -> ApiResult<Vec<Segment>>;

    /// Fetch one page of efforts recorded on a segment.
    async fn list_segment_efforts(
        &self,
        segment_id: i64,
        paging: Paging,
    ) -> ApiResult<Vec<SegmentEffort>>;

    /// Star or unstar a segment for the authenticated athlete; returns the
    /// updated representation.
    async fn star_segment(&self, segment_id: i64, starred: bool) -> ApiResult<Segment>;
}

/// Remote operations backing the activity facade.
#[async_trait]
pub trait ActivityTransport: Send + Sync {
    /// Fetch one activity by identifier.
    async fn get_activity(&self, id: i64) -> ApiResult<Activity>;

    /// Fetch one page of the authenticated athlete's activities.
    async fn list_authenticated_athlete_activities(
        &self,
        paging: Paging,
    ) -> ApiResult<Vec<Activity>>;

    /// Update an activity and return the new representation.
    async fn update_activity(&self, id: i64, update: &ActivityUpdate) -> ApiResult<Activity>;
}
