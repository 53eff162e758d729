// ABOUTME: Activity service facade with a token-scoped activity cache
// ABOUTME: Cached gets, write-through activity listing, and activity mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use crate::auth::{Token, TokenScoped};
use crate::cache::ResourceCache;
use crate::errors::ApiResult;
use crate::models::{Activity, ActivityUpdate};
use crate::paging::{self, Paging};
use crate::services::cached_get;
use crate::task::{self, TaskHandle};
use crate::transport::ActivityTransport;

/// Per-token facade for activity operations.
pub struct ActivityService {
    token: Arc<Token>,
    transport: Arc<dyn ActivityTransport>,
    activities: ResourceCache<Activity>,
}

impl TokenScoped for ActivityService {
    fn scoped_to(token: &Arc<Token>) -> Self {
        Self::with_transport(Arc::clone(token), token.transport())
    }
}

impl ActivityService {
    /// The activity facade bound to this token, created on first use.
    #[must_use]
    pub fn instance(token: &Arc<Token>) -> Arc<Self> {
        token.service()
    }

    /// Build a facade over a custom transport.
    #[must_use]
    pub fn with_transport(token: Arc<Token>, transport: Arc<dyn ActivityTransport>) -> Self {
        Self {
            token,
            transport,
            activities: ResourceCache::new(),
        }
    }

    /// Get an activity by identifier. `Ok(None)` on confirmed absence; a
    /// META placeholder when the activity is private to another athlete but
    /// the token is still valid.
    ///
    /// # Errors
    ///
    /// Transport and decode failures propagate unmodified.
    pub async fn get_activity(&self, id: i64) -> ApiResult<Option<Activity>> {
        cached_get(&self.activities, &self.token, id, || {
            self.transport.get_activity(id)
        })
        .await
    }

    /// List one page of the authenticated athlete's activities.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_authenticated_athlete_activities(
        &self,
        paging: Option<Paging>,
    ) -> ApiResult<Vec<Activity>> {
        let activities = paging::fetch_page(paging, |window| {
            self.transport.list_authenticated_athlete_activities(window)
        })
        .await?;
        self.activities.put_all(&activities);
        Ok(activities)
    }

    /// List the authenticated athlete's complete activity history,
    /// aggregating all pages in order.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified; no partial results.
    pub async fn list_all_authenticated_athlete_activities(&self) -> ApiResult<Vec<Activity>> {
        let activities = paging::fetch_all(|window| {
            self.transport.list_authenticated_athlete_activities(window)
        })
        .await?;
        self.activities.put_all(&activities);
        Ok(activities)
    }

    /// Update an activity. Always hits the remote; on success the cache
    /// entry is overwritten with the response.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn update_activity(&self, id: i64, update: &ActivityUpdate) -> ApiResult<Activity> {
        let activity = self.transport.update_activity(id, update).await?;
        self.activities.put(activity.clone());
        Ok(activity)
    }

    /// Invalidate the activity cache.
    pub fn clear_cache(&self) {
        self.activities.remove_all();
    }

    /// Asynchronous variant of [`ActivityService::get_activity`].
    pub fn get_activity_async(self: &Arc<Self>, id: i64) -> TaskHandle<Option<Activity>> {
        let service = Arc::clone(self);
        task::submit(async move { service.get_activity(id).await })
    }

    /// Asynchronous variant of
    /// [`ActivityService::list_authenticated_athlete_activities`].
    pub fn list_authenticated_athlete_activities_async(
        self: &Arc<Self>,
        paging: Option<Paging>,
    ) -> TaskHandle<Vec<Activity>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_authenticated_athlete_activities(paging).await })
    }

    /// Asynchronous variant of
    /// [`ActivityService::list_all_authenticated_athlete_activities`].
    pub fn list_all_authenticated_athlete_activities_async(
        self: &Arc<Self>,
    ) -> TaskHandle<Vec<Activity>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_all_authenticated_athlete_activities().await })
    }

    /// Asynchronous variant of [`ActivityService::update_activity`].
    pub fn update_activity_async(
        self: &Arc<Self>,
        id: i64,
        update: ActivityUpdate,
    ) -> TaskHandle<Activity> {
        let service = Arc::clone(self);
        task::submit(async move { service.update_activity(id, &update).await })
    }
}
