// ABOUTME: Athlete service facade with token-scoped athlete and effort caches
// ABOUTME: Cached gets, write-through list aggregation, profile mutation, async variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::{Arc, OnceLock};

use crate::auth::{Token, TokenScoped};
use crate::cache::ResourceCache;
use crate::errors::{ApiError, ApiResult};
use crate::models::{Athlete, AthleteUpdate, Resource, ResourceState, SegmentEffort, Statistics};
use crate::paging::{self, Paging};
use crate::services::cached_get;
use crate::task::{self, TaskHandle};
use crate::transport::AthleteTransport;

/// Per-token facade for athlete operations.
///
/// Obtain instances through [`AthleteService::instance`]; two calls with the
/// same token return the identical instance, so the caches behind it are
/// shared across the whole session.
pub struct AthleteService {
    token: Arc<Token>,
    transport: Arc<dyn AthleteTransport>,
    athletes: ResourceCache<Athlete>,
    efforts: ResourceCache<SegmentEffort>,
    /// Identifier of the session owner, remembered from the first
    /// authenticated fetch when the token does not carry it.
    own_id: OnceLock<i64>,
}

impl TokenScoped for AthleteService {
    fn scoped_to(token: &Arc<Token>) -> Self {
        Self::with_transport(Arc::clone(token), token.transport())
    }
}

impl AthleteService {
    /// The athlete facade bound to this token, created on first use.
    #[must_use]
    pub fn instance(token: &Arc<Token>) -> Arc<Self> {
        token.service()
    }

    /// Build a facade over a custom transport. Mostly useful for tests and
    /// alternative backends; production code should use
    /// [`AthleteService::instance`].
    #[must_use]
    pub fn with_transport(token: Arc<Token>, transport: Arc<dyn AthleteTransport>) -> Self {
        Self {
            token,
            transport,
            athletes: ResourceCache::new(),
            efforts: ResourceCache::new(),
            own_id: OnceLock::new(),
        }
    }

    /// Get an athlete by identifier.
    ///
    /// Returns `Ok(None)` when the remote confirms the athlete does not
    /// exist. When the token lacks rights to the athlete's detail but is
    /// itself still valid, returns a META placeholder carrying only the id.
    ///
    /// # Errors
    ///
    /// Transport and decode failures propagate unmodified; `Unauthorized`
    /// re-raises when the token itself is no longer valid.
    pub async fn get_athlete(&self, id: i64) -> ApiResult<Option<Athlete>> {
        cached_get(&self.athletes, &self.token, id, || {
            self.transport.get_athlete(id)
        })
        .await
    }

    /// Get the athlete who owns this session token.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn get_authenticated_athlete(&self) -> ApiResult<Athlete> {
        if let Some(own_id) = self.own_athlete_id() {
            if let Some(cached) = self.athletes.get(&own_id) {
                if cached.resource_state() > ResourceState::Meta {
                    return Ok(cached);
                }
            }
        }

        let athlete = self.transport.get_authenticated_athlete().await?;
        let _ = self.own_id.set(athlete.id);
        self.athletes.put(athlete.clone());
        Ok(athlete)
    }

    /// The session owner's identifier, once known: carried by the token from
    /// the OAuth exchange, or learned from an authenticated fetch.
    fn own_athlete_id(&self) -> Option<i64> {
        self.token
            .athlete()
            .map(|athlete| athlete.id)
            .or_else(|| self.own_id.get().copied())
    }

    /// List one page of an athlete's friends, or the default first page when
    /// no instruction is given. Always reads from the remote; list
    /// membership can change independently of any cached entity.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_athlete_friends(
        &self,
        id: i64,
        paging: Option<Paging>,
    ) -> ApiResult<Vec<Athlete>> {
        let athletes = paging::fetch_page(paging, |window| {
            self.transport.list_athlete_friends(id, window)
        })
        .await?;
        self.athletes.put_all(&athletes);
        Ok(athletes)
    }

    /// List every friend of an athlete, aggregating all pages in order.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified; no partial results.
    pub async fn list_all_athlete_friends(&self, id: i64) -> ApiResult<Vec<Athlete>> {
        let athletes =
            paging::fetch_all(|window| self.transport.list_athlete_friends(id, window)).await?;
        self.athletes.put_all(&athletes);
        Ok(athletes)
    }

    /// List one page of athletes both the given athlete and the
    /// authenticated athlete follow.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_athletes_both_following(
        &self,
        id: i64,
        paging: Option<Paging>,
    ) -> ApiResult<Vec<Athlete>> {
        let athletes = paging::fetch_page(paging, |window| {
            self.transport.list_athletes_both_following(id, window)
        })
        .await?;
        self.athletes.put_all(&athletes);
        Ok(athletes)
    }

    /// List every athlete both parties follow.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_all_athletes_both_following(&self, id: i64) -> ApiResult<Vec<Athlete>> {
        let athletes =
            paging::fetch_all(|window| self.transport.list_athletes_both_following(id, window))
                .await?;
        self.athletes.put_all(&athletes);
        Ok(athletes)
    }

    /// List one page of the authenticated athlete's friends.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_authenticated_athlete_friends(
        &self,
        paging: Option<Paging>,
    ) -> ApiResult<Vec<Athlete>> {
        let athletes = paging::fetch_page(paging, |window| {
            self.transport.list_authenticated_athlete_friends(window)
        })
        .await?;
        self.athletes.put_all(&athletes);
        Ok(athletes)
    }

    /// List every friend of the authenticated athlete.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_all_authenticated_athlete_friends(&self) -> ApiResult<Vec<Athlete>> {
        let athletes =
            paging::fetch_all(|window| self.transport.list_authenticated_athlete_friends(window))
                .await?;
        self.athletes.put_all(&athletes);
        Ok(athletes)
    }

    /// List one page of an athlete's KOM/QOM efforts.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_athlete_koms(
        &self,
        id: i64,
        paging: Option<Paging>,
    ) -> ApiResult<Vec<SegmentEffort>> {
        let efforts =
            paging::fetch_page(paging, |window| self.transport.list_athlete_koms(id, window))
                .await?;
        self.efforts.put_all(&efforts);
        Ok(efforts)
    }

    /// List every KOM/QOM effort held by an athlete.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_all_athlete_koms(&self, id: i64) -> ApiResult<Vec<SegmentEffort>> {
        let efforts =
            paging::fetch_all(|window| self.transport.list_athlete_koms(id, window)).await?;
        self.efforts.put_all(&efforts);
        Ok(efforts)
    }

    /// Aggregate statistics for an athlete. Never cached; statistics carry
    /// no identifier or representation level.
    ///
    /// Returns `Ok(None)` when the athlete does not exist. An authorization
    /// failure with a still-valid token yields empty statistics, mirroring
    /// the placeholder rule for entities. Statistics carry no representation
    /// level, so an empty-by-denial result is indistinguishable from a
    /// genuinely empty record; callers needing the distinction should fetch
    /// the athlete first and check for a META placeholder.
    ///
    /// # Errors
    ///
    /// Other transport failures propagate unmodified.
    pub async fn statistics(&self, id: i64) -> ApiResult<Option<Statistics>> {
        match self.transport.statistics(id).await {
            Ok(stats) => Ok(Some(stats)),
            Err(ApiError::NotFound { .. }) => Ok(None),
            Err(err) if err.is_unauthorized() => {
                if self.token.is_structurally_valid() {
                    Ok(Some(Statistics::default()))
                } else {
                    Err(err)
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Update the authenticated athlete's profile. Always hits the remote;
    /// on success the cache entry is overwritten with the response.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn update_authenticated_athlete(&self, update: &AthleteUpdate) -> ApiResult<Athlete> {
        let athlete = self.transport.update_authenticated_athlete(update).await?;
        let _ = self.own_id.set(athlete.id);
        self.athletes.put(athlete.clone());
        Ok(athlete)
    }

    /// Invalidate every cache owned by this facade, forcing a full re-fetch
    /// on next access.
    pub fn clear_cache(&self) {
        self.athletes.remove_all();
        self.efforts.remove_all();
    }

    // Asynchronous variants: each submits the synchronous operation to the
    // shared worker pool and returns immediately.

    /// Asynchronous variant of [`AthleteService::get_athlete`].
    pub fn get_athlete_async(self: &Arc<Self>, id: i64) -> TaskHandle<Option<Athlete>> {
        let service = Arc::clone(self);
        task::submit(async move { service.get_athlete(id).await })
    }

    /// Asynchronous variant of [`AthleteService::get_authenticated_athlete`].
    pub fn get_authenticated_athlete_async(self: &Arc<Self>) -> TaskHandle<Athlete> {
        let service = Arc::clone(self);
        task::submit(async move { service.get_authenticated_athlete().await })
    }

    /// Asynchronous variant of [`AthleteService::list_athlete_friends`].
    pub fn list_athlete_friends_async(
        self: &Arc<Self>,
        id: i64,
        paging: Option<Paging>,
    ) -> TaskHandle<Vec<Athlete>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_athlete_friends(id, paging).await })
    }

    /// Asynchronous variant of [`AthleteService::list_all_athlete_friends`].
    pub fn list_all_athlete_friends_async(self: &Arc<Self>, id: i64) -> TaskHandle<Vec<Athlete>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_all_athlete_friends(id).await })
    }

    /// Asynchronous variant of [`AthleteService::list_athletes_both_following`].
    pub fn list_athletes_both_following_async(
        self: &Arc<Self>,
        id: i64,
        paging: Option<Paging>,
    ) -> TaskHandle<Vec<Athlete>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_athletes_both_following(id, paging).await })
    }

    /// Asynchronous variant of [`AthleteService::list_all_athletes_both_following`].
    pub fn list_all_athletes_both_following_async(
        self: &Arc<Self>,
        id: i64,
    ) -> TaskHandle<Vec<Athlete>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_all_athletes_both_following(id).await })
    }

    /// Asynchronous variant of [`AthleteService::list_authenticated_athlete_friends`].
    pub fn list_authenticated_athlete_friends_async(
        self: &Arc<Self>,
        paging: Option<Paging>,
    ) -> TaskHandle<Vec<Athlete>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_authenticated_athlete_friends(paging).await })
    }

    /// Asynchronous variant of [`AthleteService::list_all_authenticated_athlete_friends`].
    pub fn list_all_authenticated_athlete_friends_async(
        self: &Arc<Self>,
    ) -> TaskHandle<Vec<Athlete>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_all_authenticated_athlete_friends().await })
    }

    /// Asynchronous variant of [`AthleteService::list_athlete_koms`].
    pub fn list_athlete_koms_async(
        self: &Arc<Self>,
        id: i64,
        paging: Option<Paging>,
    ) -> TaskHandle<Vec<SegmentEffort>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_athlete_koms(id, paging).await })
    }

    /// Asynchronous variant of [`AthleteService::list_all_athlete_koms`].
    pub fn list_all_athlete_koms_async(
        self: &Arc<Self>,
        id: i64,
    ) -> TaskHandle<Vec<SegmentEffort>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_all_athlete_koms(id).await })
    }

    /// Asynchronous variant of [`AthleteService::statistics`].
    pub fn statistics_async(self: &Arc<Self>, id: i64) -> TaskHandle<Option<Statistics>> {
        let service = Arc::clone(self);
        task::submit(async move { service.statistics(id).await })
    }

    /// Asynchronous variant of [`AthleteService::update_authenticated_athlete`].
    pub fn update_authenticated_athlete_async(
        self: &Arc<Self>,
        update: AthleteUpdate,
    ) -> TaskHandle<Athlete> {
        let service = Arc::clone(self);
        task::submit(async move { service.update_authenticated_athlete(&update).await })
    }
}
