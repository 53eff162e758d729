// ABOUTME: Segment service facade with token-scoped segment and effort caches
// ABOUTME: Cached gets, starred-segment listing, effort aggregation, star mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use crate::auth::{Token, TokenScoped};
use crate::cache::ResourceCache;
use crate::errors::ApiResult;
use crate::models::{Segment, SegmentEffort};
use crate::paging::{self, Paging};
use crate::services::cached_get;
use crate::task::{self, TaskHandle};
use crate::transport::SegmentTransport;

/// Per-token facade for segment operations.
pub struct SegmentService {
    token: Arc<Token>,
    transport: Arc<dyn SegmentTransport>,
    segments: ResourceCache<Segment>,
    efforts: ResourceCache<SegmentEffort>,
}

impl TokenScoped for SegmentService {
    fn scoped_to(token: &Arc<Token>) -> Self {
        Self::with_transport(Arc::clone(token), token.transport())
    }
}

impl SegmentService {
    /// The segment facade bound to this token, created on first use.
    #[must_use]
    pub fn instance(token: &Arc<Token>) -> Arc<Self> {
        token.service()
    }

    /// Build a facade over a custom transport.
    #[must_use]
    pub fn with_transport(token: Arc<Token>, transport: Arc<dyn SegmentTransport>) -> Self {
        Self {
            token,
            transport,
            segments: ResourceCache::new(),
            efforts: ResourceCache::new(),
        }
    }

    /// Get a segment by identifier. `Ok(None)` on confirmed absence; a META
    /// placeholder when the segment's detail is hidden from this viewer but
    /// the token is still valid.
    ///
    /// # Errors
    ///
    /// Transport and decode failures propagate unmodified.
    pub async fn get_segment(&self, id: i64) -> ApiResult<Option<Segment>> {
        cached_get(&self.segments, &self.token, id, || {
            self.transport.get_segment(id)
        })
        .await
    }

    /// List one page of the authenticated athlete's starred segments.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_authenticated_athlete_starred_segments(
        &self,
        paging: Option<Paging>,
    ) -> ApiResult<Vec<Segment>> {
        let segments = paging::fetch_page(paging, |window| {
            self.transport
                .list_authenticated_athlete_starred_segments(window)
        })
        .await?;
        self.segments.put_all(&segments);
        Ok(segments)
    }

    /// List every starred segment of the authenticated athlete.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_all_authenticated_athlete_starred_segments(
        &self,
    ) -> ApiResult<Vec<Segment>> {
        let segments = paging::fetch_all(|window| {
            self.transport
                .list_authenticated_athlete_starred_segments(window)
        })
        .await?;
        self.segments.put_all(&segments);
        Ok(segments)
    }

    /// List one page of another athlete's starred segments.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_starred_segments(
        &self,
        athlete_id: i64,
        paging: Option<Paging>,
    ) -> ApiResult<Vec<Segment>> {
        let segments = paging::fetch_page(paging, |window| {
            self.transport.list_starred_segments(athlete_id, window)
        })
        .await?;
        self.segments.put_all(&segments);
        Ok(segments)
    }

    /// List every starred segment of another athlete.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_all_starred_segments(&self, athlete_id: i64) -> ApiResult<Vec<Segment>> {
        let segments =
            paging::fetch_all(|window| self.transport.list_starred_segments(athlete_id, window))
                .await?;
        self.segments.put_all(&segments);
        Ok(segments)
    }

    /// List one page of efforts recorded on a segment.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_segment_efforts(
        &self,
        segment_id: i64,
        paging: Option<Paging>,
    ) -> ApiResult<Vec<SegmentEffort>> {
        let efforts = paging::fetch_page(paging, |window| {
            self.transport.list_segment_efforts(segment_id, window)
        })
        .await?;
        self.efforts.put_all(&efforts);
        Ok(efforts)
    }

    /// List every effort recorded on a segment. Large segments can hold
    /// hundreds of thousands of efforts; prefer the paged variant unless the
    /// full history is genuinely needed.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn list_all_segment_efforts(&self, segment_id: i64) -> ApiResult<Vec<SegmentEffort>> {
        let efforts =
            paging::fetch_all(|window| self.transport.list_segment_efforts(segment_id, window))
                .await?;
        self.efforts.put_all(&efforts);
        Ok(efforts)
    }

    /// Star or unstar a segment for the authenticated athlete. Always hits
    /// the remote; on success the cache entry is overwritten.
    ///
    /// # Errors
    ///
    /// Any transport failure propagates unmodified.
    pub async fn star_segment(&self, segment_id: i64, starred: bool) -> ApiResult<Segment> {
        let segment = self.transport.star_segment(segment_id, starred).await?;
        self.segments.put(segment.clone());
        Ok(segment)
    }

    /// Invalidate every cache owned by this facade.
    pub fn clear_cache(&self) {
        self.segments.remove_all();
        self.efforts.remove_all();
    }

    /// Asynchronous variant of [`SegmentService::get_segment`].
    pub fn get_segment_async(self: &Arc<Self>, id: i64) -> TaskHandle<Option<Segment>> {
        let service = Arc::clone(self);
        task::submit(async move { service.get_segment(id).await })
    }

    /// Asynchronous variant of
    /// [`SegmentService::list_authenticated_athlete_starred_segments`].
    pub fn list_authenticated_athlete_starred_segments_async(
        self: &Arc<Self>,
        paging: Option<Paging>,
    ) -> TaskHandle<Vec<Segment>> {
        let service = Arc::clone(self);
        task::submit(async move {
            service
                .list_authenticated_athlete_starred_segments(paging)
                .await
        })
    }

    /// Asynchronous variant of
    /// [`SegmentService::list_all_authenticated_athlete_starred_segments`].
    pub fn list_all_authenticated_athlete_starred_segments_async(
        self: &Arc<Self>,
    ) -> TaskHandle<Vec<Segment>> {
        let service = Arc::clone(self);
        task::submit(async move {
            service
                .list_all_authenticated_athlete_starred_segments()
                .await
        })
    }

    /// Asynchronous variant of [`SegmentService::list_starred_segments`].
    pub fn list_starred_segments_async(
        self: &Arc<Self>,
        athlete_id: i64,
        paging: Option<Paging>,
    ) -> TaskHandle<Vec<Segment>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_starred_segments(athlete_id, paging).await })
    }

    /// Asynchronous variant of [`SegmentService::list_all_starred_segments`].
    pub fn list_all_starred_segments_async(
        self: &Arc<Self>,
        athlete_id: i64,
    ) -> TaskHandle<Vec<Segment>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_all_starred_segments(athlete_id).await })
    }

    /// Asynchronous variant of [`SegmentService::list_segment_efforts`].
    pub fn list_segment_efforts_async(
        self: &Arc<Self>,
        segment_id: i64,
        paging: Option<Paging>,
    ) -> TaskHandle<Vec<SegmentEffort>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_segment_efforts(segment_id, paging).await })
    }

    /// Asynchronous variant of [`SegmentService::list_all_segment_efforts`].
    pub fn list_all_segment_efforts_async(
        self: &Arc<Self>,
        segment_id: i64,
    ) -> TaskHandle<Vec<SegmentEffort>> {
        let service = Arc::clone(self);
        task::submit(async move { service.list_all_segment_efforts(segment_id).await })
    }

    /// Asynchronous variant of [`SegmentService::star_segment`].
    pub fn star_segment_async(
        self: &Arc<Self>,
        segment_id: i64,
        starred: bool,
    ) -> TaskHandle<Segment> {
        let service = Arc::clone(self);
        task::submit(async move { service.star_segment(segment_id, starred).await })
    }
}
