// ABOUTME: Resource service facades and the shared cache-or-fetch algorithm
// ABOUTME: Facades consult caches, translate failures, and write fetched entities through
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Activity facade.
pub mod activity;
/// Athlete facade.
pub mod athlete;
/// Segment facade.
pub mod segment;

pub use activity::ActivityService;
pub use athlete::AthleteService;
pub use segment::SegmentService;

use std::future::Future;

use tracing::debug;

use crate::auth::Token;
use crate::cache::ResourceCache;
use crate::errors::{ApiError, ApiResult};
use crate::models::{Resource, ResourceState};

/// Single-entity get with cache consultation and failure translation.
///
/// 1. A cached snapshot above META level short-circuits with no network
///    activity; a META entry is treated as a miss.
/// 2. On a miss the remote is consulted.
/// 3. `NotFound` means the remote confirmed absence: `Ok(None)`, not an
///    error.
/// 4. `Unauthorized` with a still structurally valid token means the entity
///    exists but its detail is hidden from this viewer: a META placeholder
///    carrying only the identifier is returned (and not cached, so a later
///    call with better rights re-fetches). With an invalid token the error
///    re-raises.
/// 5. A successful fetch is written through the cache and returned.
pub(crate) async fn cached_get<R, F, Fut>(
    cache: &ResourceCache<R>,
    token: &Token,
    id: R::Id,
    fetch: F,
) -> ApiResult<Option<R>>
where
    R: Resource,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ApiResult<R>>,
{
    if let Some(cached) = cache.get(&id) {
        if cached.resource_state() > ResourceState::Meta {
            debug!(%id, state = %cached.resource_state(), "cache hit");
            return Ok(Some(cached));
        }
        debug!(%id, "cached snapshot is meta-only, fetching");
    }

    match fetch().await {
        Ok(entity) => {
            cache.put(entity.clone());
            Ok(Some(entity))
        }
        Err(ApiError::NotFound { .. }) => Ok(None),
        Err(err) if err.is_unauthorized() => {
            if token.is_structurally_valid() {
                debug!(%id, "detail not authorized for this viewer, returning placeholder");
                Ok(Some(R::placeholder(id)))
            } else {
                Err(err)
            }
        }
        Err(err) => Err(err),
    }
}
