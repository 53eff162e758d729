// ABOUTME: Typed async client library for the Strava v3 API
// ABOUTME: Token-scoped service facades with per-session caching and pagination aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # strava-client
//!
//! A typed async client for the Strava v3 REST API. Per-resource service
//! facades translate method calls into authenticated HTTP requests,
//! deserialize JSON responses into typed models, and smooth over pagination
//! and partial-failure conditions from the remote service.
//!
//! ## Architecture
//!
//! - **[`auth`]**: the [`Token`](auth::Token) credential, which owns a
//!   registry guaranteeing exactly one facade instance per service type for
//!   the session.
//! - **[`services`]**: athlete, segment and activity facades. Single-entity
//!   gets are served from a per-token cache when a sufficiently complete
//!   snapshot is present; list operations always hit the remote and write
//!   their results through the cache.
//! - **[`paging`]**: single-window fetches and whole-collection aggregation
//!   over paginated list endpoints.
//! - **[`cache`]**: the per-resource-type snapshot store.
//! - **[`transport`]**: the HTTP boundary; trait seams per resource with a
//!   reqwest implementation.
//! - **[`task`]**: submits any facade operation to the runtime worker pool
//!   and hands back an awaitable handle.
//!
//! ## Partial-failure semantics
//!
//! A get-by-id returns `Ok(None)` when the remote confirms the resource does
//! not exist, and a META-level placeholder (identifier only) when the
//! resource exists but its detail is not authorized for this viewer. Only
//! genuine failures — an invalid token, network trouble, malformed bodies —
//! surface as errors.
//!
//! ## Example
//!
//! ```rust,no_run
//! use strava_client::{Strava, Token};
//!
//! #[tokio::main]
//! async fn main() -> strava_client::ApiResult<()> {
//!     let token = Token::new(std::env::var("STRAVA_ACCESS_TOKEN").unwrap_or_default());
//!     let client = Strava::new(token);
//!
//!     let me = client.athletes().get_authenticated_athlete().await?;
//!     println!("authenticated as athlete {}", me.id);
//!
//!     let rides = client.activities().list_all_authenticated_athlete_activities().await?;
//!     println!("{} activities on record", rides.len());
//!     Ok(())
//! }
//! ```

/// Token credential and the per-token service registry.
pub mod auth;
/// Per-resource snapshot caches.
pub mod cache;
/// Endpoint configuration and the shared HTTP client.
pub mod config;
/// Error taxonomy.
pub mod errors;
/// Typed API models.
pub mod models;
/// Paging instructions and page aggregation.
pub mod paging;
/// Resource service facades.
pub mod services;
/// Background task submission.
pub mod task;
/// Transport traits and the REST implementation.
pub mod transport;

use std::sync::Arc;

pub use auth::Token;
pub use errors::{ApiError, ApiResult};
pub use models::ResourceState;
pub use paging::Paging;
pub use services::{ActivityService, AthleteService, SegmentService};

/// Convenience handle bundling the facades for one session.
///
/// Thin wrapper over a [`Token`]; the facades it returns come from the
/// token's registry, so mixing `Strava` accessors with direct
/// `*Service::instance` calls yields the same instances.
#[derive(Debug, Clone)]
pub struct Strava {
    token: Arc<Token>,
}

impl Strava {
    /// Create a client for the given token.
    #[must_use]
    pub const fn new(token: Arc<Token>) -> Self {
        Self { token }
    }

    /// The underlying token.
    #[must_use]
    pub fn token(&self) -> &Arc<Token> {
        &self.token
    }

    /// The athlete facade for this session.
    #[must_use]
    pub fn athletes(&self) -> Arc<AthleteService> {
        AthleteService::instance(&self.token)
    }

    /// The segment facade for this session.
    #[must_use]
    pub fn segments(&self) -> Arc<SegmentService> {
        SegmentService::instance(&self.token)
    }

    /// The activity facade for this session.
    #[must_use]
    pub fn activities(&self) -> Arc<ActivityService> {
        ActivityService::instance(&self.token)
    }

    /// Invalidate every cache owned by every facade of this session.
    pub fn clear_caches(&self) {
        self.athletes().clear_cache();
        self.segments().clear_cache();
        self.activities().clear_cache();
    }
}
