// ABOUTME: Token credential owning the per-session service registry and REST transport
// ABOUTME: Guarantees exactly one facade instance per (token, service type) pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::any::{Any, TypeId};
use std::sync::{Arc, Weak};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::config::ApiConfig;
use crate::models::Athlete;
use crate::transport::rest::RestTransport;

/// A service facade that can be bound to a [`Token`].
///
/// `scoped_to` is invoked by [`Token::service`] on first use, and again only
/// after every handle to the previously built instance has been dropped; it
/// receives the token so the facade can share the token's transport and check
/// its validity. The constructor must not call back into [`Token::service`],
/// which would re-enter the registry while a shard lock is held.
pub trait TokenScoped: Send + Sync + Sized + 'static {
    /// Build the facade instance bound to this token.
    fn scoped_to(token: &Arc<Token>) -> Self;
}

/// An access credential for one authenticated session.
///
/// The token owns everything scoped to the session: the access secret, the
/// owning athlete (when known), the shared REST transport, and a registry
/// holding at most one live instance of each service facade. Nothing is
/// registered globally.
///
/// Facades hold an `Arc<Token>` back to their token, so the registry keeps
/// weak handles; a facade (and its caches) lives exactly as long as some
/// caller references it, and dropping every external handle releases the
/// whole session instead of leaving the cycle allocated forever.
pub struct Token {
    access_token: String,
    athlete: Option<Athlete>,
    expires_at: Option<DateTime<Utc>>,
    scopes: Vec<String>,
    transport: Arc<RestTransport>,
    services: DashMap<TypeId, Weak<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret.
        f.debug_struct("Token")
            .field("athlete", &self.athlete.as_ref().map(|a| a.id))
            .field("expires_at", &self.expires_at)
            .field("scopes", &self.scopes)
            .field("services", &self.services.len())
            .finish()
    }
}

impl Token {
    /// Create a token for the given access secret using default endpoints.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Arc<Self> {
        Self::with_config(access_token, ApiConfig::default())
    }

    /// Create a token bound to a specific endpoint configuration.
    #[must_use]
    pub fn with_config(access_token: impl Into<String>, config: ApiConfig) -> Arc<Self> {
        let access_token = access_token.into();
        let transport = Arc::new(RestTransport::new(config, access_token.clone()));
        Arc::new(Self {
            access_token,
            athlete: None,
            expires_at: None,
            scopes: Vec::new(),
            transport,
            services: DashMap::new(),
        })
    }

    /// Builder-style constructor carrying the owning athlete, expiry and
    /// granted scopes returned by the OAuth exchange.
    #[must_use]
    pub fn with_details(
        access_token: impl Into<String>,
        config: ApiConfig,
        athlete: Option<Athlete>,
        expires_at: Option<DateTime<Utc>>,
        scopes: Vec<String>,
    ) -> Arc<Self> {
        let access_token = access_token.into();
        let transport = Arc::new(RestTransport::new(config, access_token.clone()));
        Arc::new(Self {
            access_token,
            athlete,
            expires_at,
            scopes,
            transport,
            services: DashMap::new(),
        })
    }

    /// The raw access secret.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The athlete this token belongs to, when known.
    #[must_use]
    pub fn athlete(&self) -> Option<&Athlete> {
        self.athlete.as_ref()
    }

    /// Scopes granted to this token.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// The REST transport shared by every facade bound to this token.
    #[must_use]
    pub fn transport(&self) -> Arc<RestTransport> {
        Arc::clone(&self.transport)
    }

    /// Whether the credential is still structurally valid: a non-empty
    /// secret that has not expired. This is a local check and performs no
    /// network I/O; the remote remains the authority on revocation.
    #[must_use]
    pub fn is_structurally_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => expires_at > Utc::now(),
            None => true,
        }
    }

    /// Return the facade of type `S` bound to this token, constructing and
    /// registering it on first use.
    ///
    /// The upgrade-or-rebuild runs under the map's entry API, so concurrent
    /// callers for the same (token, type) pair always observe the identical
    /// instance; as long as any caller holds the facade, repeated calls are
    /// reference-stable. A slot whose facade has been dropped by everyone is
    /// rebuilt on the next call with fresh, empty caches.
    #[must_use]
    pub fn service<S: TokenScoped>(self: &Arc<Self>) -> Arc<S> {
        let mut entry = self.services.entry(TypeId::of::<S>()).or_insert_with(|| {
            let vacant: Weak<dyn Any + Send + Sync> = Weak::<S>::new();
            vacant
        });
        let service = match entry.value().upgrade() {
            Some(live) => live,
            None => {
                let built: Arc<dyn Any + Send + Sync> = Arc::new(S::scoped_to(self));
                *entry.value_mut() = Arc::downgrade(&built);
                built
            }
        };
        drop(entry);
        // Entries are keyed by TypeId, so the downcast cannot fail.
        service
            .downcast::<S>()
            .unwrap_or_else(|_| unreachable!("service registry entry keyed by its own TypeId"))
    }

    /// Number of facade types ever requested on this token, live or not.
    #[must_use]
    pub fn registered_services(&self) -> usize {
        self.services.len()
    }
}
