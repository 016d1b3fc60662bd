//! Shared HTTP adapter state.
//!
//! Handlers accept this bundle via `actix_web::web::Data`, so they depend
//! only on domain services and stay testable without real I/O.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::domain::{
    AccountService, DirectorySearchService, FriendGraphService, PostFeedService, ProfileService,
};
use crate::outbound::mail::LogMailer;
use crate::outbound::persistence::{MemoryPostStore, MemoryUserStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: AccountService,
    pub friend_graph: FriendGraphService,
    pub feed: PostFeedService,
    pub profile: ProfileService,
    pub directory: DirectorySearchService,
}

impl HttpState {
    /// Wire every service over the in-memory adapters.
    ///
    /// `client_url` is the web client's base URL, used for reset links.
    pub fn in_memory(client_url: String) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let posts = Arc::new(MemoryPostStore::new());
        Self {
            accounts: AccountService::new(
                users.clone(),
                Arc::new(LogMailer),
                Arc::new(DefaultClock),
                client_url,
            ),
            friend_graph: FriendGraphService::new(users.clone()),
            feed: PostFeedService::new(posts.clone(), users.clone()),
            profile: ProfileService::new(users.clone(), posts),
            directory: DirectorySearchService::new(users),
        }
    }
}
