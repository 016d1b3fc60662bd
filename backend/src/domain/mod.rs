//! Domain entities, services, and ports.
//!
//! Everything in here is transport agnostic: services speak to storage
//! through the driven ports in [`ports`] and report failures with the
//! shared [`Error`] taxonomy. Inbound adapters translate both into HTTP.

pub mod accounts;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod feed;
pub mod friend_graph;
pub mod ports;
pub mod post;
pub mod profile;
pub mod user;

pub use self::accounts::{AccountService, NewAccount};
pub use self::directory::DirectorySearchService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed::PostFeedService;
pub use self::friend_graph::FriendGraphService;
pub use self::post::{Post, PostId};
pub use self::profile::{ProfileEdit, ProfileService};
pub use self::user::{EmailAddress, FriendSummary, User, UserId, UserProfile};
