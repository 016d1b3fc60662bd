//! In-memory record store adapters.
//!
//! Both stores keep their records in a `RwLock<Vec<_>>`, preserving
//! insertion order so feed and friend listings are stable. Writes take the
//! lock exclusively, which is what makes the revision checks and the user
//! store's pair commit atomic. A poisoned lock surfaces as
//! [`StoreError::Unavailable`] rather than panicking the caller.

mod memory_post_store;
mod memory_user_store;

pub use memory_post_store::MemoryPostStore;
pub use memory_user_store::MemoryUserStore;

use std::sync::{PoisonError, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::ports::StoreError;

fn poisoned_read<T>(_: PoisonError<RwLockReadGuard<'_, T>>) -> StoreError {
    StoreError::Unavailable {
        message: "store lock poisoned".to_owned(),
    }
}

fn poisoned_write<T>(_: PoisonError<RwLockWriteGuard<'_, T>>) -> StoreError {
    StoreError::Unavailable {
        message: "store lock poisoned".to_owned(),
    }
}
