//! Directory search over user first names, feeding the typeahead UI.

use std::sync::Arc;

use crate::domain::ports::UserStore;
use crate::domain::user::FriendSummary;
use crate::domain::Error;

/// Maximum number of matches a search returns.
const SEARCH_LIMIT: usize = 10;

/// Service answering first-name lookups.
#[derive(Clone)]
pub struct DirectorySearchService {
    users: Arc<dyn UserStore>,
}

impl DirectorySearchService {
    /// Create the service over a user store.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Case-insensitive literal substring search over first names.
    ///
    /// The query is matched literally (lowercased `contains`, never pattern
    /// syntax), so metacharacters in user input cannot change the search.
    /// At most [`SEARCH_LIMIT`] public projections come back, in
    /// store-defined order.
    pub async fn search_by_first_name(&self, query: &str) -> Result<Vec<FriendSummary>, Error> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_request("firstName query is required"));
        }

        let needle = trimmed.to_lowercase();
        let matches = self
            .users
            .search_first_name(&needle, SEARCH_LIMIT)
            .await
            .map_err(Error::from)?;
        Ok(matches.iter().map(FriendSummary::from).collect())
    }
}

#[cfg(test)]
mod tests;
