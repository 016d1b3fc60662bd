//! Tests for directory search.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockUserStore;
use crate::domain::user::{EmailAddress, User, UserId};
use crate::domain::ErrorCode;

fn user_named(first: &str) -> User {
    User {
        id: UserId::random(),
        first_name: first.into(),
        last_name: "Example".into(),
        email: EmailAddress::parse(&format!("{}@example.com", first.to_lowercase()))
            .expect("valid email"),
        password_hash: "$argon2id$stub".into(),
        location: "Testville".into(),
        occupation: "Tester".into(),
        picture_ref: format!("{}.jpg", first.to_lowercase()),
        friends: Vec::new(),
        twitter_url: None,
        linkedin_url: None,
        viewed_profile: 0,
        impressions: 0,
        reset_token_digest: None,
        reset_token_expires: None,
        created_at: Utc::now(),
        revision: 1,
    }
}

#[tokio::test]
async fn search_lowercases_and_caps_the_query() {
    let mut users = MockUserStore::new();
    let matches = vec![user_named("Annette"), user_named("Joanna")];
    users
        .expect_search_first_name()
        .withf(|needle, limit| needle == "ann" && *limit == SEARCH_LIMIT)
        .times(1)
        .returning(move |_, _| Ok(matches.clone()));

    let service = DirectorySearchService::new(Arc::new(users));
    let results = service
        .search_by_first_name("  ANN ")
        .await
        .expect("search succeeds");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].first_name, "Annette");
    assert_eq!(results[1].first_name, "Joanna");
}

#[tokio::test]
async fn search_returns_public_projections_only() {
    let mut users = MockUserStore::new();
    let matches = vec![user_named("Ada")];
    users
        .expect_search_first_name()
        .returning(move |_, _| Ok(matches.clone()));

    let service = DirectorySearchService::new(Arc::new(users));
    let results = service
        .search_by_first_name("ada")
        .await
        .expect("search succeeds");

    let value = serde_json::to_value(&results[0]).expect("summary serialises");
    let mut keys: Vec<&str> = value
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "firstName",
            "id",
            "lastName",
            "location",
            "occupation",
            "pictureRef"
        ]
    );
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn search_rejects_blank_queries_without_touching_the_store(#[case] query: &str) {
    // No expectations registered, so any store access would panic.
    let service = DirectorySearchService::new(Arc::new(MockUserStore::new()));
    let error = service
        .search_by_first_name(query)
        .await
        .expect_err("invalid");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn search_passes_metacharacters_through_literally() {
    let mut users = MockUserStore::new();
    users
        .expect_search_first_name()
        .withf(|needle, _| needle == ".*+?^$")
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let service = DirectorySearchService::new(Arc::new(users));
    let results = service
        .search_by_first_name(".*+?^$")
        .await
        .expect("search succeeds");
    assert!(results.is_empty());
}
