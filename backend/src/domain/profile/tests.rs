//! Tests for the profile service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockPostStore, MockUserStore};
use crate::domain::user::{EmailAddress, User};
use crate::domain::ErrorCode;

fn user_named(first: &str, last: &str) -> User {
    User {
        id: UserId::random(),
        first_name: first.into(),
        last_name: last.into(),
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

fn returning_user(store: &mut MockUserStore, user: &User) {
    let id = user.id;
    let snapshot = user.clone();
    store
        .expect_find_by_id()
        .withf(move |candidate| *candidate == id)
        .returning(move |_| Ok(Some(snapshot.clone())));
}

fn rename_edit() -> ProfileEdit {
    ProfileEdit {
        first_name: "Augusta".into(),
        last_name: "King".into(),
        location: "London".into(),
        occupation: "Countess".into(),
        twitter_url: String::new(),
        linkedin_url: String::new(),
    }
}

#[tokio::test]
async fn get_profile_includes_email_only_for_the_owner() {
    let ada = user_named("Ada", "Lovelace");
    let mut users = MockUserStore::new();
    returning_user(&mut users, &ada);

    let service = ProfileService::new(Arc::new(users), Arc::new(MockPostStore::new()));

    let own = service
        .get_profile(&ada.id, &ada.id)
        .await
        .expect("own profile");
    assert_eq!(own.email, Some(ada.email.clone()));

    let other = service
        .get_profile(&UserId::random(), &ada.id)
        .await
        .expect("other profile");
    assert_eq!(other.email, None);
    assert_eq!(other.first_name, "Ada");
}

#[tokio::test]
async fn get_profile_reports_a_missing_user() {
    let mut users = MockUserStore::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = ProfileService::new(Arc::new(users), Arc::new(MockPostStore::new()));
    let actor = UserId::random();
    let error = service
        .get_profile(&actor, &UserId::random())
        .await
        .expect_err("not found");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn edit_updates_the_record_and_fans_out_to_posts() {
    let ada = user_named("Ada", "Lovelace");
    let ada_id = ada.id;

    let mut users = MockUserStore::new();
    returning_user(&mut users, &ada);
    users
        .expect_save()
        .withf(move |saved, expected| {
            saved.id == ada_id
                && saved.first_name == "Augusta"
                && saved.last_name == "King"
                && saved.location == "London"
                && saved.occupation == "Countess"
                && saved.twitter_url.is_none()
                && saved.linkedin_url.is_none()
                && *expected == 1
                && saved.revision == 2
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let mut posts = MockPostStore::new();
    posts
        .expect_update_author_fields()
        .withf(move |author, fields| {
            *author == ada_id
                && fields.first_name == "Augusta"
                && fields.last_name == "King"
                && fields.location == "London"
        })
        .times(1)
        .returning(|_, _| Ok(3));

    let service = ProfileService::new(Arc::new(users), Arc::new(posts));
    let profile = service
        .apply_profile_edit(&ada.id, &ada.id, &rename_edit())
        .await
        .expect("edit succeeds");
    assert_eq!(profile.first_name, "Augusta");
    assert_eq!(profile.email, Some(ada.email.clone()));
}

#[tokio::test]
async fn edit_rejects_acting_for_someone_else() {
    // No expectations registered, so any store access would panic.
    let service = ProfileService::new(
        Arc::new(MockUserStore::new()),
        Arc::new(MockPostStore::new()),
    );
    let error = service
        .apply_profile_edit(&UserId::random(), &UserId::random(), &rename_edit())
        .await
        .expect_err("forbidden");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn edit_rejects_blank_names_before_any_store_access() {
    let service = ProfileService::new(
        Arc::new(MockUserStore::new()),
        Arc::new(MockPostStore::new()),
    );
    let actor = UserId::random();
    let edit = ProfileEdit {
        first_name: "   ".into(),
        ..rename_edit()
    };
    let error = service
        .apply_profile_edit(&actor, &actor, &edit)
        .await
        .expect_err("invalid");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case("https://twitter.com/ada", "")]
#[case("https://x.com/ada", "")]
#[case("https://www.twitter.com/ada", "")]
#[case("http://x.com/ada", "")]
#[case("", "https://linkedin.com/in/ada")]
#[case("", "https://www.linkedin.com/in/ada")]
#[tokio::test]
async fn edit_accepts_allow_listed_social_urls(#[case] twitter: &str, #[case] linkedin: &str) {
    let ada = user_named("Ada", "Lovelace");
    let mut users = MockUserStore::new();
    returning_user(&mut users, &ada);
    users.expect_save().returning(|_, _| Ok(()));
    let mut posts = MockPostStore::new();
    posts.expect_update_author_fields().returning(|_, _| Ok(0));

    let edit = ProfileEdit {
        twitter_url: twitter.into(),
        linkedin_url: linkedin.into(),
        ..rename_edit()
    };
    let service = ProfileService::new(Arc::new(users), Arc::new(posts));
    let profile = service
        .apply_profile_edit(&ada.id, &ada.id, &edit)
        .await
        .expect("edit succeeds");
    assert_eq!(profile.twitter_url.as_deref(), non_empty(twitter).as_deref());
    assert_eq!(
        profile.linkedin_url.as_deref(),
        non_empty(linkedin).as_deref()
    );
}

#[rstest]
#[case("https://evil.example/ada", "")]
#[case("ftp://twitter.com/ada", "")]
#[case("not a url", "")]
#[case("", "https://linkedin.com.evil.example/in/ada")]
#[case("", "https://twitter.com/ada")]
#[tokio::test]
async fn edit_rejects_disallowed_social_urls(#[case] twitter: &str, #[case] linkedin: &str) {
    // Validation fails before any store access, so no expectations are set.
    let service = ProfileService::new(
        Arc::new(MockUserStore::new()),
        Arc::new(MockPostStore::new()),
    );
    let actor = UserId::random();
    let edit = ProfileEdit {
        twitter_url: twitter.into(),
        linkedin_url: linkedin.into(),
        ..rename_edit()
    };
    let error = service
        .apply_profile_edit(&actor, &actor, &edit)
        .await
        .expect_err("invalid");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn edit_retries_on_revision_mismatch_then_conflicts() {
    let ada = user_named("Ada", "Lovelace");
    let mut users = MockUserStore::new();
    returning_user(&mut users, &ada);
    users
        .expect_save()
        .times(MAX_WRITE_ATTEMPTS)
        .returning(|_, _| {
            Err(StoreError::RevisionMismatch {
                expected: 1,
                actual: 2,
            })
        });

    let service = ProfileService::new(Arc::new(users), Arc::new(MockPostStore::new()));
    let error = service
        .apply_profile_edit(&ada.id, &ada.id, &rename_edit())
        .await
        .expect_err("conflict after retries");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case("", true)]
#[case("https://twitter.com/ada", true)]
#[case("https://WWW.Twitter.COM/ada", true)]
#[case("https://x.com/ada", true)]
#[case("https://wwwtwitter.com/ada", false)]
#[case("https://sub.twitter.com/ada", false)]
#[case("javascript:alert(1)", false)]
fn host_allow_list_matches_exactly(#[case] value: &str, #[case] expected: bool) {
    assert_eq!(host_is_allowed(value, TWITTER_HOSTS), expected);
}
