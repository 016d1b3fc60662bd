//! Tests for the users handlers.

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{register_and_login, social_test_app};

fn profile_edit(first: &str, last: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "location": "London",
        "occupation": "Analyst",
        "twitterUrl": "",
        "linkedinUrl": "",
    })
}

#[actix_web::test]
async fn protected_routes_require_a_session() {
    let app = test::init_service(social_test_app()).await;

    let request = test::TestRequest::get()
        .uri("/api/v1/users/search/first-name?firstName=ann")
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn get_user_includes_email_only_for_self() {
    let app = test::init_service(social_test_app()).await;
    let (ada, cookie) = register_and_login(&app, "Ada", "Lovelace", "ada@example.com").await;
    let (grace, _) = register_and_login(&app, "Grace", "Hopper", "grace@example.com").await;

    let own = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{ada}"))
        .cookie(cookie.clone())
        .to_request();
    let own: Value = test::read_body_json(test::call_service(&app, own).await).await;
    assert_eq!(
        own.get("email").and_then(Value::as_str),
        Some("ada@example.com")
    );

    let other = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{grace}"))
        .cookie(cookie)
        .to_request();
    let other: Value = test::read_body_json(test::call_service(&app, other).await).await;
    assert!(other.get("email").is_none());
    assert_eq!(other.get("firstName").and_then(Value::as_str), Some("Grace"));
}

#[actix_web::test]
async fn toggling_a_friendship_twice_returns_to_the_initial_state() {
    let app = test::init_service(social_test_app()).await;
    let (ada, ada_cookie) = register_and_login(&app, "Ada", "Lovelace", "ada@example.com").await;
    let (grace, grace_cookie) =
        register_and_login(&app, "Grace", "Hopper", "grace@example.com").await;

    let toggle_uri = format!("/api/v1/users/{ada}/friends/{grace}");
    let toggle = test::TestRequest::patch()
        .uri(&toggle_uri)
        .cookie(ada_cookie.clone())
        .to_request();
    let friends: Value = test::read_body_json(test::call_service(&app, toggle).await).await;
    let friends = friends.as_array().expect("friend array");
    assert_eq!(friends.len(), 1);
    assert_eq!(
        friends[0].get("firstName").and_then(Value::as_str),
        Some("Grace")
    );

    // The edge is symmetric: Grace sees Ada too.
    let grace_friends = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{grace}/friends"))
        .cookie(grace_cookie)
        .to_request();
    let grace_friends: Value =
        test::read_body_json(test::call_service(&app, grace_friends).await).await;
    assert_eq!(
        grace_friends
            .as_array()
            .and_then(|list| list[0].get("firstName"))
            .and_then(Value::as_str),
        Some("Ada")
    );

    // Second toggle removes the edge from both sides.
    let toggle_again = test::TestRequest::patch()
        .uri(&toggle_uri)
        .cookie(ada_cookie.clone())
        .to_request();
    let friends: Value = test::read_body_json(test::call_service(&app, toggle_again).await).await;
    assert_eq!(friends.as_array().map(Vec::len), Some(0));

    let ada_friends = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{ada}/friends"))
        .cookie(ada_cookie)
        .to_request();
    let ada_friends: Value =
        test::read_body_json(test::call_service(&app, ada_friends).await).await;
    assert_eq!(ada_friends.as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn toggling_someone_elses_friend_list_is_forbidden() {
    let app = test::init_service(social_test_app()).await;
    let (ada, ada_cookie) = register_and_login(&app, "Ada", "Lovelace", "ada@example.com").await;
    let (grace, _) = register_and_login(&app, "Grace", "Hopper", "grace@example.com").await;

    let request = test::TestRequest::patch()
        .uri(&format!("/api/v1/users/{grace}/friends/{ada}"))
        .cookie(ada_cookie)
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn self_friendship_is_rejected() {
    let app = test::init_service(social_test_app()).await;
    let (ada, cookie) = register_and_login(&app, "Ada", "Lovelace", "ada@example.com").await;

    let request = test::TestRequest::patch()
        .uri(&format!("/api/v1/users/{ada}/friends/{ada}"))
        .cookie(cookie)
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn profile_edit_renames_and_fans_out_to_posts() {
    let app = test::init_service(social_test_app()).await;
    let (ada, cookie) = register_and_login(&app, "Ada", "Lovelace", "ada@example.com").await;

    let post = test::TestRequest::post()
        .uri("/api/v1/posts")
        .cookie(cookie.clone())
        .set_json(json!({ "description": "before the rename" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, post).await.status(),
        StatusCode::CREATED
    );

    let edit = test::TestRequest::patch()
        .uri(&format!("/api/v1/users/{ada}/profile"))
        .cookie(cookie.clone())
        .set_json(profile_edit("Augusta", "King"))
        .to_request();
    let profile: Value = test::read_body_json(test::call_service(&app, edit).await).await;
    assert_eq!(
        profile.get("firstName").and_then(Value::as_str),
        Some("Augusta")
    );

    let feed = test::TestRequest::get()
        .uri("/api/v1/posts")
        .cookie(cookie)
        .to_request();
    let feed: Value = test::read_body_json(test::call_service(&app, feed).await).await;
    assert_eq!(
        feed.as_array()
            .and_then(|posts| posts[0].get("authorFirstName"))
            .and_then(Value::as_str),
        Some("Augusta")
    );
}

#[actix_web::test]
async fn profile_edit_rejects_disallowed_social_urls() {
    let app = test::init_service(social_test_app()).await;
    let (ada, cookie) = register_and_login(&app, "Ada", "Lovelace", "ada@example.com").await;

    let mut edit = profile_edit("Ada", "Lovelace");
    edit["twitterUrl"] = json!("https://evil.example/ada");
    let request = test::TestRequest::patch()
        .uri(&format!("/api/v1/users/{ada}/profile"))
        .cookie(cookie)
        .set_json(edit)
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn search_matches_case_insensitively() {
    let app = test::init_service(social_test_app()).await;
    let (_, cookie) = register_and_login(&app, "Annika", "Larsson", "annika@example.com").await;
    register_and_login(&app, "Bob", "Jones", "bob@example.com").await;

    let request = test::TestRequest::get()
        .uri("/api/v1/users/search/first-name?firstName=ANN")
        .cookie(cookie.clone())
        .to_request();
    let matches: Value = test::read_body_json(test::call_service(&app, request).await).await;
    let matches = matches.as_array().expect("match array");
    assert_eq!(matches.len(), 1);
    assert_eq!(
        matches[0].get("firstName").and_then(Value::as_str),
        Some("Annika")
    );

    let blank = test::TestRequest::get()
        .uri("/api/v1/users/search/first-name?firstName=%20")
        .cookie(cookie)
        .to_request();
    assert_eq!(
        test::call_service(&app, blank).await.status(),
        StatusCode::BAD_REQUEST
    );
}
