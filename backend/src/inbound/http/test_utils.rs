//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::domain::UserId;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, posts, users};

/// Session middleware for handler tests: fresh key per invocation, cookie
/// named `session`, `Secure` flag off so plain-HTTP test requests work.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build the full API app over in-memory adapters for handler tests.
pub fn social_test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = web::Data::new(HttpState::in_memory("http://client.test".to_owned()));
    App::new().app_data(state).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .service(auth::register)
            .service(auth::login)
            .service(auth::forgot_password)
            .service(auth::reset_password)
            .service(users::search_users)
            .service(users::get_user)
            .service(users::update_profile)
            .service(users::list_friends)
            .service(users::toggle_friendship)
            .service(posts::create_post)
            .service(posts::get_feed)
            .service(posts::get_user_posts)
            .service(posts::toggle_like)
            .service(posts::add_comment),
    )
}

/// Registration payload with sensible defaults for tests.
pub fn register_payload(first: &str, last: &str, email: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "email": email,
        "password": "hunter2hunter2",
        "location": "Testville",
        "occupation": "Tester",
        "pictureRef": "pic.jpg",
    })
}

/// Register an account and log it in, returning its id and session cookie.
pub async fn register_and_login<S, B>(
    app: &S,
    first: &str,
    last: &str,
    email: &str,
) -> (UserId, Cookie<'static>)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let register = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(register_payload(first, last, email))
        .to_request();
    let response = test::call_service(app, register).await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::CREATED,
        "registration should succeed"
    );
    let body: Value = test::read_body_json(response).await;
    let id = body
        .get("id")
        .and_then(Value::as_str)
        .and_then(|raw| UserId::parse(raw).ok())
        .expect("registered id");

    let login = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": email, "password": "hunter2hunter2" }))
        .to_request();
    let response = test::call_service(app, login).await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::OK,
        "login should succeed"
    );
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned();

    (id, cookie)
}
