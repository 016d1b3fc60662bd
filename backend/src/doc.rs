//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! HTTP endpoint from the inbound layer, the domain schemas they exchange,
//! and the session cookie security scheme.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, FriendSummary, Post, PostId, UserId, UserProfile};
use crate::inbound::http::auth::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::inbound::http::posts::{CommentRequest, CreatePostRequest};
use crate::inbound::http::users::ProfileEditRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Social backend API",
        description = "HTTP interface for accounts, friendships, the post feed, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::forgot_password,
        crate::inbound::http::auth::reset_password,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::list_friends,
        crate::inbound::http::users::toggle_friendship,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::get_feed,
        crate::inbound::http::posts::get_user_posts,
        crate::inbound::http::posts::toggle_like,
        crate::inbound::http::posts::add_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserId,
        PostId,
        UserProfile,
        FriendSummary,
        Post,
        RegisterRequest,
        LoginRequest,
        ForgotPasswordRequest,
        ResetPasswordRequest,
        ProfileEditRequest,
        CreatePostRequest,
        CommentRequest,
    )),
    tags(
        (name = "auth", description = "Account lifecycle and sessions"),
        (name = "users", description = "Profiles, friendships, and search"),
        (name = "posts", description = "The shared feed"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
