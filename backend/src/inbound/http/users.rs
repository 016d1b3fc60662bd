//! Users API handlers: profiles, friends, and directory search.
//!
//! ```text
//! GET   /api/v1/users/search/first-name?firstName=ann
//! GET   /api/v1/users/{id}
//! PATCH /api/v1/users/{id}/profile
//! GET   /api/v1/users/{id}/friends
//! PATCH /api/v1/users/{id}/friends/{friendId}
//! ```
//!
//! All routes require a session; the friendship and profile mutations
//! additionally require the session user to own the addressed record.

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, FriendSummary, ProfileEdit, UserId, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string for first-name search.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FirstNameQuery {
    /// Substring to match against first names, case-insensitively.
    #[serde(rename = "firstName")]
    pub first_name: String,
}

/// Profile edit request body. Empty strings clear optional fields.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEditRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub twitter_url: String,
    #[serde(default)]
    pub linkedin_url: String,
}

impl From<ProfileEditRequest> for ProfileEdit {
    fn from(value: ProfileEditRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            location: value.location,
            occupation: value.occupation,
            twitter_url: value.twitter_url,
            linkedin_url: value.linkedin_url,
        }
    }
}

/// Search users by first name.
#[utoipa::path(
    get,
    path = "/api/v1/users/search/first-name",
    params(FirstNameQuery),
    responses(
        (status = 200, description = "Matching users", body = [FriendSummary]),
        (status = 400, description = "Missing or blank query", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "searchUsersByFirstName"
)]
#[get("/users/search/first-name")]
pub async fn search_users(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<FirstNameQuery>,
) -> ApiResult<web::Json<Vec<FriendSummary>>> {
    session.require_user_id()?;
    let matches = state.directory.search_by_first_name(&query.first_name).await?;
    Ok(web::Json(matches))
}

/// Fetch a user's profile.
///
/// The email field is present only when the session user fetches their own
/// profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = UserId, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<UserProfile>> {
    let actor = session.require_user_id()?;
    let profile = state.profile.get_profile(&actor, &path.into_inner()).await?;
    Ok(web::Json(profile))
}

/// Update the session user's profile.
///
/// The changed name and location propagate to every post the user has
/// authored before the response returns.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/profile",
    params(("id" = UserId, Path, description = "User id; must match the session user")),
    request_body = ProfileEditRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the profile owner", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Concurrent edit", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[patch("/users/{id}/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<UserId>,
    payload: web::Json<ProfileEditRequest>,
) -> ApiResult<web::Json<UserProfile>> {
    let actor = session.require_user_id()?;
    let profile = state
        .profile
        .apply_profile_edit(&actor, &path, &payload.into_inner().into())
        .await?;
    Ok(web::Json(profile))
}

/// List a user's friends as public projections.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/friends",
    params(("id" = UserId, Path, description = "User id")),
    responses(
        (status = 200, description = "Friend list", body = [FriendSummary]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listFriends"
)]
#[get("/users/{id}/friends")]
pub async fn list_friends(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<Vec<FriendSummary>>> {
    session.require_user_id()?;
    let friends = state.friend_graph.list_friends(&path).await?;
    Ok(web::Json(friends))
}

/// Toggle the friendship between the session user and `friendId`.
///
/// Adds the edge when absent, removes it when present, and returns the
/// session user's updated friend list either way.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/friends/{friendId}",
    params(
        ("id" = UserId, Path, description = "User id; must match the session user"),
        ("friendId" = UserId, Path, description = "User to befriend or unfriend")
    ),
    responses(
        (status = 200, description = "Updated friend list", body = [FriendSummary]),
        (status = 400, description = "Self-friendship", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the list owner", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Concurrent update", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "toggleFriendship"
)]
#[patch("/users/{id}/friends/{friend_id}")]
pub async fn toggle_friendship(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(UserId, UserId)>,
) -> ApiResult<web::Json<Vec<FriendSummary>>> {
    let actor = session.require_user_id()?;
    let (user_id, friend_id) = path.into_inner();
    let friends = state
        .friend_graph
        .toggle_friendship(&actor, &user_id, &friend_id)
        .await?;
    Ok(web::Json(friends))
}

#[cfg(test)]
mod tests;
