use axum::{Json, extract::State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::OkResponse;
use crate::models::auth::{
    LoginRequest, LoginResponse, MeResponse, UpdateProfileRequest, validate_login_request,
};
use crate::state::AppState;
use crate::utils::{hash, jwt};

#[utoipa::path(
    post,
    path = "/api/admin/auth/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in as an admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed token", body = LoginResponse),
        (status = 400, description = "Missing credentials (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unknown user, wrong password, or non-admin (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let user = user::Entity::find()
        .filter(user::Column::Username.eq(payload.username.trim()))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    // Only admins may obtain a token; a valid password on a non-admin
    // account is reported identically to a bad one.
    if user.role != "admin" {
        return Err(AppError::InvalidCredentials);
    }

    let is_valid = hash::verify_password(&payload.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {e}")))?;
    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::sign(
        user.id,
        &user.username,
        &user.role,
        &state.config.auth.jwt_secret,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        username: user.username,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/auth/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Current authenticated user",
    responses(
        (status = 200, description = "User info", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "User no longer exists (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AppError> {
    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(MeResponse {
        id: user.id,
        username: user.username,
        role: user.role,
    }))
}

#[utoipa::path(
    put,
    path = "/api/admin/profile",
    tag = "Auth",
    operation_id = "updateProfile",
    summary = "Update the current admin's username and/or password",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated", body = OkResponse),
        (status = 400, description = "Nothing to update (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn update_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    let username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    let password = payload.password.as_deref().filter(|p| !p.is_empty());

    if username.is_none() && password.is_none() {
        return Err(AppError::Validation("Nothing to update".into()));
    }

    let mut active = user::ActiveModel {
        id: Set(auth_user.user_id),
        ..Default::default()
    };
    if let Some(username) = username {
        active.username = Set(username.to_string());
    }
    if let Some(password) = password {
        let hashed = hash::hash_password(password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {e}")))?;
        active.password = Set(hashed);
    }

    active.update(&state.db).await?;

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    get,
    path = "/api/admin/profile",
    tag = "Auth",
    operation_id = "getProfile",
    summary = "Current admin's profile",
    responses(
        (status = 200, description = "Profile", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AppError> {
    auth_user.require_admin()?;
    me(auth_user, State(state)).await
}
