//! Handlers for the `/users` resource (registration, session, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracker_core::error::CoreError;
use tracker_core::patch::provided;
use tracker_core::types::DbId;
use tracker_core::user::{normalize_email, MIN_PASSWORD_LENGTH, USER_ENTITY};
use tracker_core::validation::validate_input;
use tracker_db::models::user::{CreateUser, UpdateUser, UserResponse};
use validator::{Validate, ValidateEmail};

use crate::auth::cookie::{cleared_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Same message for an unknown email and a wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(custom(
        function = "tracker_core::validation::non_blank",
        message = "Name is required"
    ))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(
        function = "tracker_core::user::long_enough_password",
        message = "Password must be at least 6 characters long"
    ))]
    pub password: String,
    #[serde(default)]
    #[validate(custom(
        function = "tracker_core::validation::non_blank",
        message = "Country is required"
    ))]
    pub country: String,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `PUT /users/profile`. Blank or missing fields are kept.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users
///
/// Register and start a session. Returns 201 with the new profile.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<UserResponse>)> {
    validate_input(&input)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .store
        .create_user(&CreateUser {
            name: input.name.trim().to_string(),
            email: normalize_email(&input.email),
            password_hash,
            country: input.country.trim().to_string(),
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    let jar = start_session(&state, jar, user.id)?;
    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(&user))))
}

/// POST /api/users/login
///
/// Authenticate with email + password and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<UserResponse>)> {
    let user = state
        .store
        .find_user_by_email(&normalize_email(&input.email))
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");

    let jar = start_session(&state, jar, user.id)?;
    Ok((jar, Json(UserResponse::from(&user))))
}

/// POST /api/users/logout
///
/// Clear the session cookie. Works with or without a valid session.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(cleared_cookie(&state.config.jwt));
    (jar, Json(MessageResponse::new("Logged out successfully")))
}

/// GET /api/users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .store
        .find_user(auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: USER_ENTITY,
            id: auth.user_id,
        }))?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/users/profile
///
/// Name, email and country are replaced when a non-blank value is supplied.
/// The password changes only when a new one is supplied.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let email = match provided(input.email.as_deref()) {
        Some(email) if !email.trim().to_string().validate_email() => {
            return Err(AppError::Core(CoreError::Validation(
                "Please provide a valid email".into(),
            )));
        }
        Some(email) => Some(normalize_email(email)),
        None => None,
    };

    let password_hash = match provided(input.password.as_deref()) {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LENGTH)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let changes = UpdateUser {
        name: provided(input.name.as_deref()).map(|s| s.trim().to_string()),
        email,
        country: provided(input.country.as_deref()).map(|s| s.trim().to_string()),
        password_hash,
    };

    let user = state
        .store
        .update_user(auth.user_id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: USER_ENTITY,
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a session token for `user_id` and add it to `jar` as the session cookie.
fn start_session(state: &AppState, jar: CookieJar, user_id: DbId) -> AppResult<CookieJar> {
    let token = generate_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(jar.add(session_cookie(token, &state.config.jwt)))
}
