//! Auth Handlers

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{Json, extract::State};

use shared::models::{LoginRequest, LoginResponse, Role, UserCreate};

use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResponse, AppResult, ok};

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hash failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let phone = payload.phone.trim();
    if phone.len() != 11 || !phone.starts_with("01") || !phone.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AppError::Validation(
            "Phone must be an 11-digit mobile number".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if user::find_by_phone(state.pool(), phone).await?.is_some() {
        return Err(AppError::Conflict("Phone already registered".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let created = user::create(
        state.pool(),
        payload.name.trim(),
        phone,
        payload.email.as_deref(),
        &password_hash,
        Role::User,
    )
    .await?;

    let token = state
        .jwt_service
        .generate_token(&created)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))?;

    Ok(ok(LoginResponse {
        token,
        user_id: created.id,
        name: created.name,
        role: created.role,
    }))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    // One unified failure message to prevent phone enumeration
    let invalid = || AppError::Validation("Invalid phone or password".to_string());

    let account = user::find_by_phone(state.pool(), payload.phone.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&payload.password, &account.password_hash) {
        return Err(invalid());
    }

    let token = state
        .jwt_service
        .generate_token(&account)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = account.id, "User logged in");

    Ok(ok(LoginResponse {
        token,
        user_id: account.id,
        name: account.name,
        role: account.role,
    }))
}
