use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use yatra_core::crypto;
use yatra_core::identity::{is_valid_email, normalize_email};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Debug, Deserialize)]
struct RegisterOtpRequest {
    email: String,
    password: String,
    confirm_password: String,
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    email: String,
    password: String,
    confirm_password: String,
    otp: String,
}

#[derive(Debug, Deserialize)]
struct LoginOtpRequest {
    email: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    otp: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register/otp", post(register_otp))
        .route("/auth/register", post(register))
        .route("/auth/login/otp", post(login_otp))
        .route("/auth/login", post(login))
}

/// Step one of registration: validate the form, then mail an OTP
async fn register_otp(
    State(state): State<AppState>,
    Json(req): Json<RegisterOtpRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = normalize_email(&req.email);
    validate_registration(&state, &email, &req.password, &req.confirm_password).await?;

    state.otp.lock().await.issue(&email, state.mailer.as_ref()).await?;
    Ok(Json(MessageResponse {
        message: "OTP sent to your email address.".to_string(),
    }))
}

/// Step two: verify the OTP and create the account
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = normalize_email(&req.email);
    validate_registration(&state, &email, &req.password, &req.confirm_password).await?;

    if !state.otp.lock().await.verify(&email, &req.otp) {
        return Err(AppError::AuthenticationError(
            "Invalid or expired OTP. Please request a new one.".to_string(),
        ));
    }

    let password_hash = crypto::hash_password(&req.password)
        .map_err(|err| AppError::InternalServerError(format!("Password hashing failed: {err}")))?;
    state.service.register_account(&email, &password_hash).await?;

    Ok(Json(MessageResponse {
        message: "Registration successful! Please log in.".to_string(),
    }))
}

async fn login_otp(
    State(state): State<AppState>,
    Json(req): Json<LoginOtpRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = normalize_email(&req.email);
    if !state.service.account_exists(&email).await {
        return Err(AppError::NotFoundError(
            "No account found for this email. Please register first.".to_string(),
        ));
    }

    state.otp.lock().await.issue(&email, state.mailer.as_ref()).await?;
    Ok(Json(MessageResponse {
        message: "OTP sent to your email address.".to_string(),
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&req.email);
    if !state.service.account_exists(&email).await {
        return Err(AppError::NotFoundError(
            "No account found for this email. Please register first.".to_string(),
        ));
    }
    if !state.otp.lock().await.verify(&email, &req.otp) {
        return Err(AppError::AuthenticationError(
            "Invalid or expired OTP. Please request a new one.".to_string(),
        ));
    }

    let claims = Claims {
        sub: email,
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|err| AppError::InternalServerError(format!("Token encoding failed: {err}")))?;

    Ok(Json(AuthResponse { token }))
}

async fn validate_registration(
    state: &AppState,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), AppError> {
    if !is_valid_email(email) {
        return Err(AppError::ValidationError("Invalid email address.".to_string()));
    }
    if state.service.account_exists(email).await {
        return Err(AppError::ConflictError(
            "Account already exists. Please log in.".to_string(),
        ));
    }
    if password != confirm_password {
        return Err(AppError::ValidationError("Passwords do not match.".to_string()));
    }
    if password.len() < 6 {
        return Err(AppError::ValidationError(
            "Password must be at least 6 characters.".to_string(),
        ));
    }
    Ok(())
}

/// Decode the bearer token into customer claims
pub fn decode_bearer(state: &AppState, token: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|err| AppError::AuthenticationError(err.to_string()))?;

    Ok(token_data.claims)
}
