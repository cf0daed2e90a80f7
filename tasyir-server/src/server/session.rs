use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};

use tasyir_core::Tasyir;
use tasyir_types::user::UserValues;

use super::{auth::AuthenticatedUser, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserValues,
}

pub async fn login(
    State(app): State<Tasyir>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let (session, user) = app.login(&req.username, &req.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            token: session.token,
            user: user.into_values(),
        }),
    ))
}

pub async fn logout(
    State(app): State<Tasyir>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    app.logout(&user.token).await?;
    Ok(Json(serde_json::json!({ "loggedOut": true })))
}

pub async fn me(
    State(app): State<Tasyir>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserValues>, ApiError> {
    let user = app.users().find_by_id(user.user_id).await?;
    Ok(Json(user.into_values()))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InactivityTimeoutBody {
    pub inactivity_timeout_secs: u32,
}

pub async fn get_inactivity_timeout(
    State(app): State<Tasyir>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<InactivityTimeoutBody>, ApiError> {
    let user = app.users().find_by_id(user.user_id).await?;
    Ok(Json(InactivityTimeoutBody {
        inactivity_timeout_secs: user.inactivity_timeout_secs(),
    }))
}

pub async fn set_inactivity_timeout(
    State(app): State<Tasyir>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<InactivityTimeoutBody>,
) -> Result<Json<InactivityTimeoutBody>, ApiError> {
    let user = app
        .set_inactivity_timeout(user.user_id, body.inactivity_timeout_secs)
        .await?;
    Ok(Json(InactivityTimeoutBody {
        inactivity_timeout_secs: user.inactivity_timeout_secs(),
    }))
}
