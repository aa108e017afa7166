use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::auth::{
    LoginRequest, LoginResponse, RegisterUserRequest, RegisteredUserResponse,
};

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<RegisteredUserResponse>)> {
    req.validate(&())?;

    registry
        .user_repository()
        .create(req.into())
        .await
        .map(|user| (StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    req.validate(&())?;

    let user = registry
        .user_repository()
        .verify_credentials(&req.email, &req.password)
        .await?;
    let access_token = registry.token_codec().issue(user.id.raw(), &user.email)?;

    Ok(Json(LoginResponse {
        access_token,
        user_id: user.id,
        tier: user.tier.into(),
    }))
}
