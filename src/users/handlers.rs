use axum::{extract::State, routing::post, Json, Router};
use tracing::{error, instrument};

use crate::{
    error::ApiError,
    extract::ValidatedJson,
    state::AppState,
    users::{
        dto::{RegisterRequest, RegisteredUser, Registration},
        services::{register_user, RegisterError},
    },
};

pub const EMAIL_TAKEN: &str = "Email already registered.";

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users/register", post(register))
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::EmailTaken => ApiError::Conflict(EMAIL_TAKEN),
            other => {
                error!(error = %other, "registration failed");
                ApiError::Internal
            }
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<Json<RegisteredUser>, ApiError> {
    let user = register_user(state.users.as_ref(), Registration::from(payload)).await?;
    Ok(Json(RegisteredUser::from(user)))
}
