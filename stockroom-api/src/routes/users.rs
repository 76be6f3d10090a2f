/// User listing endpoint
///
/// `GET /api/users` returns every user as a bare JSON array.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use stockroom_shared::{models::user::User, services::auth};

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = auth::list_users(state.store.as_ref()).await?;
    Ok(Json(users))
}
