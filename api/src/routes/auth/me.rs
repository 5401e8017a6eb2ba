use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::UserResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /api/auth/me
///
/// Requires the [`JwtAuth`](crate::middleware::JwtAuth) middleware.
pub async fn me(
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = state.auth_service.current_user(&auth.claims).await?;
    Ok(HttpResponse::Ok().json(UserResponse { user }))
}
