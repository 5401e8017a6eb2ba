use actix_web::{web, HttpResponse};
use validator::Validate;

use tk_core::errors::ValidationError;

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/auth/login
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "password": "secret" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "user": { "id": "…", "name": "Ada", "email": "ada@example.com", "created_at": "…" },
///     "token": "eyJ…"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Email or password missing
/// - 401 Unauthorized: Invalid credentials
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate().map_err(|e| ValidationError::InvalidBody {
        message: e.to_string(),
    })?;

    let response = state.auth_service.login(request.into()).await?;
    Ok(HttpResponse::Ok().json(response))
}
