use actix_web::{web, HttpResponse};
use validator::Validate;

use tk_core::errors::ValidationError;

use crate::app::AppState;
use crate::dto::RegisterRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/auth/register
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ada",
///     "email": "ada@example.com",
///     "password": "secret",
///     "password_confirmation": "secret"
/// }
/// ```
///
/// `password_confirmation` is optional; when present it must match.
///
/// # Response
///
/// ## Success (200 OK)
/// Same body as login: `{ "user": {…}, "token": "…" }`
///
/// ## Errors
/// - 400 Bad Request: Missing fields, malformed email or mismatched confirmation
/// - 409 Conflict: Email already in use
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate().map_err(|e| ValidationError::InvalidBody {
        message: e.to_string(),
    })?;

    let response = state.auth_service.register(request.into()).await?;
    Ok(HttpResponse::Ok().json(response))
}
