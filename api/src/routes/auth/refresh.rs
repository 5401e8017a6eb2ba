use actix_web::{web, HttpRequest, HttpResponse};

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::extract_bearer_token;

/// Handler for POST /api/auth/refresh
///
/// Exchanges the bearer credential for a fresh one carrying the account's
/// current name and email.
///
/// ## Errors
/// - 401 Unauthorized: Missing or malformed Authorization header
/// - 401 Unauthorized: "Token is invalid or expired" for any other failure
pub async fn refresh(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let token = extract_bearer_token(req.headers())?;

    let response = state.auth_service.refresh(token).await?;
    Ok(HttpResponse::Ok().json(response))
}
