use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::MessageResponse;

/// Handler for POST /api/auth/logout
///
/// Credentials are stateless, so nothing is revoked; the client discards its
/// copy. Always answers 200.
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new(state.auth_service.logout()))
}
