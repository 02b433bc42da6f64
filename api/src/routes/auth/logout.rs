use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::{handle_domain_error, unauthorized_response, MISSING_CREDENTIALS_DETAIL};
use crate::middleware::auth::extract_bearer_token;

use tm_core::repositories::{RevocationLedger, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Blacklists the presented token so it is rejected for the rest of its
/// lifetime. The token does not have to verify: an already-expired token
/// still logs out cleanly, it just needs no blacklist entry.
pub async fn logout<U, L>(
    req: HttpRequest,
    state: web::Data<AppState<U, L>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
{
    let token = match extract_bearer_token(&req) {
        Some(token) => token,
        None => return unauthorized_response(MISSING_CREDENTIALS_DETAIL),
    };

    match state.auth_service.logout(&token).await {
        Ok(true) => HttpResponse::Ok().json(LogoutResponse {
            message: "Successfully logged out".to_string(),
        }),
        // The session still ends; the token just outlives it until expiry.
        Ok(false) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out, but the token could not be revoked".to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
