use actix_web::{web, HttpResponse};

use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

use tm_core::repositories::{RevocationLedger, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/token
///
/// Exchanges a username and password, posted as a urlencoded form, for a
/// bearer access token. Unknown usernames and wrong passwords produce the
/// same 401.
pub async fn login<U, L>(
    state: web::Data<AppState<U, L>>,
    form: web::Form<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
{
    match state.auth_service.login(&form.username, &form.password).await {
        Ok(result) => {
            let expires_in = result.token.expires_in();
            HttpResponse::Ok().json(TokenResponse {
                access_token: result.token.token,
                token_type: "bearer".to_string(),
                expires_in,
                user_id: result.user_id,
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
