use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{RegisterRequest, UserResponse};
use crate::dto::ErrorResponse;
use crate::handlers::error::handle_domain_error;

use tm_core::repositories::{RevocationLedger, UserRepository};

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates a new account. Responds 201 with the public profile, 400 when
/// the username or email is already taken or the input is invalid.
pub async fn register<U, L>(
    state: web::Data<AppState<U, L>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(errors.to_string()));
    }

    let result = state
        .auth_service
        .register(
            &request.username,
            request.email.as_deref(),
            &request.password,
        )
        .await;

    match result {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(&error),
    }
}
