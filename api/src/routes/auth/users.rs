//! Account management routes under `/api/v1/auth/users`, all behind the
//! JWT middleware.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{ChangePasswordRequest, UpdateProfileRequest, UserResponse};
use crate::dto::ErrorResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use tm_core::repositories::{RevocationLedger, UserRepository};

use super::AppState;

/// Handler for GET /api/v1/auth/users/me
pub async fn profile<U, L>(
    state: web::Data<AppState<U, L>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
{
    match state.auth_service.profile(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/v1/auth/users/me
///
/// Updates username and/or email; omitted fields keep their value.
pub async fn update_profile<U, L>(
    state: web::Data<AppState<U, L>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
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
        .update_profile(
            auth.user_id,
            request.username.as_deref(),
            request.email.as_deref(),
        )
        .await;

    match result {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/auth/users/me/change-password
pub async fn change_password<U, L>(
    state: web::Data<AppState<U, L>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
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
        .change_password(auth.user_id, &request.current_password, &request.new_password)
        .await;

    match result {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Password updated successfully"
        })),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for DELETE /api/v1/auth/users/me
///
/// Soft-deletes the account. Outstanding tokens keep verifying until they
/// expire or are revoked; only new logins are blocked.
pub async fn deactivate<U, L>(
    state: web::Data<AppState<U, L>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
{
    match state.auth_service.deactivate(auth.user_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(&error),
    }
}
