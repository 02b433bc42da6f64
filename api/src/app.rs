//! Route wiring.
//!
//! Handlers are generic over the repository and ledger implementations,
//! so tests can mount the same routes over in-memory fakes.

use actix_web::web;

use tm_core::repositories::{RevocationLedger, UserRepository};

use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{health, login, logout, register, users};

/// Mount the auth routes under `/api/v1/auth`.
///
/// Expects `web::Data<AppState<U, L>>` and `web::Data<Arc<dyn TokenVerifier>>`
/// to be registered on the app.
pub fn configure_routes<U, L>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
{
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/health", web::get().to(health::health::<U, L>))
            .route("/register", web::post().to(register::register::<U, L>))
            .route("/token", web::post().to(login::login::<U, L>))
            .route("/logout", web::post().to(logout::logout::<U, L>))
            .service(
                web::scope("/users")
                    .wrap(JwtAuth::new())
                    .route("/me", web::get().to(users::profile::<U, L>))
                    .route("/me", web::put().to(users::update_profile::<U, L>))
                    .route("/me", web::delete().to(users::deactivate::<U, L>))
                    .route(
                        "/me/change-password",
                        web::post().to(users::change_password::<U, L>),
                    ),
            ),
    );
}
