use actix_web::{web, HttpResponse};
use tracing::warn;

use tm_core::repositories::{RevocationLedger, UserRepository};

use super::AppState;

/// Handler for GET /api/v1/auth/health
///
/// Reports service liveness plus the current revocation ledger size. The
/// ledger count is best-effort; a store outage degrades it to null rather
/// than failing the health check.
pub async fn health<U, L>(state: web::Data<AppState<U, L>>) -> HttpResponse
where
    U: UserRepository + 'static,
    L: RevocationLedger + 'static,
{
    let revoked_tokens = match state
        .auth_service
        .token_service()
        .revoked_token_count()
        .await
    {
        Ok(count) => Some(count),
        Err(e) => {
            warn!("revocation ledger unreachable for health check: {}", e);
            None
        }
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "textmill-auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "revoked_tokens": revoked_tokens,
    }))
}
