//! Session middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use entities::SessionUser;
use record_store::RecordStore;

use crate::error::AppError;
use crate::session::SESSION_COOKIE;
use crate::state::{AppState, SharedState};

/// Resolves the session cookie against the registry.
///
/// Used directly by the public pages, which render differently for
/// logged-in users but never require a session.
pub fn current_session<S: RecordStore>(state: &AppState<S>, jar: &CookieJar) -> Option<SessionUser> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.lookup(cookie.value()))
}

/// Session middleware for the protected routes.
///
/// Looks up the `session_id` cookie and stores the identity snapshot in the
/// request extensions. Requests without a valid session are redirected to
/// the login form, never answered with an error page.
pub async fn require_session<S: RecordStore + 'static>(
    State(state): State<SharedState<S>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match current_session(state.as_ref(), &jar) {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => AppError::Unauthorized.into_response(),
    }
}
