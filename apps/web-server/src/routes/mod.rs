//! HTTP route table and handlers.

pub mod auth;
pub mod pages;
pub mod patients;

use axum::http::{header, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use entities::SessionUser;
use record_store::RecordStore;
use tower_http::services::ServeDir;

use crate::error::{AppError, AppResult};
use crate::middleware::require_session;
use crate::state::{AppState, SharedState};
use crate::views::page_context;

/// Creates the application router with all routes configured.
pub fn create_router<S: RecordStore + 'static>(state: SharedState<S>) -> Router {
    let protected: Router<SharedState<S>> = Router::new()
        .route("/dashboard", get(patients::dashboard))
        .route(
            "/patients/new",
            get(patients::new_patient_form).post(patients::create_patient),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session::<S>));

    let router: Router<SharedState<S>> = Router::new()
        .route("/", get(pages::index))
        .route(
            "/register-tenant",
            get(pages::register_tenant_form).post(auth::register_tenant),
        )
        .route("/login", get(pages::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .merge(protected);

    router
        .nest_service("/public", ServeDir::new(&state.config.public_dir))
        .fallback(not_found)
        .with_state(state)
}

/// Fallback for unmatched routes.
async fn not_found() -> AppError {
    AppError::NotFound
}

/// Builds a 302 redirect to `location`.
pub(crate) fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Re-renders a form view with an error message, HTTP 200.
pub(crate) fn render_form<S: RecordStore>(
    state: &AppState<S>,
    view: &str,
    user: Option<&SessionUser>,
    error: &str,
) -> AppResult<Response> {
    let html = state.views.render(view, &page_context(user, Some(error)))?;
    Ok(Html(html).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_is_a_302_with_location() {
        let response = redirect("/dashboard");

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard"
        );
    }
}
