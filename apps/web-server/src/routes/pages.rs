//! Public page handlers.

use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::CookieJar;
use record_store::RecordStore;

use crate::error::AppResult;
use crate::middleware::current_session;
use crate::state::SharedState;
use crate::views::page_context;

/// Renders the landing view.
pub async fn index<S: RecordStore>(
    State(state): State<SharedState<S>>,
    jar: CookieJar,
) -> AppResult<Html<String>> {
    let session = current_session(state.as_ref(), &jar);
    let html = state
        .views
        .render("index.html", &page_context(session.as_ref(), None))?;
    Ok(Html(html))
}

/// Renders the tenant registration form.
pub async fn register_tenant_form<S: RecordStore>(
    State(state): State<SharedState<S>>,
    jar: CookieJar,
) -> AppResult<Html<String>> {
    let session = current_session(state.as_ref(), &jar);
    let html = state
        .views
        .render("register_tenant.html", &page_context(session.as_ref(), None))?;
    Ok(Html(html))
}

/// Renders the login form.
pub async fn login_form<S: RecordStore>(
    State(state): State<SharedState<S>>,
    jar: CookieJar,
) -> AppResult<Html<String>> {
    let session = current_session(state.as_ref(), &jar);
    let html = state
        .views
        .render("login.html", &page_context(session.as_ref(), None))?;
    Ok(Html(html))
}
