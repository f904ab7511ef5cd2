//! Registration, login and logout handlers.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use entities::SessionUser;
use record_store::{RecordStore, RecordStoreError};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::current_session;
use crate::routes::{redirect, render_form};
use crate::session::SESSION_COOKIE;
use crate::state::SharedState;

/// Tenant registration form fields.
#[derive(Debug, Deserialize)]
pub struct RegisterTenantForm {
    /// Organisation name.
    #[serde(rename = "tenantName", default)]
    pub tenant_name: String,

    /// Display name of the first admin user.
    #[serde(rename = "adminName", default)]
    pub admin_name: String,

    /// Email of the first admin user.
    #[serde(rename = "adminEmail", default)]
    pub admin_email: String,

    /// Password of the first admin user.
    #[serde(rename = "adminPassword", default)]
    pub admin_password: String,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Organisation name.
    #[serde(rename = "tenantName", default)]
    pub tenant_name: String,

    /// Email address.
    #[serde(default)]
    pub email: String,

    /// Password.
    #[serde(default)]
    pub password: String,
}

/// Builds the session cookie sent on login and registration.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token)).path("/").build()
}

/// Registers a new tenant with its first admin user and logs the admin in.
pub async fn register_tenant<S: RecordStore>(
    State(state): State<SharedState<S>>,
    jar: CookieJar,
    Form(form): Form<RegisterTenantForm>,
) -> AppResult<Response> {
    let tenant_name = form.tenant_name.trim();
    let admin_name = form.admin_name.trim();
    let admin_email = form.admin_email.trim();
    // The password is taken as submitted, whitespace included.
    let admin_password = form.admin_password.as_str();

    if tenant_name.is_empty()
        || admin_name.is_empty()
        || admin_email.is_empty()
        || admin_password.is_empty()
    {
        return render_form(
            state.as_ref(),
            "register_tenant.html",
            None,
            "All fields are required.",
        );
    }

    let (tenant_id, user_id) = match state
        .store
        .register_tenant(tenant_name, admin_name, admin_email, admin_password)
        .await
    {
        Ok(ids) => ids,
        Err(RecordStoreError::DuplicateName(_)) => {
            return render_form(
                state.as_ref(),
                "register_tenant.html",
                None,
                "Organisation name already exists.",
            );
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(tenant_id, user_id, "Tenant registered");

    let token = state.sessions.create(SessionUser {
        user_id,
        user_name: admin_name.to_string(),
        tenant_id,
        tenant_name: tenant_name.to_string(),
    });

    Ok((jar.add(session_cookie(token)), redirect("/dashboard")).into_response())
}

/// Authenticates a user against (tenant name, email, password).
pub async fn login<S: RecordStore>(
    State(state): State<SharedState<S>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let tenant_name = form.tenant_name.trim();
    let email = form.email.trim();
    let password = form.password.as_str();

    if tenant_name.is_empty() || email.is_empty() || password.is_empty() {
        return render_form(state.as_ref(), "login.html", None, "All fields are required.");
    }

    let Some(tenant) = state.store.find_tenant_by_name(tenant_name).await? else {
        return render_form(state.as_ref(), "login.html", None, "Organisation not found.");
    };

    // One message for both an unknown email and a wrong password, so the
    // response does not leak which field was wrong.
    let user = state.store.find_user(tenant.id, email).await?;
    let Some(user) = user.filter(|u| u.password == password) else {
        return render_form(state.as_ref(), "login.html", None, "Invalid credentials.");
    };

    tracing::info!(user_id = user.id, tenant_id = tenant.id, "User logged in");

    let token = state.sessions.create(SessionUser {
        user_id: user.id,
        user_name: user.name,
        tenant_id: tenant.id,
        tenant_name: tenant.name,
    });

    Ok((jar.add(session_cookie(token)), redirect("/dashboard")).into_response())
}

/// Destroys every session of the current user and expires the cookie.
pub async fn logout<S: RecordStore>(
    State(state): State<SharedState<S>>,
    jar: CookieJar,
) -> Response {
    if let Some(session) = current_session(state.as_ref(), &jar) {
        state.sessions.destroy_by_user(session.user_id);
        tracing::info!(user_id = session.user_id, "User logged out");
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    (jar, redirect("/")).into_response()
}
