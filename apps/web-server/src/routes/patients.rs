//! Patient management handlers.

use axum::extract::State;
use axum::response::{Html, Response};
use axum::{Extension, Form};
use entities::SessionUser;
use record_store::RecordStore;
use serde::Deserialize;

use crate::error::AppResult;
use crate::routes::{redirect, render_form};
use crate::state::SharedState;
use crate::views::page_context;

/// New patient form fields.
#[derive(Debug, Deserialize)]
pub struct NewPatientForm {
    /// Patient name (required).
    #[serde(default)]
    pub name: String,

    /// Free-text date of birth.
    #[serde(default)]
    pub date_of_birth: String,

    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

/// Renders the dashboard with the session tenant's patients.
pub async fn dashboard<S: RecordStore>(
    State(state): State<SharedState<S>>,
    Extension(session): Extension<SessionUser>,
) -> AppResult<Html<String>> {
    let patients = state.store.list_patients(session.tenant_id).await?;

    let mut context = page_context(Some(&session), None);
    context.insert("patients", &patients);

    Ok(Html(state.views.render("dashboard.html", &context)?))
}

/// Renders the new-patient form.
pub async fn new_patient_form<S: RecordStore>(
    State(state): State<SharedState<S>>,
    Extension(session): Extension<SessionUser>,
) -> AppResult<Html<String>> {
    let html = state
        .views
        .render("new_patient.html", &page_context(Some(&session), None))?;
    Ok(Html(html))
}

/// Creates a patient scoped to the session's tenant.
pub async fn create_patient<S: RecordStore>(
    State(state): State<SharedState<S>>,
    Extension(session): Extension<SessionUser>,
    Form(form): Form<NewPatientForm>,
) -> AppResult<Response> {
    let name = form.name.trim();
    if name.is_empty() {
        return render_form(
            state.as_ref(),
            "new_patient.html",
            Some(&session),
            "Name is required.",
        );
    }

    let patient_id = state
        .store
        .create_patient(session.tenant_id, name, &form.date_of_birth, &form.notes)
        .await?;

    tracing::info!(patient_id, tenant_id = session.tenant_id, "Patient created");

    Ok(redirect("/dashboard"))
}
