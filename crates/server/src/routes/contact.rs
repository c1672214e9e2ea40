use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use service::contact::{Contact, ContactSubmission};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Serialize)]
pub struct SubmitOutput {
    pub success: bool,
    pub message: &'static str,
    pub id: Uuid,
}

#[derive(Serialize)]
pub struct ListOutput {
    pub success: bool,
    pub contacts: Vec<Contact>,
}

/// POST /api/contact
pub async fn submit(
    State(state): State<ServerState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<SubmitOutput>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let receipt = state.contacts.submit(input).await?;
    Ok(Json(SubmitOutput { success: true, message: "Message sent successfully", id: receipt.id }))
}

/// GET /api/contacts, newest first
pub async fn list(State(state): State<ServerState>) -> Result<Json<ListOutput>, ApiError> {
    let contacts = state.contacts.list_contacts().await?;
    Ok(Json(ListOutput { success: true, contacts }))
}
