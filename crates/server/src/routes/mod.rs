//! HTTP routes

pub mod health;
pub mod metrics;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::Serialize;

use crate::AppState;
use crate::actions::{self, ACTION_NAMES, ActionCall, ActionResponse};
use crate::error::AppError;

/// Build the action webhook routes
pub fn action_routes() -> Router<AppState> {
    Router::new()
        .route("/webhook", post(webhook))
        .route("/actions", get(list_actions))
}

/// POST /webhook - Run the requested action against the posted tracker
async fn webhook(
    State(state): State<AppState>,
    payload: Result<Json<ActionCall>, JsonRejection>,
) -> Result<Json<ActionResponse>, AppError> {
    let Json(call) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let sender = call
        .sender_id
        .as_deref()
        .or(call.tracker.sender_id.as_deref())
        .unwrap_or("unknown");

    let result = actions::run(&state, &call.next_action, &call.tracker).await;
    let outcome = if result.is_ok() { "ok" } else { "error" };

    tracing::info!(
        target: "audit",
        action = %call.next_action,
        sender = %sender,
        outcome,
        "Action invoked"
    );
    let action = ACTION_NAMES
        .iter()
        .find(|name| **name == call.next_action)
        .copied()
        .unwrap_or("unknown");
    ::metrics::counter!(
        "actions_total",
        "action" => action,
        "outcome" => outcome
    )
    .increment(1);

    result.map(Json)
}

#[derive(Serialize)]
struct ActionList {
    actions: Vec<&'static str>,
}

/// GET /actions - Names of the actions this server can run
async fn list_actions() -> Json<ActionList> {
    Json(ActionList {
        actions: ACTION_NAMES.to_vec(),
    })
}
