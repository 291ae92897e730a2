//! Conversational agent provisioning handlers.
//!
//! The caller's fields are forwarded to the voice vendor without validation;
//! the dashboard page is what requires them.

use crate::{
    api::{parse_json_body, ApiError},
    AppState,
};
use aegis_types::{non_empty, AgentConfig, AgentQuery};
use axum::{
    body::Bytes,
    extract::{Extension, Query},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

/// Handler for `POST /api/agent`.
pub async fn create_agent_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    create_agent(&state, &body)
        .await
        .inspect_err(|e| e.log("POST /api/agent"))
}

async fn create_agent(state: &AppState, body: &Bytes) -> Result<Json<Value>, ApiError> {
    let agent: AgentConfig = parse_json_body(body)?;
    let voice = state.voice()?;

    let record = voice.create_agent(&agent).await?;
    tracing::info!("provisioned medical translation agent");
    Ok(Json(record))
}

/// Handler for `GET /api/agent?agentId=...`.
pub async fn get_agent_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<AgentQuery>,
) -> Result<Json<Value>, ApiError> {
    get_agent(&state, &query)
        .await
        .inspect_err(|e| e.log("GET /api/agent"))
}

async fn get_agent(state: &AppState, query: &AgentQuery) -> Result<Json<Value>, ApiError> {
    let agent_id = non_empty(query.agent_id.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Agent ID is required".to_string()))?;
    let voice = state.voice()?;

    Ok(Json(voice.get_agent(agent_id).await?))
}
