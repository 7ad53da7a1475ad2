//! HTTP front-end.
//!
//! - GET  /.well-known/agent.json - agent card
//! - POST /a2a                    - JSON-RPC task endpoint
//! - GET  /health                 - liveness + credential status
//!
//! `/a2a` always answers HTTP 200; failures live in the envelope's `error`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use a2a_protocol::{
    AgentCard, JsonRpcRequest, JsonRpcResponse, Task, TaskIdParams, TaskSendParams,
    INTERNAL_ERROR, METHOD_TASKS_CANCEL, METHOD_TASKS_GET, METHOD_TASKS_SEND,
};

use crate::card::agent_card;
use crate::config::{AgentConfig, AGENT_NAME};
use crate::serpapi::{SerpApiClient, SerpApiError};
use crate::skills::HotelSkills;
use crate::task_store::TaskStore;

/// Shared handler state.
#[derive(Debug)]
pub struct AppState {
    pub card: AgentCard,
    pub skills: HotelSkills,
    pub tasks: TaskStore,
}

impl AppState {
    pub fn from_config(config: &AgentConfig) -> Result<Self, SerpApiError> {
        let client = SerpApiClient::new(
            config.serpapi_base_url.clone(),
            config.serpapi_api_key.clone(),
        )?;

        Ok(Self {
            card: agent_card(config),
            skills: HotelSkills::new(client),
            tasks: TaskStore::new(),
        })
    }
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    agent: &'static str,
    serpapi_configured: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/.well-known/agent.json", get(get_agent_card))
        .route("/a2a", post(handle_a2a))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_agent_card(State(state): State<Arc<AppState>>) -> Json<AgentCard> {
    Json(state.card.clone())
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        agent: AGENT_NAME,
        serpapi_configured: state.skills.is_configured(),
    })
}

/// The body is taken raw so that malformed JSON still gets a JSON-RPC
/// parse error rather than an extractor rejection.
async fn handle_a2a(State(state): State<Arc<AppState>>, body: Bytes) -> Json<JsonRpcResponse> {
    tracing::info!("A2A REQUEST RECEIVED");

    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Failed to parse A2A request: {}", e);
            return Json(JsonRpcResponse::parse_error(e));
        }
    };

    Json(dispatch(&state, request).await)
}

/// Routes one decoded JSON-RPC request by method name.
pub async fn dispatch(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    tracing::info!("A2A Method: {}", request.method);
    tracing::info!("A2A Request ID: {}", request.id);

    match request.method.as_str() {
        METHOD_TASKS_SEND => send_task(state, request).await,
        METHOD_TASKS_GET => get_task(state, request).await,
        METHOD_TASKS_CANCEL => cancel_task(state, request).await,
        other => {
            tracing::warn!("Unknown A2A method: {}", other);
            JsonRpcResponse::method_not_found(request.id.clone(), other)
        }
    }
}

async fn send_task(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let params: TaskSendParams = match request.params_as() {
        Ok(params) => params,
        Err(e) => return JsonRpcResponse::invalid_params(request.id, e),
    };

    let input = params.message.data_payload();
    tracing::info!("Skill ID: {}", params.skill_id);
    tracing::debug!("Task params: {}", input);

    let task_id = uuid::Uuid::new_v4().to_string();
    tracing::info!("Created task ID: {}", task_id);

    let result = state.skills.execute(&params.skill_id, input).await;
    tracing::debug!(
        "Task result success: {}, hotel count: {}",
        result.get("success").unwrap_or(&serde_json::Value::Null),
        result.get("hotelCount").unwrap_or(&serde_json::Value::Null)
    );

    let task = Task::completed(task_id, result);
    state.tasks.insert(task.clone()).await;
    tracing::info!("Task {} completed, returning response", task.id);

    task_response(request.id, &task)
}

async fn get_task(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let Some(task_id) = task_id(&request) else {
        return JsonRpcResponse::task_not_found(request.id);
    };
    tracing::info!("tasks/get for task_id: {}", task_id);

    match state.tasks.get(&task_id).await {
        Some(task) => task_response(request.id, &task),
        None => {
            tracing::warn!("Task not found: {}", task_id);
            JsonRpcResponse::task_not_found(request.id)
        }
    }
}

async fn cancel_task(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let Some(task_id) = task_id(&request) else {
        return JsonRpcResponse::task_not_found(request.id);
    };
    tracing::info!("tasks/cancel for task_id: {}", task_id);

    match state.tasks.cancel(&task_id).await {
        Some(task) => task_response(request.id, &task),
        None => {
            tracing::warn!("Task not found: {}", task_id);
            JsonRpcResponse::task_not_found(request.id)
        }
    }
}

/// Task id from get/cancel params; a missing or non-string id is a lookup miss.
fn task_id(request: &JsonRpcRequest) -> Option<String> {
    request
        .params_as::<TaskIdParams>()
        .ok()
        .and_then(|params| params.id)
}

fn task_response(id: Value, task: &Task) -> JsonRpcResponse {
    match serde_json::to_value(task) {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Internal error: {}", e)),
    }
}
