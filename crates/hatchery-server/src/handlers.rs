//! REST endpoint handlers.
//!
//! Every handler works on the shared [`Controller`]. Workflows that reach
//! the store or the generation client run on their own task so a client
//! that disconnects mid-request cannot cancel them half way.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/state` | Full view state |
//! | `GET` | `/api/creatures/{id}` | Single creature |
//! | `POST` | `/api/generate` | Spend tokens on a new creature |
//! | `POST` | `/api/creatures/{id}/evolve` | Evolve a creature |
//! | `POST` | `/api/creatures/{id}/resell` | Open the resell confirmation |
//! | `POST` | `/api/confirmation/confirm` | Run the pending confirmation |
//! | `POST` | `/api/confirmation/cancel` | Dismiss the pending confirmation |
//! | `PUT` | `/api/sort` | Change the display ordering |
//! | `DELETE` | `/api/notice` | Dismiss the current notice |

use core::future::Future;
use core::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use hatchery_core::{AppError, Controller};
use hatchery_genai::CreatureGenerator;
use hatchery_store::CreatureStore;
use hatchery_types::{ConfirmationView, Creature, CreatureId, SortMode, ViewState};

use crate::error::ApiError;

/// Shared handler state.
pub type SharedController<S, G> = Arc<Controller<S, G>>;

/// Body of `PUT /api/sort`.
#[derive(Debug, serde::Deserialize)]
pub struct SortRequest {
    /// One of the kebab-case sort mode labels, e.g. `rarity-desc`.
    pub mode: String,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Everything the page needs to render.
pub async fn get_state<S: CreatureStore, G: CreatureGenerator>(
    State(controller): State<SharedController<S, G>>,
) -> Json<ViewState> {
    Json(controller.view().await)
}

/// A single creature by id.
pub async fn get_creature<S: CreatureStore, G: CreatureGenerator>(
    State(controller): State<SharedController<S, G>>,
    Path(id): Path<String>,
) -> Result<Json<Creature>, ApiError> {
    let id = parse_id(&id)?;
    controller
        .creature(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("creature {id} not found")))
}

// ---------------------------------------------------------------------------
// Workflows
// ---------------------------------------------------------------------------

/// Spend tokens on a new creature.
pub async fn generate<S: CreatureStore, G: CreatureGenerator>(
    State(controller): State<SharedController<S, G>>,
) -> Result<(StatusCode, Json<Creature>), ApiError> {
    let creature = run_detached(&controller, |c| async move { c.generate().await }).await?;
    Ok((StatusCode::CREATED, Json(creature)))
}

/// Evolve a creature.
pub async fn evolve<S: CreatureStore, G: CreatureGenerator>(
    State(controller): State<SharedController<S, G>>,
    Path(id): Path<String>,
) -> Result<Json<Creature>, ApiError> {
    let id = parse_id(&id)?;
    let creature = run_detached(&controller, move |c| async move { c.evolve(id).await }).await?;
    Ok(Json(creature))
}

/// Open the resell confirmation for a creature.
pub async fn request_resell<S: CreatureStore, G: CreatureGenerator>(
    State(controller): State<SharedController<S, G>>,
    Path(id): Path<String>,
) -> Result<Json<ConfirmationView>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(controller.request_resell(id).await?))
}

/// Run the pending confirmation and return the resulting state.
pub async fn confirm<S: CreatureStore, G: CreatureGenerator>(
    State(controller): State<SharedController<S, G>>,
) -> Result<Json<ViewState>, ApiError> {
    run_detached(&controller, |c| async move { c.confirm().await }).await?;
    Ok(Json(controller.view().await))
}

/// Dismiss the pending confirmation.
pub async fn cancel<S: CreatureStore, G: CreatureGenerator>(
    State(controller): State<SharedController<S, G>>,
) -> Result<Json<ViewState>, ApiError> {
    controller.cancel().await?;
    Ok(Json(controller.view().await))
}

/// Change the display ordering.
pub async fn set_sort<S: CreatureStore, G: CreatureGenerator>(
    State(controller): State<SharedController<S, G>>,
    Json(request): Json<SortRequest>,
) -> Result<Json<ViewState>, ApiError> {
    let mode = SortMode::from_str(&request.mode)
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    controller.set_sort_mode(mode).await;
    Ok(Json(controller.view().await))
}

/// Dismiss the current notice.
pub async fn dismiss_notice<S: CreatureStore, G: CreatureGenerator>(
    State(controller): State<SharedController<S, G>>,
) -> StatusCode {
    controller.dismiss_notice().await;
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_id(raw: &str) -> Result<CreatureId, ApiError> {
    CreatureId::from_str(raw).map_err(|e| ApiError::InvalidUuid(format!("{raw}: {e}")))
}

/// Run a workflow on its own task and wait for it.
async fn run_detached<S, G, T, F, Fut>(
    controller: &SharedController<S, G>,
    workflow: F,
) -> Result<T, ApiError>
where
    S: CreatureStore,
    G: CreatureGenerator,
    F: FnOnce(SharedController<S, G>) -> Fut,
    Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::spawn(workflow(Arc::clone(controller)));
    task.await
        .map_err(|e| ApiError::Internal(format!("workflow task failed: {e}")))?
        .map_err(ApiError::from)
}
