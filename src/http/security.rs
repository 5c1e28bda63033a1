//! Supply-chain security routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::http::error::AppError;
use crate::http::request::JsonPayload;
use crate::http::pages::NOT_FOUND_TITLE;
use crate::http::server::AppState;
use crate::supply_chain::plugin::PluginManifest;
use crate::supply_chain::{manifest, CatalogEntity, Component, ComponentView, SecurityOverview};
use crate::views;

pub async fn extensions() -> Json<PluginManifest> {
    Json(manifest())
}

pub async fn entity_overview(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SecurityOverview>, AppError> {
    let entity = state.supply_chain.entity(&name)?;
    Ok(Json(state.supply_chain.overview(entity).await))
}

pub async fn entity_component(
    State(state): State<AppState>,
    Path((name, component)): Path<(String, String)>,
) -> Result<Json<ComponentView>, AppError> {
    let entity = state.supply_chain.entity(&name)?;
    let component: Component = component.parse()?;
    Ok(Json(state.supply_chain.render_component(component, entity).await?))
}

/// Overview for an entity supplied by the caller instead of the catalog.
pub async fn overview_for(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<Json<SecurityOverview>, AppError> {
    let entity: CatalogEntity =
        serde_json::from_value(body).map_err(|e| AppError::Payload {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: format!("Invalid entity: {}", e),
        })?;
    Ok(Json(state.supply_chain.overview(&entity).await))
}

pub async fn page(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.supply_chain.entity(&name) {
        Ok(entity) => {
            let overview = state.supply_chain.overview(entity).await;
            Html(views::security_page(&overview)).into_response()
        }
        Err(e) => (
            StatusCode::NOT_FOUND,
            Html(views::not_found(NOT_FOUND_TITLE, Some(&e.to_string()))),
        )
            .into_response(),
    }
}
