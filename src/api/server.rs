//! API Server Module
//!
//! This module implements the REST server for the hospital directory.
//! Each route extracts its inputs, calls the directory service and maps the
//! outcome to a JSON response.

use crate::{
    api::extract::{JsonBody, PathParam},
    config::Config,
    directory::{DirectoryError, DirectoryService},
    BatchActivated, BatchDeleted, Hospital, HospitalCreate, HospitalUpdate,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

/// Shared application state that is accessible across all request handlers
#[derive(Clone)]
pub struct AppState {
    directory: DirectoryService,
}

/// The main API server struct
///
/// Encapsulates the server configuration and the directory service.
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Creates a new API server instance with an empty store sized from `config`
    pub fn new(config: Config) -> Self {
        let directory = DirectoryService::from_config(&config.store);
        Self::with_directory(config, directory)
    }

    /// Creates a server over an existing directory service
    pub fn with_directory(config: Config, directory: DirectoryService) -> Self {
        Self {
            config,
            state: AppState { directory },
        }
    }

    /// Builds the router with every directory route
    ///
    /// Collection routes are served with and without a trailing slash.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(health_check))
            .route("/hospitals", get(list_hospitals).post(create_hospital))
            .route("/hospitals/", get(list_hospitals).post(create_hospital))
            .route(
                "/hospitals/:hospital_id",
                get(get_hospital)
                    .put(update_hospital)
                    .delete(delete_hospital),
            )
            .route(
                "/hospitals/batch/:batch_id",
                get(get_batch).delete(delete_batch),
            )
            .route("/hospitals/batch/:batch_id/activate", patch(activate_batch))
            .with_state(self.state.clone())
    }

    /// Starts the API server and begins listening for incoming requests
    ///
    /// # Returns
    /// `Ok(())` when the server shuts down, or an error if binding fails
    pub async fn start(self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);
        info!("API server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

async fn create_hospital(
    State(state): State<AppState>,
    JsonBody(candidate): JsonBody<HospitalCreate>,
) -> Result<Json<Hospital>, DirectoryError> {
    state.directory.create(candidate).await.map(Json)
}

async fn list_hospitals(State(state): State<AppState>) -> Json<Vec<Hospital>> {
    Json(state.directory.list().await)
}

async fn get_hospital(
    State(state): State<AppState>,
    PathParam(hospital_id): PathParam<u64>,
) -> Result<Json<Hospital>, DirectoryError> {
    state.directory.get(hospital_id).await.map(Json)
}

async fn update_hospital(
    State(state): State<AppState>,
    PathParam(hospital_id): PathParam<u64>,
    JsonBody(update): JsonBody<HospitalUpdate>,
) -> Result<Json<Hospital>, DirectoryError> {
    state.directory.update(hospital_id, update).await.map(Json)
}

async fn delete_hospital(
    State(state): State<AppState>,
    PathParam(hospital_id): PathParam<u64>,
) -> Result<StatusCode, DirectoryError> {
    state.directory.delete(hospital_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_batch(
    State(state): State<AppState>,
    PathParam(batch_id): PathParam<Uuid>,
) -> Result<Json<Vec<Hospital>>, DirectoryError> {
    state.directory.get_batch(batch_id).await.map(Json)
}

async fn delete_batch(
    State(state): State<AppState>,
    PathParam(batch_id): PathParam<Uuid>,
) -> Result<Json<BatchDeleted>, DirectoryError> {
    state.directory.delete_batch(batch_id).await.map(Json)
}

async fn activate_batch(
    State(state): State<AppState>,
    PathParam(batch_id): PathParam<Uuid>,
) -> Result<Json<BatchActivated>, DirectoryError> {
    state.directory.activate_batch(batch_id).await.map(Json)
}
