// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use acadplan::ValidationError;
use acadplan_api::{
    AcademicPlanRequest, AcademicPlanResponse, ApiError, ListProgrammesResponse, generate_plan,
    list_programmes,
};
use acadplan_persistence::{Persistence, PersistenceError, SeedData, SeedSummary};
use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Academic Plan Server - HTTP server for the academic plan engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// JSON seed document loaded into the database at start-up
    #[arg(short, long)]
    seed: Option<String>,
}

/// Application state shared across handlers.
///
/// The engine holds one connection for a whole request, so the store sits
/// behind a mutex.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Error response type.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// The conflicts behind an invalid combination.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conflicts: Vec<ValidationError>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    conflicts: Vec<ValidationError>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            conflicts: self.conflicts,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                conflicts: Vec::new(),
            },
            ApiError::InvalidCombination { conflicts, .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message,
                conflicts,
            },
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    conflicts: Vec::new(),
                }
            }
        }
    }
}

/// Handler for POST `/academic_plan` endpoint.
///
/// Builds the plan for the requested programme combination.
async fn handle_academic_plan(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<AcademicPlanRequest>,
) -> Result<Json<AcademicPlanResponse>, HttpError> {
    info!(programme_ids = ?request.programme_ids, "Handling academic_plan request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AcademicPlanResponse = generate_plan(&mut *persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/programmes` endpoint.
async fn handle_list_programmes(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListProgrammesResponse>, HttpError> {
    info!("Handling list_programmes request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListProgrammesResponse = list_programmes(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/academic_plan", post(handle_academic_plan))
        .route("/programmes", get(handle_list_programmes))
        .route("/health", get(handle_health))
        .with_state(app_state)
}

/// Opens the database and applies the seed document, if any.
fn open_persistence(args: &Args) -> Result<Persistence, PersistenceError> {
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(seed_path) = &args.seed {
        let seed: SeedData = SeedData::from_file(seed_path)?;
        let summary: SeedSummary = persistence.seed(&seed)?;
        info!(
            seed = %seed_path,
            programmes = summary.programmes,
            modules = summary.modules,
            "Loaded seed document"
        );
    }

    Ok(persistence)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Academic Plan Server");

    let persistence: Persistence = open_persistence(&args)?;
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    const TEST_SEED: &str = r#"{
        "programmes": [
            {"id": "cs-major", "name": "Computer Science", "type": "major",
             "requiredUnits": 160, "doubleCountCap": 40},
            {"id": "math-major", "name": "Mathematics", "type": "major",
             "requiredUnits": 160, "doubleCountCap": 40},
            {"id": "ai-minor", "name": "Artificial Intelligence", "type": "minor",
             "requiredUnits": 20, "doubleCountCap": 8}
        ],
        "modules": [
            {"code": "CS1010", "title": "Programming Methodology"},
            {"code": "CS2040S", "title": "Data Structures and Algorithms"},
            {"code": "CS3243", "title": "Introduction to Artificial Intelligence"}
        ],
        "requirementPaths": [
            {"programmeId": "cs-major", "pathKey": "cs_root",
             "groupType": "coreEssentials", "logicType": "AND"},
            {"programmeId": "cs-major", "pathKey": "cs_core", "parentPathKey": "cs_root",
             "groupType": "coreEssentials", "logicType": "LEAF", "depth": 1,
             "isLeaf": true, "isReadonly": true, "moduleCodes": ["CS2040S"]},
            {"programmeId": "ai-minor", "pathKey": "ai_root",
             "groupType": "coreEssentials", "logicType": "AND"},
            {"programmeId": "ai-minor", "pathKey": "ai_core", "parentPathKey": "ai_root",
             "groupType": "coreEssentials", "logicType": "LEAF", "depth": 1,
             "isLeaf": true, "isReadonly": true, "moduleCodes": ["CS3243"]}
        ],
        "prerequisites": [
            {"moduleCode": "CS2040S", "prerequisites": ["CS1010"]}
        ]
    }"#;

    /// Helper to create test app state with a seeded in-memory database.
    fn create_test_app_state() -> AppState {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        let seed: SeedData = SeedData::from_json_str(TEST_SEED).expect("Valid test seed");
        persistence.seed(&seed).expect("Seed applies");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    fn plan_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/academic_plan")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_academic_plan_succeeds() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(plan_request(r#"{"programmeIds": ["cs-major", "ai-minor"]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let json: serde_json::Value = body_json(response).await;
        assert_eq!(json["programmeCount"], 2);
        assert_eq!(json["programmes"][0]["id"], "cs-major");
        assert_eq!(
            json["programmes"][0]["preselectedModules"],
            serde_json::json!(["CS2040S", "CS1010"])
        );
    }

    #[tokio::test]
    async fn test_empty_selection_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(plan_request(r#"{"programmeIds": []}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], true);
    }

    #[tokio::test]
    async fn test_two_majors_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(plan_request(r#"{"programmeIds": ["cs-major", "math-major"]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = body_json(response).await;
        assert_eq!(json["conflicts"][0]["type"], "INVALID_PROGRAMME_COMBINATION");
    }

    #[tokio::test]
    async fn test_unknown_programme_is_server_error() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(plan_request(r#"{"programmeIds": ["ghost-minor"]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(response).await.get("conflicts").is_none());
    }

    #[tokio::test]
    async fn test_list_programmes() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(Request::builder().uri("/programmes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let json: serde_json::Value = body_json(response).await;
        assert_eq!(json["programmes"].as_array().unwrap().len(), 3);
        assert_eq!(json["programmes"][0]["id"], "ai-minor");
    }

    #[test]
    fn test_args_defaults() {
        let args: Args = Args::parse_from(["acadplan-server"]);
        assert_eq!(args.port, 3000);
        assert!(args.database.is_none());
        assert!(args.seed.is_none());
    }
}
