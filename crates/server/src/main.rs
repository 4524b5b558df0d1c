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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info};

use peer_pair_api::{
    ApiError, AuditTimelineResponse, EdgeMutationResponse, EdgeRequest, LoadSummaryResponse,
    MoveEdgeRequest, MutualSelectionsResponse, PutCapacityRequest, PutCapacityResponse,
    PutRosterRequest, PutRosterResponse, PutSelectionsRequest, PutSelectionsResponse,
    RemoveCycleResponse, RevieweesResponse, ReviewersResponse, RunAutoPairingResponse, add_edge,
    get_audit_timeline, get_load_summary, get_mutual_selections, get_reviewees, get_reviewers,
    move_edge, put_capacity, put_roster, put_selections, remove_cycle, remove_edge,
    run_auto_pairing,
};
use peer_pair_audit::{Actor, Cause};
use peer_pair_domain::ReviewCycleId;
use peer_pair_persistence::Persistence;

/// How long a mutation waits for a cycle's write lock before failing as a
/// concurrency conflict.
const CYCLE_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Peer Pair Server - HTTP server for the peer review pairing engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind one async Mutex; the per-cycle lock
/// registry serializes mutations per review cycle on top of that, so a
/// write holds its cycle's lock across the whole load-validate-apply-save
/// sequence. Reads take no cycle lock and only ever observe committed
/// graphs. Mutations on distinct cycles proceed in parallel up to the
/// shared connection.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for cycle state and audit events.
    persistence: Arc<Mutex<Persistence>>,
    /// One write lock per review cycle, created on first use.
    cycle_locks: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl AppState {
    fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            cycle_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

/// Returns the write lock for a cycle, creating it on first use.
async fn cycle_lock(app_state: &AppState, review_cycle_id: ReviewCycleId) -> Arc<Mutex<()>> {
    let mut locks = app_state.cycle_locks.lock().await;
    Arc::clone(
        locks
            .entry(review_cycle_id.value())
            .or_insert_with(|| Arc::new(Mutex::new(()))),
    )
}

/// Acquires a cycle's write lock, waiting a bounded interval.
///
/// A timeout means another mutation held the cycle for too long; nothing
/// has been applied and the caller may retry.
async fn acquire_cycle_lock(
    app_state: &AppState,
    review_cycle_id: ReviewCycleId,
) -> Result<OwnedMutexGuard<()>, HttpError> {
    let lock: Arc<Mutex<()>> = cycle_lock(app_state, review_cycle_id).await;
    tokio::time::timeout(CYCLE_LOCK_TIMEOUT, lock.lock_owned())
        .await
        .map_err(|_| {
            HttpError::from(ApiError::ConcurrencyConflict {
                review_cycle_id: review_cycle_id.value(),
            })
        })
}

/// Actor and cause fields carried by every mutation request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct MutationContext {
    /// The operator performing this action.
    actor_id: String,
    /// The cause ID for this action (e.g., a request ID).
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl MutationContext {
    fn into_actor_and_cause(self) -> (Actor, Cause) {
        (
            Actor::new(self.actor_id, String::from("operator")),
            Cause::new(self.cause_id, self.cause_description),
        )
    }
}

/// API request for running the auto-pairing solver.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SolveApiRequest {
    /// Actor and cause attribution.
    #[serde(flatten)]
    context: MutationContext,
}

/// API request for adding or removing an assignment edge.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EdgeApiRequest {
    /// Actor and cause attribution.
    #[serde(flatten)]
    context: MutationContext,
    /// The employee performing the review.
    reviewer_id: String,
    /// The employee being reviewed.
    reviewee_id: String,
}

/// API request for moving an assignment edge.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct MoveEdgeApiRequest {
    /// Actor and cause attribution.
    #[serde(flatten)]
    context: MutationContext,
    /// The employee performing the review.
    reviewer_id: String,
    /// The reviewee the reviewer is currently assigned to.
    from_reviewee_id: String,
    /// The reviewee the reviewer should be reassigned to.
    to_reviewee_id: String,
}

/// API request for deleting a review cycle.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RemoveCycleApiRequest {
    /// Actor and cause attribution.
    #[serde(flatten)]
    context: MutationContext,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// The violated invariant rule, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
    /// Whether the caller may retry the identical request.
    #[serde(skip_serializing_if = "Option::is_none")]
    retryable: Option<bool>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// The violated invariant rule, when applicable.
    rule: Option<String>,
    /// Whether the caller may retry the identical request.
    retryable: Option<bool>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            rule: self.rule,
            retryable: self.retryable,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::StructuralInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
                rule: None,
                retryable: None,
            },
            ApiError::InvariantViolation { ref rule, .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
                rule: Some(rule.clone()),
                retryable: None,
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
                rule: None,
                retryable: None,
            },
            ApiError::ConcurrencyConflict { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
                rule: None,
                retryable: Some(true),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                    rule: None,
                    retryable: None,
                }
            }
        }
    }
}

/// Handler for PUT `/cycles/{id}/roster`.
async fn handle_put_roster(
    AxumState(app_state): AxumState<AppState>,
    Path(cycle_id): Path<i64>,
    Json(req): Json<PutRosterRequest>,
) -> Result<Json<PutRosterResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);
    info!(
        review_cycle_id = cycle_id,
        employee_count = req.employees.len(),
        "Handling put_roster request"
    );

    let _guard: OwnedMutexGuard<()> = acquire_cycle_lock(&app_state, review_cycle_id).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: PutRosterResponse = put_roster(&mut persistence, review_cycle_id, req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/cycles/{id}/selections`.
async fn handle_put_selections(
    AxumState(app_state): AxumState<AppState>,
    Path(cycle_id): Path<i64>,
    Json(req): Json<PutSelectionsRequest>,
) -> Result<Json<PutSelectionsResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);
    info!(review_cycle_id = cycle_id, "Handling put_selections request");

    let _guard: OwnedMutexGuard<()> = acquire_cycle_lock(&app_state, review_cycle_id).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: PutSelectionsResponse = put_selections(&mut persistence, review_cycle_id, req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/cycles/{id}/capacity`.
async fn handle_put_capacity(
    AxumState(app_state): AxumState<AppState>,
    Path(cycle_id): Path<i64>,
    Json(req): Json<PutCapacityRequest>,
) -> Result<Json<PutCapacityResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);
    info!(review_cycle_id = cycle_id, "Handling put_capacity request");

    let _guard: OwnedMutexGuard<()> = acquire_cycle_lock(&app_state, review_cycle_id).await?;
    let mut persistence = app_state.persistence.lock().await;
    let response: PutCapacityResponse = put_capacity(&mut persistence, review_cycle_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/cycles/{id}/solve`.
async fn handle_solve(
    AxumState(app_state): AxumState<AppState>,
    Path(cycle_id): Path<i64>,
    Json(req): Json<SolveApiRequest>,
) -> Result<Json<RunAutoPairingResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);
    info!(
        review_cycle_id = cycle_id,
        actor_id = %req.context.actor_id,
        "Handling solve request"
    );

    let _guard: OwnedMutexGuard<()> = acquire_cycle_lock(&app_state, review_cycle_id).await?;
    let (actor, cause) = req.context.into_actor_and_cause();
    let mut persistence = app_state.persistence.lock().await;
    let response: RunAutoPairingResponse =
        run_auto_pairing(&mut persistence, review_cycle_id, actor, cause)?;
    drop(persistence);

    info!(
        review_cycle_id = cycle_id,
        edge_count = response.edge_count,
        event_id = response.event_id,
        "Solve committed"
    );

    Ok(Json(response))
}

/// Handler for POST `/cycles/{id}/edges`.
async fn handle_add_edge(
    AxumState(app_state): AxumState<AppState>,
    Path(cycle_id): Path<i64>,
    Json(req): Json<EdgeApiRequest>,
) -> Result<Json<EdgeMutationResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);
    info!(
        review_cycle_id = cycle_id,
        reviewer_id = %req.reviewer_id,
        reviewee_id = %req.reviewee_id,
        "Handling add_edge request"
    );

    let _guard: OwnedMutexGuard<()> = acquire_cycle_lock(&app_state, review_cycle_id).await?;
    let (actor, cause) = req.context.into_actor_and_cause();
    let edge_request: EdgeRequest = EdgeRequest {
        reviewer_id: req.reviewer_id,
        reviewee_id: req.reviewee_id,
    };
    let mut persistence = app_state.persistence.lock().await;
    let response: EdgeMutationResponse =
        add_edge(&mut persistence, review_cycle_id, &edge_request, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/cycles/{id}/edges/remove`.
async fn handle_remove_edge(
    AxumState(app_state): AxumState<AppState>,
    Path(cycle_id): Path<i64>,
    Json(req): Json<EdgeApiRequest>,
) -> Result<Json<EdgeMutationResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);
    info!(
        review_cycle_id = cycle_id,
        reviewer_id = %req.reviewer_id,
        reviewee_id = %req.reviewee_id,
        "Handling remove_edge request"
    );

    let _guard: OwnedMutexGuard<()> = acquire_cycle_lock(&app_state, review_cycle_id).await?;
    let (actor, cause) = req.context.into_actor_and_cause();
    let edge_request: EdgeRequest = EdgeRequest {
        reviewer_id: req.reviewer_id,
        reviewee_id: req.reviewee_id,
    };
    let mut persistence = app_state.persistence.lock().await;
    let response: EdgeMutationResponse =
        remove_edge(&mut persistence, review_cycle_id, &edge_request, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/cycles/{id}/edges/move`.
async fn handle_move_edge(
    AxumState(app_state): AxumState<AppState>,
    Path(cycle_id): Path<i64>,
    Json(req): Json<MoveEdgeApiRequest>,
) -> Result<Json<EdgeMutationResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);
    info!(
        review_cycle_id = cycle_id,
        reviewer_id = %req.reviewer_id,
        from_reviewee_id = %req.from_reviewee_id,
        to_reviewee_id = %req.to_reviewee_id,
        "Handling move_edge request"
    );

    let _guard: OwnedMutexGuard<()> = acquire_cycle_lock(&app_state, review_cycle_id).await?;
    let (actor, cause) = req.context.into_actor_and_cause();
    let move_request: MoveEdgeRequest = MoveEdgeRequest {
        reviewer_id: req.reviewer_id,
        from_reviewee_id: req.from_reviewee_id,
        to_reviewee_id: req.to_reviewee_id,
    };
    let mut persistence = app_state.persistence.lock().await;
    let response: EdgeMutationResponse =
        move_edge(&mut persistence, review_cycle_id, &move_request, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/cycles/{id}`.
async fn handle_remove_cycle(
    AxumState(app_state): AxumState<AppState>,
    Path(cycle_id): Path<i64>,
    Json(req): Json<RemoveCycleApiRequest>,
) -> Result<Json<RemoveCycleResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);
    info!(review_cycle_id = cycle_id, "Handling remove_cycle request");

    let _guard: OwnedMutexGuard<()> = acquire_cycle_lock(&app_state, review_cycle_id).await?;
    let (actor, cause) = req.context.into_actor_and_cause();
    let mut persistence = app_state.persistence.lock().await;
    let response: RemoveCycleResponse =
        remove_cycle(&mut persistence, review_cycle_id, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/cycles/{id}/reviewers/{employee_id}`.
async fn handle_get_reviewers(
    AxumState(app_state): AxumState<AppState>,
    Path((cycle_id, employee_id)): Path<(i64, String)>,
) -> Result<Json<ReviewersResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);

    let mut persistence = app_state.persistence.lock().await;
    let response: ReviewersResponse =
        get_reviewers(&mut persistence, review_cycle_id, &employee_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/cycles/{id}/reviewees/{employee_id}`.
async fn handle_get_reviewees(
    AxumState(app_state): AxumState<AppState>,
    Path((cycle_id, employee_id)): Path<(i64, String)>,
) -> Result<Json<RevieweesResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);

    let mut persistence = app_state.persistence.lock().await;
    let response: RevieweesResponse =
        get_reviewees(&mut persistence, review_cycle_id, &employee_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/cycles/{id}/mutual/{employee_id}`.
async fn handle_get_mutual_selections(
    AxumState(app_state): AxumState<AppState>,
    Path((cycle_id, employee_id)): Path<(i64, String)>,
) -> Result<Json<MutualSelectionsResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);

    let mut persistence = app_state.persistence.lock().await;
    let response: MutualSelectionsResponse =
        get_mutual_selections(&mut persistence, review_cycle_id, &employee_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/cycles/{id}/load_summary`.
async fn handle_get_load_summary(
    AxumState(app_state): AxumState<AppState>,
    Path(cycle_id): Path<i64>,
) -> Result<Json<LoadSummaryResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);

    let mut persistence = app_state.persistence.lock().await;
    let response: LoadSummaryResponse = get_load_summary(&mut persistence, review_cycle_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/cycles/{id}/audit/timeline`.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(cycle_id): Path<i64>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let review_cycle_id: ReviewCycleId = ReviewCycleId::new(cycle_id);

    let mut persistence = app_state.persistence.lock().await;
    let response: AuditTimelineResponse = get_audit_timeline(&mut persistence, review_cycle_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/cycles/{id}/roster", put(handle_put_roster))
        .route("/cycles/{id}/selections", put(handle_put_selections))
        .route("/cycles/{id}/capacity", put(handle_put_capacity))
        .route("/cycles/{id}/solve", post(handle_solve))
        .route("/cycles/{id}/edges", post(handle_add_edge))
        .route("/cycles/{id}/edges/remove", post(handle_remove_edge))
        .route("/cycles/{id}/edges/move", post(handle_move_edge))
        .route("/cycles/{id}", delete(handle_remove_cycle))
        .route(
            "/cycles/{id}/reviewers/{employee_id}",
            get(handle_get_reviewers),
        )
        .route(
            "/cycles/{id}/reviewees/{employee_id}",
            get(handle_get_reviewees),
        )
        .route(
            "/cycles/{id}/mutual/{employee_id}",
            get(handle_get_mutual_selections),
        )
        .route("/cycles/{id}/load_summary", get(handle_get_load_summary))
        .route("/cycles/{id}/audit/timeline", get(handle_get_audit_timeline))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Peer Pair Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState::new(persistence);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use peer_pair_api::EmployeeInfo;
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState::new(persistence)
    }

    fn test_context() -> MutationContext {
        MutationContext {
            actor_id: String::from("hr-123"),
            cause_id: String::from("req-456"),
            cause_description: String::from("Test request"),
        }
    }

    fn employee(employee_id: &str) -> EmployeeInfo {
        EmployeeInfo {
            employee_id: String::from(employee_id),
            display_name: format!("Employee {employee_id}"),
            department: String::from("Engineering"),
            manager_id: None,
            is_manager: false,
        }
    }

    async fn send_json(
        app: &Router,
        method: &str,
        uri: &str,
        body: &impl serde::Serialize,
    ) -> axum::http::Response<Body> {
        app.clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn send_get(app: &Router, uri: &str) -> axum::http::Response<Body> {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: axum::http::Response<Body>) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Seeds the cycle-1 scenario: four employees, target K=2, every
    /// selection reciprocated.
    async fn seed_cycle_one(app: &Router) {
        let roster = PutRosterRequest {
            employees: vec![
                employee("emp-a"),
                employee("emp-b"),
                employee("emp-c"),
                employee("emp-d"),
            ],
        };
        let response = send_json(app, "PUT", "/cycles/1/roster", &roster).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let capacity = PutCapacityRequest {
            max_peer_selection: 5,
            max_reviews_allowed: 2,
            reviewer_load_limit: None,
            department_cap: None,
            forbid_manager_pairs: false,
        };
        let response = send_json(app, "PUT", "/cycles/1/capacity", &capacity).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let selections = serde_json::json!({
            "selections": [
                { "selector_id": "emp-a", "choices": ["emp-b", "emp-c"] },
                { "selector_id": "emp-b", "choices": ["emp-a", "emp-d"] },
                { "selector_id": "emp-c", "choices": ["emp-a"] },
                { "selector_id": "emp-d", "choices": ["emp-b"] },
            ]
        });
        let response = send_json(app, "PUT", "/cycles/1/selections", &selections).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_full_cycle_workflow() {
        let app: Router = build_router(create_test_app_state());
        seed_cycle_one(&app).await;

        let solve_req = SolveApiRequest {
            context: test_context(),
        };
        let response = send_json(&app, "POST", "/cycles/1/solve", &solve_req).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let solve: RunAutoPairingResponse = read_body(response).await;
        assert_eq!(solve.edge_count, 8);
        assert!(solve.unsatisfied.is_empty());

        let response = send_get(&app, "/cycles/1/load_summary").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let summary: LoadSummaryResponse = read_body(response).await;
        assert_eq!(summary.rows.len(), 4);
        assert!(summary.rows.iter().all(|row| row.in_degree == 2));

        let response = send_get(&app, "/cycles/1/reviewers/emp-a").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let reviewers: ReviewersResponse = read_body(response).await;
        assert_eq!(reviewers.reviewers.len(), 2);

        let response = send_get(&app, "/cycles/1/audit/timeline").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let timeline: AuditTimelineResponse = read_body(response).await;
        assert_eq!(timeline.events.len(), 1);
        assert_eq!(timeline.events[0].action, "RunAutoPairing");
    }

    #[tokio::test]
    async fn test_invariant_violation_returns_conflict_with_rule() {
        let app: Router = build_router(create_test_app_state());
        seed_cycle_one(&app).await;

        let add_req = EdgeApiRequest {
            context: test_context(),
            reviewer_id: String::from("emp-a"),
            reviewee_id: String::from("emp-a"),
        };
        let response = send_json(&app, "POST", "/cycles/1/edges", &add_req).await;

        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
        let body: ErrorResponse = read_body(response).await;
        assert!(body.error);
        assert_eq!(body.rule, Some(String::from("no_self_review")));
        assert_eq!(body.retryable, None);
    }

    #[tokio::test]
    async fn test_structural_input_returns_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let capacity = PutCapacityRequest {
            max_peer_selection: 5,
            max_reviews_allowed: 0,
            reviewer_load_limit: None,
            department_cap: None,
            forbid_manager_pairs: false,
        };
        let response = send_json(&app, "PUT", "/cycles/1/capacity", &capacity).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_cycle_returns_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = send_get(&app, "/cycles/99/load_summary").await;

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_move_edge_endpoint_is_atomic() {
        let app: Router = build_router(create_test_app_state());
        seed_cycle_one(&app).await;

        let add_req = EdgeApiRequest {
            context: test_context(),
            reviewer_id: String::from("emp-a"),
            reviewee_id: String::from("emp-b"),
        };
        let response = send_json(&app, "POST", "/cycles/1/edges", &add_req).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        // Moving onto the reviewer itself is a self-review; the original
        // edge must survive the rejected move.
        let move_req = MoveEdgeApiRequest {
            context: test_context(),
            reviewer_id: String::from("emp-a"),
            from_reviewee_id: String::from("emp-b"),
            to_reviewee_id: String::from("emp-a"),
        };
        let response = send_json(&app, "POST", "/cycles/1/edges/move", &move_req).await;
        assert_eq!(response.status(), HttpStatusCode::CONFLICT);

        let response = send_get(&app, "/cycles/1/reviewees/emp-a").await;
        let reviewees: RevieweesResponse = read_body(response).await;
        assert_eq!(reviewees.reviewees, vec!["emp-b"]);
    }

    #[tokio::test]
    async fn test_remove_cycle_keeps_audit_timeline() {
        let app: Router = build_router(create_test_app_state());
        seed_cycle_one(&app).await;

        let solve_req = SolveApiRequest {
            context: test_context(),
        };
        send_json(&app, "POST", "/cycles/1/solve", &solve_req).await;

        let remove_req = RemoveCycleApiRequest {
            context: test_context(),
        };
        let response = send_json(&app, "DELETE", "/cycles/1", &remove_req).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = send_get(&app, "/cycles/1/load_summary").await;
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);

        let response = send_get(&app, "/cycles/1/audit/timeline").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let timeline: AuditTimelineResponse = read_body(response).await;
        assert_eq!(timeline.events.len(), 2);
        assert_eq!(timeline.events[1].action, "RemoveCycle");
    }

    #[tokio::test]
    async fn test_distinct_cycles_have_distinct_locks() {
        let app_state: AppState = create_test_app_state();

        let first: Arc<Mutex<()>> = cycle_lock(&app_state, ReviewCycleId::new(1)).await;
        let again: Arc<Mutex<()>> = cycle_lock(&app_state, ReviewCycleId::new(1)).await;
        let other: Arc<Mutex<()>> = cycle_lock(&app_state, ReviewCycleId::new(2)).await;

        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[tokio::test]
    async fn test_held_cycle_lock_times_out_as_conflict() {
        let app_state: AppState = create_test_app_state();
        let lock: Arc<Mutex<()>> = cycle_lock(&app_state, ReviewCycleId::new(1)).await;
        let _held = lock.lock().await;

        let result =
            tokio::time::timeout(Duration::from_millis(50), lock.clone().lock_owned()).await;

        assert!(result.is_err());
    }
}
