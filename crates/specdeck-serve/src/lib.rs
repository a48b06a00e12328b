use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use specdeck_core::{ChangeDetails, ChangeSummary, Scope};
use specdeck_projects::{ProjectRegistry, RegistryError};
use specdeck_scan::ScanError;

// ── Config ──

pub struct ServeConfig {
    pub bind: String,
    pub port: u16,
}

// ── App State ──

struct AppState {
    registry: ProjectRegistry,
}

// ── Error Handling ──

/// Maps the error taxonomy onto HTTP: not-found conditions carry their
/// message to the client, everything else is logged and returned as a
/// generic 500.
enum ApiError {
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => {
                let body = serde_json::json!({ "error": msg });
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                let body = serde_json::json!({ "error": "internal server error" });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ProjectNotFound(_) | RegistryError::ProjectPathNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::ChangeNotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}

// ── Entrypoint ──

pub async fn serve(registry: ProjectRegistry, config: ServeConfig) -> anyhow::Result<()> {
    let app = router(registry);
    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("specdeck HTTP server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router (for testing without binding to a port).
pub fn router(registry: ProjectRegistry) -> Router {
    let state = Arc::new(AppState { registry });
    Router::new()
        .route("/api/health", get(health))
        .route("/api/projects", get(get_projects))
        .route("/api/projects/{project_id}/openspec/changes", get(get_changes))
        .route(
            "/api/projects/{project_id}/openspec/archive",
            get(get_archived_changes),
        )
        .route(
            "/api/projects/{project_id}/openspec/changes/{change_id}",
            get(get_change_details),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Health ──

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

// ── GET /api/projects ──

#[derive(Serialize)]
struct ProjectItem {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

#[derive(Serialize)]
struct ProjectsResponse {
    projects: Vec<ProjectItem>,
}

async fn get_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let projects = state
        .registry
        .list()?
        .into_iter()
        .map(|(id, entry)| ProjectItem {
            id,
            path: entry.path.map(|p| p.display().to_string()),
        })
        .collect();
    Ok(Json(ProjectsResponse { projects }))
}

// ── GET /api/projects/{project_id}/openspec/changes ──

async fn get_changes(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<ChangeSummary>>, ApiError> {
    let root = state.registry.resolve_root(&project_id)?;
    let changes = specdeck_scan::list_changes(&root, Scope::Active).await?;
    Ok(Json(changes))
}

// ── GET /api/projects/{project_id}/openspec/archive ──

async fn get_archived_changes(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<ChangeSummary>>, ApiError> {
    let root = state.registry.resolve_root(&project_id)?;
    let changes = specdeck_scan::list_changes(&root, Scope::Archived).await?;
    Ok(Json(changes))
}

// ── GET /api/projects/{project_id}/openspec/changes/{change_id} ──

async fn get_change_details(
    State(state): State<Arc<AppState>>,
    Path((project_id, change_id)): Path<(String, String)>,
) -> Result<Json<ChangeDetails>, ApiError> {
    let root = state.registry.resolve_root(&project_id)?;
    let details = specdeck_scan::change_details(&root, &change_id).await?;
    Ok(Json(details))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::path::Path as FsPath;
    use tower::ServiceExt;

    struct Fixture {
        _store: tempfile::TempDir,
        project: tempfile::TempDir,
        app: Router,
    }

    fn setup() -> Fixture {
        let store = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        let registry = ProjectRegistry::open(store.path());
        registry.set("demo", Some(project.path())).unwrap();
        registry.set("unconfigured", None).unwrap();
        let app = router(registry);
        Fixture {
            _store: store,
            project,
            app,
        }
    }

    fn add_change(root: &FsPath, name: &str, files: &[(&str, &str)]) {
        let dir = root.join("openspec").join("changes").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        for (file, content) in files {
            let path = dir.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let fx = setup();
        let (status, json) = get_json(fx.app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn projects_lists_registered_ids() {
        let fx = setup();
        let (status, json) = get_json(fx.app, "/api/projects").await;
        assert_eq!(status, StatusCode::OK);
        let projects = json["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0]["id"], "demo");
        assert!(projects[0]["path"].is_string());
        assert!(projects[1].get("path").is_none());
    }

    #[tokio::test]
    async fn fresh_project_lists_no_changes() {
        let fx = setup();
        let (status, json) = get_json(fx.app, "/api/projects/demo/openspec/changes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn changes_are_served_in_wire_shape() {
        let fx = setup();
        add_change(
            fx.project.path(),
            "add-auth",
            &[
                ("proposal.md", "# Add auth\n\nToken-based login.\n"),
                ("tasks.md", "- [ ] endpoint"),
            ],
        );

        let (status, json) = get_json(fx.app, "/api/projects/demo/openspec/changes").await;
        assert_eq!(status, StatusCode::OK);
        let changes = json.as_array().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0]["name"], "add-auth");
        assert_eq!(changes[0]["status"], "implementing");
        assert_eq!(changes[0]["description"], "Token-based login.");
        assert!(changes[0]["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn archive_route_lists_archived_changes() {
        let fx = setup();
        let dir = fx
            .project
            .path()
            .join("openspec")
            .join("changes")
            .join("archive")
            .join("shipped");
        std::fs::create_dir_all(&dir).unwrap();

        let (status, json) = get_json(fx.app, "/api/projects/demo/openspec/archive").await;
        assert_eq!(status, StatusCode::OK);
        let changes = json.as_array().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0]["status"], "archived");
    }

    #[tokio::test]
    async fn details_carry_documents_and_spec_files() {
        let fx = setup();
        add_change(
            fx.project.path(),
            "add-auth",
            &[
                ("proposal.md", "# Add auth\n\nToken-based login.\n"),
                ("architecture.md", "arch"),
                ("design.md", "old design"),
                ("specs/auth/spec.md", "delta"),
            ],
        );

        let (status, json) =
            get_json(fx.app, "/api/projects/demo/openspec/changes/add-auth").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "add-auth");
        assert_eq!(json["status"], "draft");
        assert_eq!(json["designContent"], "arch");
        assert!(json.get("tasksContent").is_none());
        let spec_files = json["specFiles"].as_array().unwrap();
        assert_eq!(spec_files.len(), 1);
        assert_eq!(spec_files[0]["name"], "auth/spec.md");
        assert_eq!(spec_files[0]["content"], "delta");
    }

    #[tokio::test]
    async fn unknown_project_is_404() {
        let fx = setup();
        let (status, json) = get_json(fx.app, "/api/projects/nope/openspec/changes").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].as_str().unwrap().contains("nope"));
    }

    #[tokio::test]
    async fn unconfigured_project_is_404() {
        let fx = setup();
        let (status, json) =
            get_json(fx.app, "/api/projects/unconfigured/openspec/changes").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("no configured path"));
    }

    #[tokio::test]
    async fn unknown_change_is_404() {
        let fx = setup();
        let (status, json) =
            get_json(fx.app, "/api/projects/demo/openspec/changes/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].as_str().unwrap().contains("missing"));
    }
}
