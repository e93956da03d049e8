//! Serve command - runs the Shoplist HTTP server.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use shoplist::{ItemId, ListService, ShoppingList, SortKey};
use tokio::signal::unix::{SignalKind, signal};

use crate::backend::{backend_label, create_backend, json_path, save_if_in_memory};
use crate::cli::ServeArgs;

/// Shared application state
#[derive(Clone)]
struct AppState {
    service: ListService,
}

/// Query parameters for adding an item
#[derive(Deserialize)]
struct AddParams {
    description: String,
    #[serde(default = "default_quantity")]
    quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Query parameters for changing an item's quantity
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateQuantityParams {
    item_id: ItemId,
    quantity: i32,
}

/// Query parameters for reading a list
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetListParams {
    sort_by: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    backend: &'static str,
}

/// Run the Shoplist server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_backend(&args.backend_config).await?;
    let service = ListService::open(store);
    tracing::info!(backend = backend_label(service.store()), "Store ready");

    let app = router(AppState {
        service: service.clone(),
    });

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    println!("Shoplist server listening on http://{local_addr}");
    println!();
    println!("Available endpoints:");
    println!("  POST /api/{{list}}/add?description=..&quantity=..      - Add an item");
    println!("  PUT  /api/{{list}}/delete/{{item}}                     - Remove an item");
    println!("  PUT  /api/{{list}}/deleteAll                          - Remove every item");
    println!("  PUT  /api/{{list}}/updateQuantity?itemId=..&quantity=.. - Change a quantity");
    println!("  GET  /api/{{list}}?sortBy=..                          - Read a sorted list");
    println!("  GET  /health                                        - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    let save_path = json_path(&args.backend_config);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
                _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
            }

            // Only the in-memory store needs saving; SQL stores commit on every write
            if let Err(e) = save_if_in_memory(&service, &save_path).await {
                tracing::error!("Failed to save lists: {e}");
                eprintln!("Failed to save lists: {e}");
            }
        })
        .await?;

    println!("Server shut down");
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/{list_id}", get(handle_get_list))
        .route("/api/{list_id}/add", post(handle_add))
        .route("/api/{list_id}/delete/{item_id}", put(handle_delete))
        .route("/api/{list_id}/deleteAll", put(handle_delete_all))
        .route("/api/{list_id}/updateQuantity", put(handle_update_quantity))
        .with_state(state)
}

/// HTTP status for a failed list operation.
///
/// Bad quantities are the caller's fault. An unknown sort key is reported as a
/// server fault, and a lost race as a conflict the caller may retry.
fn error_status(err: &shoplist::Error) -> StatusCode {
    if err.is_invalid_quantity() {
        StatusCode::BAD_REQUEST
    } else if err.is_version_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// A list as JSON, or an empty 200 when the operation had nothing to return.
fn list_response(result: shoplist::Result<Option<ShoppingList>>) -> Response {
    match result {
        Ok(Some(list)) => Json(list).into_response(),
        Ok(None) => StatusCode::OK.into_response(),
        Err(e) => {
            let status = error_status(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "Request failed");
            } else {
                tracing::debug!(error = %e, status = status.as_u16(), "Request rejected");
            }
            (status, e.to_string()).into_response()
        }
    }
}

/// Handler for POST /api/{list_id}/add
async fn handle_add(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Query(params): Query<AddParams>,
) -> Response {
    let result = state
        .service
        .add_item(&list_id, &params.description, params.quantity)
        .await;
    list_response(result.map(Some))
}

/// Handler for PUT /api/{list_id}/delete/{item_id}
async fn handle_delete(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(String, ItemId)>,
) -> Response {
    list_response(state.service.delete_item(&list_id, item_id).await)
}

/// Handler for PUT /api/{list_id}/deleteAll
async fn handle_delete_all(State(state): State<AppState>, Path(list_id): Path<String>) -> Response {
    list_response(state.service.delete_all(&list_id).await)
}

/// Handler for PUT /api/{list_id}/updateQuantity
async fn handle_update_quantity(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Query(params): Query<UpdateQuantityParams>,
) -> Response {
    list_response(
        state
            .service
            .update_quantity(&list_id, params.item_id, params.quantity)
            .await,
    )
}

/// Handler for GET /api/{list_id}
async fn handle_get_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Query(params): Query<GetListParams>,
) -> Response {
    let sort_by = params
        .sort_by
        .unwrap_or_else(|| SortKey::default().as_str().to_string());
    list_response(state.service.get_list(&list_id, &sort_by).await)
}

/// Handler for GET /health
async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        backend: backend_label(state.service.store()),
    })
}
