//! Transactions API endpoints - JSON API
//!
//! Endpoints:
//! - api_transactions: GET /api/transactions
//! - api_add_transaction: POST /api/transactions
//! - api_delete_transaction: DELETE /api/transactions/:id
//! - api_export_transactions: GET /api/transactions/export

use crate::{ApiError, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use ledgerweb_core::{CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger, Transaction};
use serde_json::Value;

type LedgerResponse = Result<Json<Vec<Transaction>>, ApiError>;

/// Log the store failure and answer with the endpoint's generic error
fn report(error: CoreError, context: ErrorContext, response: ApiError) -> ApiError {
    DefaultErrorLogger.log_error(&error, &context);
    response
}

/// Get all transactions (JSON API)
pub async fn api_transactions(state: State<AppState>) -> LedgerResponse {
    state
        .store
        .list()
        .await
        .map(Json)
        .map_err(|e| report(e, ErrorContext::new("list_transactions"), ApiError::ReadFailed))
}

/// Add a transaction at the front of the ledger (JSON API)
pub async fn api_add_transaction(
    state: State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> LedgerResponse {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest {
        message: rejection.body_text(),
    })?;

    let record = Transaction::try_from(body).map_err(|other| {
        log::warn!("Rejected transaction body that is not an object: {}", other);
        ApiError::BadRequest {
            message: "transaction must be a JSON object".to_string(),
        }
    })?;

    let id = record.id().map(str::to_string);

    state
        .store
        .append(record)
        .await
        .map(Json)
        .map_err(|e| {
            let context = ErrorContext::new("add_transaction").with_data("id", serde_json::json!(id));
            report(e, context, ApiError::AddFailed)
        })
}

/// Delete every transaction with the given id (JSON API)
pub async fn api_delete_transaction(
    state: State<AppState>,
    Path(id): Path<String>,
) -> LedgerResponse {
    let result = state.store.delete(&id).await;
    result
        .map(Json)
        .map_err(|e| {
            let context = ErrorContext::new("delete_transaction").with_data("id", Value::String(id));
            report(e, context, ApiError::DeleteFailed)
        })
}

/// Export all transactions (JSON API)
pub async fn api_export_transactions(state: State<AppState>) -> LedgerResponse {
    state
        .store
        .export()
        .await
        .map(Json)
        .map_err(|e| report(e, ErrorContext::new("export_transactions"), ApiError::ExportFailed))
}

// ==================== Tests ====================
