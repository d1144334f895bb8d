//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    Error,
    app_state::TransactionState,
    stores::TransactionStore,
    transaction::{Transaction, form::parse_transaction_body},
};

/// A route handler for creating a new transaction.
///
/// Responds with 201 and the stored transaction, or 400 if the body fails
/// validation. Invalid bodies never reach the store.
pub async fn create_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let new_transaction = parse_transaction_body(body)?;
    let transaction = state.transaction_store.create(new_transaction)?;

    tracing::debug!("Created transaction {}", transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)))
}
