//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    Error, app_state::TransactionState, database_id::TransactionId, stores::TransactionStore,
};

/// A route handler for deleting a transaction.
///
/// Responds with 204 and no body, or 404 if the transaction does not exist.
/// Deleting the same transaction twice therefore responds with 404 the second
/// time.
pub async fn delete_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    state.transaction_store.delete(transaction_id)?;

    tracing::debug!("Deleted transaction {transaction_id}");

    Ok(StatusCode::NO_CONTENT)
}
