//! Defines the endpoints for reading transactions.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error, app_state::TransactionState, database_id::TransactionId, stores::TransactionStore,
    transaction::Transaction,
};

/// A route handler for listing every transaction, most recent first.
pub async fn get_transactions_endpoint<T>(
    State(state): State<TransactionState<T>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    state.transaction_store.get_all().map(Json)
}

/// A route handler for getting a transaction by its database ID.
///
/// Responds with 404 if the transaction does not exist.
pub async fn get_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    state.transaction_store.get(transaction_id).map(Json)
}
