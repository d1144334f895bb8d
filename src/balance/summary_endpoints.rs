//! Defines the route handlers that sum transaction amounts.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::TransactionState,
    stores::TransactionStore,
    transaction::{TransactionKind, serialize_amount},
};

/// The JSON body returned by every aggregate endpoint.
///
/// All three endpoints name the field `saldo_atual`, existing clients read the
/// totals from that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// The aggregated amount.
    #[serde(serialize_with = "serialize_amount")]
    pub saldo_atual: f64,
}

/// A route handler for the current balance: inflows minus outflows.
pub async fn get_balance_endpoint<T>(
    State(state): State<TransactionState<T>>,
) -> Result<Json<BalanceSummary>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let saldo_atual = state.transaction_store.balance()?;

    Ok(Json(BalanceSummary { saldo_atual }))
}

/// A route handler for the sum of all outflows.
pub async fn get_total_outflow_endpoint<T>(
    State(state): State<TransactionState<T>>,
) -> Result<Json<BalanceSummary>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    get_total(&state.transaction_store, TransactionKind::Saida)
}

/// A route handler for the sum of all inflows.
pub async fn get_total_inflow_endpoint<T>(
    State(state): State<TransactionState<T>>,
) -> Result<Json<BalanceSummary>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    get_total(&state.transaction_store, TransactionKind::Entrada)
}

fn get_total<T>(store: &T, kind: TransactionKind) -> Result<Json<BalanceSummary>, Error>
where
    T: TransactionStore,
{
    let saldo_atual = store.total(kind)?;

    Ok(Json(BalanceSummary { saldo_atual }))
}
