//! Defines the endpoint for overwriting an existing transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::{
    Error,
    app_state::TransactionState,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{Transaction, form::parse_transaction_body},
};

/// A route handler for replacing the description, amount and kind of a transaction.
///
/// There are no partial updates, the body must hold all three fields. Responds
/// with the updated transaction, 400 if the body fails validation or 404 if the
/// transaction does not exist.
pub async fn edit_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(transaction_id): Path<TransactionId>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let new_transaction = parse_transaction_body(body)?;

    state
        .transaction_store
        .update(transaction_id, new_transaction)
        .inspect_err(|error| {
            tracing::debug!("Could not update transaction {transaction_id}: {error}")
        })
        .map(Json)
}

#[cfg(test)]
mod test {
    use axum::{
        Json,
        extract::{Path, State},
    };
    use serde_json::json;

    use crate::{
        Error,
        app_state::TransactionState,
        stores::TransactionStore,
        test_utils::{must_create_test_state, new_transaction},
        transaction::{TransactionKind, edit_endpoint::edit_transaction_endpoint},
    };

    #[tokio::test]
    async fn can_update_transaction() {
        let state = TransactionState {
            transaction_store: must_create_test_state().transaction_store,
        };
        let original = state
            .transaction_store
            .create(new_transaction("salario", 1000.0, TransactionKind::Entrada))
            .unwrap();
        let body = json!({"descricao": "aluguel", "valor": 400.5, "tipo": "saida"});

        let Json(got) =
            edit_transaction_endpoint(State(state.clone()), Path(original.id), Ok(Json(body)))
                .await
                .unwrap();

        assert_eq!(got.id, original.id);
        assert_eq!(got.descricao, "aluguel");
        assert_eq!(got.valor, 400.5);
        assert_eq!(got.tipo, TransactionKind::Saida);
        assert_eq!(state.transaction_store.get(original.id), Ok(got));
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = TransactionState {
            transaction_store: must_create_test_state().transaction_store,
        };
        let body = json!({"descricao": "aluguel", "valor": 400, "tipo": "saida"});

        let result = edit_transaction_endpoint(State(state), Path(3), Ok(Json(body))).await;

        assert_eq!(result.map(|json| json.0), Err(Error::UpdateMissingTransaction));
    }

    #[tokio::test]
    async fn invalid_body_leaves_transaction_unchanged() {
        let state = TransactionState {
            transaction_store: must_create_test_state().transaction_store,
        };
        let original = state
            .transaction_store
            .create(new_transaction("salario", 1000.0, TransactionKind::Entrada))
            .unwrap();
        let body = json!({"descricao": "salario", "valor": -1000, "tipo": "entrada"});

        let result =
            edit_transaction_endpoint(State(state.clone()), Path(original.id), Ok(Json(body)))
                .await;

        assert!(matches!(result, Err(Error::InvalidTransaction(_))));
        assert_eq!(state.transaction_store.get(original.id), Ok(original));
    }
}
