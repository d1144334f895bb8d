//! Application router configuration with gated and open route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState,
    auth::{AccessGate, access_guard},
    balance::{get_balance_endpoint, get_total_inflow_endpoint, get_total_outflow_endpoint},
    endpoints,
    stores::TransactionStore,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// When the [access gate](AccessGate) is enabled, every route except the
/// status route at [endpoints::ROOT] requires the API key.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let gated_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint::<T>).post(create_transaction_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<T>)
                .put(edit_transaction_endpoint::<T>)
                .delete(delete_transaction_endpoint::<T>),
        )
        .route(endpoints::BALANCE, get(get_balance_endpoint::<T>))
        .route(endpoints::TOTAL_OUTFLOW, get(get_total_outflow_endpoint::<T>))
        .route(endpoints::TOTAL_INFLOW, get(get_total_inflow_endpoint::<T>));

    let gated_routes = match &state.access_gate {
        AccessGate::Enabled(api_key) => gated_routes.route_layer(middleware::from_fn_with_state(
            api_key.clone(),
            access_guard,
        )),
        AccessGate::Disabled => gated_routes,
    };

    Router::new()
        .route(endpoints::ROOT, get(get_status))
        .merge(gated_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The status route, reports that the server is up.
async fn get_status() -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "message": "API de transações em execução" })),
    )
        .into_response()
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Rota não encontrada" })),
    )
        .into_response()
}




#[cfg(test)]
mod store_failure_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState,
        auth::AccessGate,
        build_router,
        endpoints::{self, format_endpoint},
        test_utils::FailingTransactionStore,
    };

    fn get_failing_test_server() -> TestServer {
        let state = AppState::new(FailingTransactionStore, AccessGate::Disabled);

        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn store_errors_are_internal_server_errors() {
        let server = get_failing_test_server();
        let transaction = format_endpoint(endpoints::TRANSACTION, 1);
        let body = json!({"descricao": "rent", "valor": 400, "tipo": "saida"});

        let responses = [
            server.get(endpoints::TRANSACTIONS).await,
            server.get(&transaction).await,
            server.post(endpoints::TRANSACTIONS).json(&body).await,
            server.put(&transaction).json(&body).await,
            server.delete(&transaction).await,
            server.get(endpoints::BALANCE).await,
            server.get(endpoints::TOTAL_OUTFLOW).await,
            server.get(endpoints::TOTAL_INFLOW).await,
        ];

        for response in responses {
            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                response.json::<Value>(),
                json!({"error": "Erro interno do servidor"})
            );
        }
    }

    #[tokio::test]
    async fn validation_happens_before_the_store() {
        let server = get_failing_test_server();

        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({"descricao": "rent", "valor": 0, "tipo": "saida"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
