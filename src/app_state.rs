//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{auth::AccessGate, stores::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
    /// Whether requests must carry the shared API key.
    pub access_gate: AccessGate,
}

impl<T> AppState<T>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    /// Create a new [AppState].
    pub fn new(transaction_store: T, access_gate: AccessGate) -> Self {
        Self {
            transaction_store,
            access_gate,
        }
    }
}

/// The state needed to read, write or aggregate transactions.
#[derive(Debug, Clone)]
pub struct TransactionState<T>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<T> FromRef<AppState<T>> for TransactionState<T>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}
