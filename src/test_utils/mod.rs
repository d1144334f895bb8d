#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    auth::AccessGate,
    database_id::TransactionId,
    stores::{
        TransactionStore,
        sqlite::{SQLAppState, create_app_state},
    },
    transaction::{NewTransaction, Transaction, TransactionKind},
};

/// An [SQLAppState] backed by an initialized in-memory database, with the access gate disabled.
pub(crate) fn must_create_test_state() -> SQLAppState {
    must_create_test_state_with_gate(AccessGate::Disabled)
}

pub(crate) fn must_create_test_state_with_gate(access_gate: AccessGate) -> SQLAppState {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");

    create_app_state(Arc::new(Mutex::new(connection)), access_gate)
        .expect("could not initialize test DB")
}

pub(crate) fn new_transaction(descricao: &str, valor: f64, tipo: TransactionKind) -> NewTransaction {
    NewTransaction {
        descricao: descricao.to_owned(),
        valor,
        tipo,
    }
}

/// A store where every operation fails as if the database were unreachable.
#[derive(Debug, Clone)]
pub(crate) struct FailingTransactionStore;

impl TransactionStore for FailingTransactionStore {
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get(&self, _: TransactionId) -> Result<Transaction, Error> {
        Err(Error::DatabaseLockError)
    }

    fn create(&self, _: NewTransaction) -> Result<Transaction, Error> {
        Err(Error::DatabaseLockError)
    }

    fn update(&self, _: TransactionId, _: NewTransaction) -> Result<Transaction, Error> {
        Err(Error::DatabaseLockError)
    }

    fn delete(&self, _: TransactionId) -> Result<(), Error> {
        Err(Error::DatabaseLockError)
    }

    fn balance(&self) -> Result<f64, Error> {
        Err(Error::DatabaseLockError)
    }

    fn total(&self, _: TransactionKind) -> Result<f64, Error> {
        Err(Error::DatabaseLockError)
    }
}
