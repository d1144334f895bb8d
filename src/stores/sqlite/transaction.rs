//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params};

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{
        NewTransaction, TRANSACTION_COLUMNS, Transaction, TransactionKind, map_transaction_row,
    },
};

/// Stores transactions in a SQLite database.
///
/// The table must already exist, see [crate::db::initialize].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Retrieve all transactions, most recent first.
    ///
    /// Transactions recorded within the same millisecond are ordered by
    /// descending ID.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM transacoes
                 ORDER BY data_transacao DESC, id DESC"
            ))?
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM transacoes WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error,
    /// including when a CHECK constraint rejects the values.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(&format!(
                "INSERT INTO transacoes (descricao, valor, tipo)
                 VALUES (?1, ?2, ?3)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                params![transaction.descricao, transaction.valor, transaction.tipo],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Overwrite the description, amount and kind of the transaction `id`.
    ///
    /// The timestamp is left untouched.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn update(
        &self,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        self.lock()?
            .prepare(&format!(
                "UPDATE transacoes
                 SET descricao = ?1, valor = ?2, tipo = ?3
                 WHERE id = ?4
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                params![
                    transaction.descricao,
                    transaction.valor,
                    transaction.tipo,
                    id
                ],
                map_transaction_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
                error => error.into(),
            })
    }

    /// Delete the transaction `id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM transacoes WHERE id = :id", &[(":id", &id)])?;

        match rows_affected {
            0 => Err(Error::DeleteMissingTransaction),
            _ => Ok(()),
        }
    }

    /// Get the sum of inflows minus the sum of outflows.
    ///
    /// Each side is summed on its own and then subtracted, so the result is
    /// exactly `total(Entrada) - total(Saida)` under floating point rounding.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::AmountOverflow] if the result is not a finite number,
    /// - or [Error::SqlError] if there is an SQL error.
    fn balance(&self) -> Result<f64, Error> {
        let balance = self.lock()?.query_row(
            "SELECT COALESCE(SUM(CASE WHEN tipo = 'entrada' THEN valor END), 0.0)
                  - COALESCE(SUM(CASE WHEN tipo = 'saida' THEN valor END), 0.0)
             FROM transacoes",
            [],
            |row| row.get(0),
        )?;

        check_finite(balance)
    }

    /// Get the sum of the amounts of the transactions of `kind`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::AmountOverflow] if the sum is not a finite number,
    /// - or [Error::SqlError] if there is an SQL error.
    fn total(&self, kind: TransactionKind) -> Result<f64, Error> {
        let total = self.lock()?.query_row(
            "SELECT COALESCE(SUM(valor), 0.0) FROM transacoes WHERE tipo = ?1",
            [kind],
            |row| row.get(0),
        )?;

        check_finite(total)
    }
}

/// SQLite sums of REAL values overflow to infinity instead of failing.
fn check_finite(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        tracing::error!("Aggregate amount is not finite: {amount}");
        Err(Error::AmountOverflow)
    }
}
