//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{NewTransaction, Transaction, TransactionKind},
};

/// Handles the creation, retrieval, modification and aggregation of transactions.
///
/// Each method maps to a single statement against the backing store, so each
/// call is atomic on its own and no call depends on another.
pub trait TransactionStore {
    /// Retrieve all transactions, most recent first.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve a transaction by its `id`.
    ///
    /// Implementers should return [Error::NotFound] if `id` does not refer to
    /// a stored transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Store a new transaction and return it with its assigned ID and timestamp.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Overwrite the description, amount and kind of the transaction `id`.
    ///
    /// Implementers should return [Error::UpdateMissingTransaction] if `id`
    /// does not refer to a stored transaction.
    fn update(&self, id: TransactionId, transaction: NewTransaction)
    -> Result<Transaction, Error>;

    /// Remove the transaction `id`.
    ///
    /// Implementers should return [Error::DeleteMissingTransaction] if `id`
    /// does not refer to a stored transaction.
    fn delete(&self, id: TransactionId) -> Result<(), Error>;

    /// The sum of all inflows minus the sum of all outflows, zero if there are
    /// no transactions.
    fn balance(&self) -> Result<f64, Error>;

    /// The sum of the amounts of all transactions of `kind`, zero if there are
    /// none.
    fn total(&self, kind: TransactionKind) -> Result<f64, Error>;
}
