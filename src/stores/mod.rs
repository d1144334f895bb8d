//! Contains traits and implementations for objects that store the domain models.

mod transaction;

pub mod sqlite;

pub use transaction::TransactionStore;
