//! Database ID type definition.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The database ID of a [Transaction](crate::transaction::Transaction).
pub type TransactionId = DatabaseId;
