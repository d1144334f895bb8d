//! Transaction management for the API.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validation of client supplied fields
//! - The table schema and row mapping used by the SQLite store
//! - Route handlers for listing, reading, creating, editing and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod transactions_endpoint;

pub use core::{
    NewTransaction, ParseTransactionKindError, TRANSACTION_COLUMNS, Transaction,
    TransactionKind, create_transaction_table, map_transaction_row, serialize_amount,
    validate_transaction_body,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use transactions_endpoint::{get_transaction_endpoint, get_transactions_endpoint};
