//! Contains convenience type alias and function for [AppState] that uses
//! the SQLite backend.

pub mod transaction;

pub use transaction::SQLiteTransactionStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, Error, auth::AccessGate, db::initialize};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(
    db_connection: Arc<Mutex<Connection>>,
    access_gate: AccessGate,
) -> Result<SQLAppState, Error> {
    {
        let connection = db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;
        initialize(&connection)?;
    }

    let transaction_store = SQLiteTransactionStore::new(db_connection);

    Ok(AppState::new(transaction_store, access_gate))
}
