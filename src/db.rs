//! Sets up the application's SQLite database.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::transaction::create_transaction_table;

/// Create the tables and indexes for the domain models if they do not exist yet.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Close the shared database connection once the server has stopped.
///
/// The connection is only closed if `connection` is the last reference to it,
/// otherwise it is closed when the last reference is dropped. Failures are
/// logged since there is nothing left to do about them at shutdown.
pub fn close_connection(connection: Arc<Mutex<Connection>>) {
    let connection = match Arc::try_unwrap(connection) {
        Ok(connection) => connection,
        Err(_) => {
            tracing::warn!("Database connection is still in use and will be closed when dropped.");
            return;
        }
    };

    let connection = match connection.into_inner() {
        Ok(connection) => connection,
        Err(poisoned) => {
            tracing::warn!("Database lock was poisoned, closing the connection anyway.");
            poisoned.into_inner()
        }
    };

    match connection.close() {
        Ok(()) => tracing::info!("Database connection closed."),
        Err((_, error)) => tracing::warn!("Could not close the database connection: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use super::{close_connection, initialize};

    #[test]
    fn close_connection_with_outstanding_reference_leaves_it_open() {
        let connection = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        let other = connection.clone();

        close_connection(connection);

        let connection = other.lock().unwrap();
        assert_eq!(initialize(&connection), Ok(()));
    }

    #[test]
    fn close_last_connection() {
        let connection = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));

        close_connection(connection);
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        assert_eq!(initialize(&connection), Ok(()));
        assert_eq!(initialize(&connection), Ok(()));
    }
}
