//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{TRANSACTION_COLUMNS, Transaction, TransactionFields, map_transaction_row},
};

/// Stores transactions in a SQLite database.
///
/// The table must have been created with [crate::initialize_db].
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
            tracing::error!("could not acquire the database lock: {error}");
            Error::StoreUnavailable("could not acquire the database lock".to_owned())
        })
    }
}

fn select_by_id(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::ValidationFailed] if `fields` is not a valid transaction,
    /// - or [Error::StoreUnavailable] if there is an SQL error.
    fn create(&self, fields: TransactionFields) -> Result<Transaction, Error> {
        let transaction = fields.validate()?;
        let now = OffsetDateTime::now_utc();

        let transaction = self
            .lock()?
            .prepare(&format!(
                "INSERT INTO \"transaction\" (type, category, value, date, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                params![
                    transaction.kind,
                    transaction.category,
                    transaction.value,
                    transaction.date,
                    transaction.description,
                    now,
                    now,
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve all transactions in the database, newest first.
    ///
    /// # Errors
    /// This function will return a [Error::StoreUnavailable] if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;
        let mut statement = connection.prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" ORDER BY created_at DESC, id DESC"
        ))?;

        statement
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::StoreUnavailable] if there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let connection = self.lock()?;
        select_by_id(id, &connection)
    }

    /// Overwrite all fields of a transaction, keeping its ID and creation time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::ValidationFailed] if `fields` is not a complete, valid transaction,
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::StoreUnavailable] if there is some other SQL error.
    fn replace(&self, id: TransactionId, fields: TransactionFields) -> Result<Transaction, Error> {
        let transaction = fields.validate()?;

        let transaction = self
            .lock()?
            .prepare(&format!(
                "UPDATE \"transaction\"
                 SET type = ?1, category = ?2, value = ?3, date = ?4, description = ?5, updated_at = ?6
                 WHERE id = ?7
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                params![
                    transaction.kind,
                    transaction.category,
                    transaction.value,
                    transaction.date,
                    transaction.description,
                    OffsetDateTime::now_utc(),
                    id,
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Change the fields present in `fields`, keeping the rest.
    ///
    /// The read, validation and write happen in one SQLite transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - [Error::ValidationFailed] if a supplied field is invalid,
    /// - or [Error::StoreUnavailable] if there is some other SQL error.
    fn merge(&self, id: TransactionId, fields: TransactionFields) -> Result<Transaction, Error> {
        let connection = self.lock()?;
        let tx = connection.unchecked_transaction()?;

        let existing = select_by_id(id, &tx)?;
        let transaction = fields.validate_merge(&existing)?;

        let updated = tx
            .prepare(&format!(
                "UPDATE \"transaction\"
                 SET type = ?1, category = ?2, value = ?3, date = ?4, description = ?5, updated_at = ?6
                 WHERE id = ?7
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                params![
                    transaction.kind,
                    transaction.category,
                    transaction.value,
                    transaction.date,
                    transaction.description,
                    OffsetDateTime::now_utc(),
                    id,
                ],
                map_transaction_row,
            )?;

        tx.commit()?;

        Ok(updated)
    }

    /// Delete a transaction from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::StoreUnavailable] if there is some other SQL error.
    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        match rows_affected {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }
}
