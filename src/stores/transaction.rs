//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionFields},
};

/// Handles the creation, retrieval, update and deletion of transactions.
///
/// Implementers must validate fields with [TransactionFields::validate] or
/// [TransactionFields::validate_merge] before every write, and a failed
/// operation must leave the store unchanged.
pub trait TransactionStore {
    /// Validate `fields` and store them as a new transaction.
    ///
    /// # Errors
    /// Returns [Error::ValidationFailed] if a field is missing or invalid.
    fn create(&self, fields: TransactionFields) -> Result<Transaction, Error>;

    /// Retrieve every transaction, most recently created first.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve a transaction by its `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a stored transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Overwrite every field of the transaction `id` with `fields`.
    ///
    /// Fields absent from `fields` are not kept: `fields` must be a complete
    /// transaction. The ID and creation time are preserved.
    ///
    /// # Errors
    /// Returns [Error::NotFound] or [Error::ValidationFailed].
    fn replace(&self, id: TransactionId, fields: TransactionFields) -> Result<Transaction, Error>;

    /// Change only the fields present in `fields` on the transaction `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] or [Error::ValidationFailed].
    fn merge(&self, id: TransactionId, fields: TransactionFields) -> Result<Transaction, Error>;

    /// Remove the transaction `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there was nothing to delete.
    fn delete(&self, id: TransactionId) -> Result<(), Error>;
}
