//! Defines the endpoints for reading transactions.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    database_id::parse_transaction_id,
    stores::TransactionStore,
    transaction::Transaction,
};

/// A route handler for listing every transaction, newest first.
pub async fn list_transactions_endpoint<T>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    state.transaction_store.get_all().map(Json)
}

/// A route handler for getting a transaction by its ID.
///
/// Responds with 400 if the ID is malformed and 404 if no transaction has
/// that ID.
pub async fn get_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let id = parse_transaction_id(&transaction_id)?;

    state.transaction_store.get(id).map(Json)
}
