//! Defines the endpoints for replacing (PUT) and merging (PATCH) a transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    AppState, Error,
    database_id::parse_transaction_id,
    stores::TransactionStore,
    transaction::{Transaction, TransactionFields, create_endpoint::fields_from_payload},
};

/// A route handler for overwriting every field of a transaction.
///
/// Fields missing from the body are not kept, so the body must be a complete
/// transaction.
pub async fn replace_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    Path(transaction_id): Path<String>,
    payload: Result<Json<TransactionFields>, JsonRejection>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let id = parse_transaction_id(&transaction_id)?;
    let fields = fields_from_payload(payload)?;

    state
        .transaction_store
        .replace(id, fields)
        .inspect_err(|error| tracing::error!("could not replace transaction {id}: {error}"))
        .map(Json)
}

/// A route handler for changing only the fields present in the body.
pub async fn merge_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    Path(transaction_id): Path<String>,
    payload: Result<Json<TransactionFields>, JsonRejection>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let id = parse_transaction_id(&transaction_id)?;
    let fields = fields_from_payload(payload)?;

    state
        .transaction_store
        .merge(id, fields)
        .inspect_err(|error| tracing::error!("could not update transaction {id}: {error}"))
        .map(Json)
}
