//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, database_id::parse_transaction_id, stores::TransactionStore,
};

/// The body sent back after a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAcknowledgement {
    /// Always true.
    pub ok: bool,
}

/// A route handler for deleting a transaction, responds with `{"ok": true}`.
pub async fn delete_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<DeleteAcknowledgement>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let id = parse_transaction_id(&transaction_id)?;

    state
        .transaction_store
        .delete(id)
        .inspect_err(|error| tracing::error!("Could not delete transaction {id}: {error}"))?;

    Ok(Json(DeleteAcknowledgement { ok: true }))
}
