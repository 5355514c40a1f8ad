//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    stores::TransactionStore,
    transaction::{Transaction, TransactionFields},
};

/// A route handler for creating a new transaction, responds with the stored
/// transaction and the status code 201.
///
/// # Errors
/// Responds with 400 if the body is malformed or a field is invalid.
pub async fn create_transaction_endpoint<T>(
    State(state): State<AppState<T>>,
    payload: Result<Json<TransactionFields>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let fields = fields_from_payload(payload)?;

    let transaction = state
        .transaction_store
        .create(fields)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Unwrap the JSON body of a request, turning a rejection into an [Error::MalformedBody].
pub(super) fn fields_from_payload(
    payload: Result<Json<TransactionFields>, JsonRejection>,
) -> Result<TransactionFields, Error> {
    payload
        .map(|Json(fields)| fields)
        .map_err(|rejection| Error::MalformedBody(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        stores::TransactionStore,
        test_utils::{get_test_server, salary_fields},
        transaction::{Transaction, TransactionType},
    };

    #[tokio::test]
    async fn can_create_transaction() {
        let (server, state) = get_test_server();

        let response = server.post(endpoints::TRANSACTIONS).json(&salary_fields()).await;

        response.assert_status(StatusCode::CREATED);
        let created: Transaction = response.json();
        assert_eq!(created.kind, TransactionType::Income);
        assert_eq!(created.category, "Salary");
        assert_eq!(created.value, 1000.0);
        assert_eq!(created.description, "");
        assert_eq!(state.transaction_store.get(created.id), Ok(created));
    }

    #[tokio::test]
    async fn create_with_negative_value_is_bad_request() {
        let (server, state) = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "type": "expense",
                "category": "Rent",
                "value": -400,
                "date": "2024-01-02",
            }))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["details"][0]["field"], "value");
        assert_eq!(state.transaction_store.get_all(), Ok(vec![]));
    }

    #[tokio::test]
    async fn create_with_wrong_json_type_is_bad_request() {
        let (server, _) = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "type": "expense",
                "category": "Rent",
                "value": "four hundred",
                "date": "2024-01-02",
            }))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["error"].as_str().is_some());
    }
}
