//! Application router configuration.

use axum::{
    Json, Router,
    http::{
        HeaderValue, Method, StatusCode, Uri,
        header::{AUTHORIZATION, CONTENT_TYPE, InvalidHeaderValue},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    stores::TransactionStore,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        list_transactions_endpoint, merge_transaction_endpoint, replace_transaction_endpoint,
    },
};

/// The message served from the root route.
pub const STATUS_MESSAGE: &str = "cashbook API is running";

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::ROOT, get(get_status))
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint::<T>).post(create_transaction_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<T>)
                .put(replace_transaction_endpoint::<T>)
                .patch(merge_transaction_endpoint::<T>)
                .delete(delete_transaction_endpoint::<T>),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Create the CORS layer that only lets `allowed_origin` call the API.
///
/// Credentials are not forwarded.
///
/// # Errors
/// Returns an error if `allowed_origin` is not a valid header value.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(allowed_origin)?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(false))
}

/// The root path '/' reports that the API is up.
async fn get_status() -> Json<Value> {
    Json(json!({ "msg": STATUS_MESSAGE }))
}

async fn get_404_not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("no route for {uri}") })),
    )
        .into_response()
}
