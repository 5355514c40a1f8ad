//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions on the server:
//! - The `Transaction` model and its database mapping
//! - `TransactionFields` and the validation run before every write
//! - The route handlers for the `/transacoes` endpoints

mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod fields;
mod get_endpoint;
mod models;

pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{DeleteAcknowledgement, delete_transaction_endpoint};
pub use edit_endpoint::{merge_transaction_endpoint, replace_transaction_endpoint};
pub use fields::{
    FieldViolation, MIN_CATEGORY_LENGTH, TransactionFields, ValidTransaction, ValidationErrors,
    parse_date,
};
pub use get_endpoint::{get_transaction_endpoint, list_transactions_endpoint};
pub use models::{
    ParseTransactionTypeError, TRANSACTION_COLUMNS, Transaction, TransactionType,
    create_transaction_table, map_transaction_row,
};
