//! A client for the transactions API that keeps a local copy of the
//! collection and derives income, expense and balance totals from it.
//!
//! The store is the source of truth: after every change the view fetches the
//! whole list again instead of patching its local copy.

mod api;
mod render;
mod summary;
mod view;

pub use api::{ApiClient, ClientError, TransactionApi};
pub use render::{format_currency, render_report};
pub use summary::{Summary, filter_transactions, matches_category, summarize};
pub use view::{DraftTransaction, TransactionsView};
