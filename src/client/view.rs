//! The state behind the transactions screen.

use crate::{
    TransactionId,
    client::{
        api::TransactionApi,
        summary::{Summary, filter_transactions, summarize},
    },
    transaction::{Transaction, TransactionFields, TransactionType},
};

/// The "new transaction" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftTransaction {
    /// Income or expense, unset until the user picks one.
    pub kind: Option<TransactionType>,
    /// The category as typed.
    pub category: String,
    /// The amount, unset until the user enters one.
    pub value: Option<f64>,
    /// The date as typed, e.g. "2024-01-01".
    pub date: String,
    /// An optional note.
    pub description: String,
}

impl DraftTransaction {
    /// Whether type, category, value and date have all been filled in.
    ///
    /// This only checks that something was entered. Ranges and formats are
    /// checked by the API.
    pub fn is_complete(&self) -> bool {
        self.kind.is_some()
            && !self.category.is_empty()
            && self.value.is_some()
            && !self.date.is_empty()
    }

    /// The fields to send to the API, or `None` if the draft is incomplete.
    pub fn to_fields(&self) -> Option<TransactionFields> {
        if !self.is_complete() {
            return None;
        }

        Some(TransactionFields {
            kind: self.kind.map(|kind| kind.to_string()),
            category: Some(self.category.clone()),
            value: self.value,
            date: Some(self.date.clone()),
            description: Some(self.description.clone()),
        })
    }
}

/// A local copy of the transaction list plus the totals derived from it.
///
/// The copy is refreshed from the API after every change, so it always
/// matches the store as of the last successful load.
#[derive(Debug)]
pub struct TransactionsView<A> {
    api: A,
    transactions: Vec<Transaction>,
    summary: Summary,
    error: Option<String>,
    loading: bool,
    saving: bool,
    /// Only transactions whose category contains this text are listed.
    /// Does not affect the totals.
    pub category_filter: String,
    /// The form for the next transaction to create.
    pub draft: DraftTransaction,
}

impl<A> TransactionsView<A>
where
    A: TransactionApi,
{
    /// Create an empty view. Call [TransactionsView::load] to fetch the list.
    pub fn new(api: A) -> Self {
        Self {
            api,
            transactions: Vec::new(),
            summary: Summary::default(),
            error: None,
            loading: false,
            saving: false,
            category_filter: String::new(),
            draft: DraftTransaction::default(),
        }
    }

    /// Fetch the full list from the API and recompute the totals.
    ///
    /// On failure the previous list is kept and the error is recorded.
    pub async fn load(&mut self) {
        self.loading = true;

        match self.api.list().await {
            Ok(transactions) => {
                self.summary = summarize(&transactions);
                self.transactions = transactions;
            }
            Err(error) => {
                tracing::error!("Could not load transactions: {error}");
                self.error = Some(format!("failed to load: {error}"));
            }
        }

        self.loading = false;
    }

    /// Send the draft to the API, then clear it and reload the list.
    ///
    /// An incomplete draft is ignored. If the API rejects the draft, it is
    /// kept so the user can fix it.
    pub async fn submit_draft(&mut self) {
        let Some(fields) = self.draft.to_fields() else {
            return;
        };

        self.saving = true;

        match self.api.create(&fields).await {
            Ok(_) => {
                self.draft = DraftTransaction::default();
                self.saving = false;
                self.load().await;
            }
            Err(error) => {
                tracing::error!("Could not create transaction: {error}");
                self.error = Some(format!("failed to create: {error}"));
                self.saving = false;
            }
        }
    }

    /// Delete a transaction and reload the list.
    pub async fn delete(&mut self, id: TransactionId) {
        match self.api.delete(id).await {
            Ok(()) => self.load().await,
            Err(error) => {
                tracing::error!("Could not delete transaction {id}: {error}");
                self.error = Some(format!("failed to delete: {error}"));
            }
        }
    }

    /// Change the fields set in `fields` and reload the list.
    pub async fn update(&mut self, id: TransactionId, fields: &TransactionFields) {
        match self.api.update(id, fields).await {
            Ok(_) => self.load().await,
            Err(error) => {
                tracing::error!("Could not update transaction {id}: {error}");
                self.error = Some(format!("failed to update: {error}"));
            }
        }
    }
}

impl<A> TransactionsView<A> {
    /// Every transaction, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Totals over every transaction, ignoring the category filter.
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// The most recent error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the list is being fetched.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the draft is being sent.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// All income transactions.
    pub fn income(&self) -> Vec<&Transaction> {
        filter_transactions(&self.transactions, TransactionType::Income, "")
    }

    /// All expense transactions.
    pub fn expenses(&self) -> Vec<&Transaction> {
        filter_transactions(&self.transactions, TransactionType::Expense, "")
    }

    /// Income transactions that match the category filter.
    pub fn filtered_income(&self) -> Vec<&Transaction> {
        filter_transactions(
            &self.transactions,
            TransactionType::Income,
            &self.category_filter,
        )
    }

    /// Expense transactions that match the category filter.
    pub fn filtered_expenses(&self) -> Vec<&Transaction> {
        filter_transactions(
            &self.transactions,
            TransactionType::Expense,
            &self.category_filter,
        )
    }
}
