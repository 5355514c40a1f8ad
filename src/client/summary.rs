//! Totals and filters computed from a list of transactions.

use crate::transaction::{Transaction, TransactionType};

/// The income, expense and balance totals for a list of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    /// The sum of the income transactions.
    pub income: f64,
    /// The sum of the expense transactions.
    pub expenses: f64,
    /// Income minus expenses.
    pub balance: f64,
}

/// Add up `transactions` by type.
///
/// An empty list gives all zeros.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let income = total(transactions, TransactionType::Income);
    let expenses = total(transactions, TransactionType::Expense);

    Summary {
        income,
        expenses,
        balance: income - expenses,
    }
}

fn total(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(|transaction| transaction.value)
        .sum()
}

/// Whether the category of `transaction` contains `filter`, ignoring case.
///
/// An empty filter matches everything.
pub fn matches_category(transaction: &Transaction, filter: &str) -> bool {
    transaction
        .category
        .to_lowercase()
        .contains(&filter.to_lowercase())
}

/// The transactions of type `kind` whose category matches `filter`, in their
/// original order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    kind: TransactionType,
    filter: &str,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind && matches_category(transaction, filter))
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::transaction::{Transaction, TransactionType};

    use super::{Summary, filter_transactions, matches_category, summarize};

    fn transaction(id: i64, kind: TransactionType, category: &str, value: f64) -> Transaction {
        let timestamp = datetime!(2024-01-01 00:00 UTC);

        Transaction {
            id,
            kind,
            category: category.to_owned(),
            value,
            date: timestamp,
            description: String::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            transaction(3, TransactionType::Expense, "Groceries", 120.5),
            transaction(2, TransactionType::Expense, "Rent", 400.0),
            transaction(1, TransactionType::Income, "Salary", 1000.0),
        ]
    }

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn sums_by_type() {
        let summary = summarize(&sample());

        assert_eq!(
            summary,
            Summary {
                income: 1000.0,
                expenses: 520.5,
                balance: 479.5,
            }
        );
    }

    #[test]
    fn only_expenses_gives_negative_balance() {
        let transactions = vec![transaction(1, TransactionType::Expense, "Rent", 400.0)];

        assert_eq!(
            summarize(&transactions),
            Summary {
                income: 0.0,
                expenses: 400.0,
                balance: -400.0,
            }
        );
    }

    #[test]
    fn category_match_ignores_case() {
        let rent = transaction(1, TransactionType::Expense, "Rent", 400.0);

        assert!(matches_category(&rent, "rE"));
        assert!(matches_category(&rent, "ENT"));
        assert!(matches_category(&rent, ""));
        assert!(!matches_category(&rent, "food"));
    }

    #[test]
    fn filters_by_type_and_category() {
        let transactions = sample();

        let got = filter_transactions(&transactions, TransactionType::Expense, "r");

        let ids: Vec<i64> = got.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn filter_does_not_change_totals() {
        let transactions = sample();
        let before = summarize(&transactions);

        let _ = filter_transactions(&transactions, TransactionType::Income, "nothing");

        assert_eq!(summarize(&transactions), before);
    }
}
