//! Plain text rendering of the transactions view.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::{client::view::TransactionsView, transaction::Transaction};

/// Format a number as a dollar amount with two decimal places, e.g. "$1,234.50".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let cents = (number.abs() * 100.0).round() as u64;
    let (whole, fraction) = (cents / 100, cents % 100);
    let is_negative = number < 0.0 && cents > 0;

    let formatter = if is_negative {
        NEGATIVE_FMT.get_or_init(|| whole_dollar_formatter("-$"))
    } else {
        POSITIVE_FMT.get_or_init(|| whole_dollar_formatter("$"))
    };

    // numfmt renders zero as "0" without the prefix.
    let dollars = match formatter {
        Some(formatter) if whole > 0 => formatter.fmt_string(whole as f64),
        _ => format!("{}${whole}", if is_negative { "-" } else { "" }),
    };

    format!("{dollars}.{fraction:02}")
}

fn whole_dollar_formatter(prefix: &str) -> Option<Formatter> {
    Formatter::currency(prefix)
        .map(|formatter| formatter.precision(Precision::Decimals(0)))
        .inspect_err(|error| tracing::error!("Could not create currency formatter: {error:?}"))
        .ok()
}

/// Render the totals followed by the filtered income and expense tables.
///
/// The most recent error, if any, is shown first.
pub fn render_report<A>(view: &TransactionsView<A>) -> String {
    let mut lines = Vec::new();

    if let Some(error) = view.error() {
        lines.push(format!("Error: {error}"));
        lines.push(String::new());
    }

    let summary = view.summary();
    lines.push(format!("Income:   {}", format_currency(summary.income)));
    lines.push(format!("Expenses: {}", format_currency(summary.expenses)));
    lines.push(format!("Balance:  {}", format_currency(summary.balance)));

    let filter_note = if view.category_filter.is_empty() {
        String::new()
    } else {
        format!(" (category contains \"{}\")", view.category_filter)
    };

    lines.push(String::new());
    lines.push(format!("Income{filter_note}"));
    push_rows(&mut lines, &view.filtered_income());

    lines.push(String::new());
    lines.push(format!("Expenses{filter_note}"));
    push_rows(&mut lines, &view.filtered_expenses());

    lines.join("\n")
}

fn push_rows(lines: &mut Vec<String>, transactions: &[&Transaction]) {
    if transactions.is_empty() {
        lines.push("  (none)".to_owned());
        return;
    }

    for transaction in transactions {
        let mut row = format!(
            "  #{:<4} {}  {:<16} {:>14}",
            transaction.id,
            transaction.date.date(),
            transaction.category,
            format_currency(transaction.value)
        );

        if !transaction.description.is_empty() {
            row.push_str("  ");
            row.push_str(&transaction.description);
        }

        lines.push(row);
    }
}
