//! Expense display formatting
//!
//! Fixed-column table and summary lines for terminal output.

use crate::models::Expense;
use crate::services::ExpenseSummary;

/// Message shown whenever the store holds no expenses
pub const NO_EXPENSES: &str = "No expenses found.";

const DESCRIPTION_WIDTH: usize = 20;

/// Format a single expense as a table row
pub fn format_expense_row(expense: &Expense, currency_symbol: &str) -> String {
    format!(
        "{:<5} {:<12} {} {:<10}",
        expense.id.to_string(),
        expense.date.format("%Y-%m-%d").to_string(),
        truncate(&expense.description, DESCRIPTION_WIDTH),
        expense.amount.format_with_symbol(currency_symbol)
    )
}

/// Format expenses as a table, in the order given
pub fn format_expense_table(expenses: &[Expense], currency_symbol: &str) -> String {
    if expenses.is_empty() {
        return format!("{}\n", NO_EXPENSES);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<5} {:<12} {:<20} {:<10}\n",
        "ID", "Date", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(50));
    output.push('\n');

    for expense in expenses {
        output.push_str(format_expense_row(expense, currency_symbol).trim_end());
        output.push('\n');
    }

    output
}

/// Format a summary total
pub fn format_summary(summary: &ExpenseSummary, currency_symbol: &str) -> String {
    let total = summary.total.format_with_symbol(currency_symbol);
    match summary.month {
        Some(month) => format!("Total expenses for month {}: {}", month, total),
        None => format!("Total expenses: {}", total),
    }
}

/// Pad or truncate a string to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
