//! Display formatting for terminal output

pub mod expense;

pub use expense::{format_expense_row, format_expense_table, format_summary, NO_EXPENSES};
