//! Expense CLI commands
//!
//! Bridges the clap argument definitions with [`ExpenseService`].

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_table, format_summary, NO_EXPENSES};
use crate::error::TrackerResult;
use crate::models::{ExpenseId, Money};
use crate::services::{CreateExpenseInput, ExpenseService, UpdateExpenseInput};
use crate::storage::Storage;

/// Tracker subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ExpenseCommand {
    /// Add a new expense dated today
    Add {
        /// What the money was spent on
        #[arg(short, long)]
        description: String,
        /// Amount spent (e.g. "12.50")
        #[arg(short, long, allow_negative_numbers = true)]
        amount: Money,
    },
    /// Change the description and/or amount of an expense
    Update {
        /// Expense ID
        #[arg(short, long)]
        id: ExpenseId,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long, allow_negative_numbers = true)]
        amount: Option<Money>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        #[arg(short, long)]
        id: ExpenseId,
    },
    /// List all expenses
    List,
    /// Show the total of all expenses, or of one month
    Summary {
        /// Month number (1-12), matched in any year
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Show the most recent entries of the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
}

/// Handle a tracker command
///
/// Validation and not-found errors are printed and swallowed; storage
/// failures are returned to the caller.
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommand,
    today: NaiveDate,
) -> TrackerResult<()> {
    match run(storage, settings, cmd, today) {
        Err(e) if e.is_soft() => {
            println!("{}", e);
            Ok(())
        }
        result => result,
    }
}

fn run(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommand,
    today: NaiveDate,
) -> TrackerResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommand::Add {
            description,
            amount,
        } => {
            let expense = service.add(CreateExpenseInput {
                description,
                amount,
                date: today,
            })?;
            println!("Expense added successfully (ID: {})", expense.id);
        }

        ExpenseCommand::Update {
            id,
            description,
            amount,
        } => {
            let expense = service.update(
                id,
                UpdateExpenseInput {
                    description,
                    amount,
                },
            )?;
            println!("Expense ID {} updated successfully", expense.id);
        }

        ExpenseCommand::Delete { id } => {
            service.delete(id)?;
            println!("Expense deleted successfully");
        }

        ExpenseCommand::List => {
            let expenses = service.list()?;
            print!("{}", format_expense_table(&expenses, symbol));
        }

        ExpenseCommand::Summary { month } => match service.summary(month)? {
            Some(summary) => println!("{}", format_summary(&summary, symbol)),
            None => println!("{}", NO_EXPENSES),
        },

        ExpenseCommand::Audit { count } => print!("{}", format_audit_log(storage, count)?),
    }

    Ok(())
}

fn format_audit_log(storage: &Storage, count: usize) -> TrackerResult<String> {
    let Some(logger) = storage.audit() else {
        return Ok("Audit logging is disabled.\n".to_string());
    };
    if !logger.exists() {
        return Ok("No audit entries found.\n".to_string());
    }

    let entries = logger.read_recent(count)?;
    let mut output = String::new();
    for entry in &entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output.push_str(&format!(
        "\nShowing {} of {} entries\n",
        entries.len(),
        logger.entry_count()?
    ));

    Ok(output)
}
