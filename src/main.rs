use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use expense_tracker::cli::{handle_expense_command, ExpenseCommand};
use expense_tracker::config::paths::DATA_DIR_ENV;
use expense_tracker::config::{Settings, TrackerPaths};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense-tracker",
    version,
    about = "Simple Expense Tracker",
    long_about = "Record, edit, list and total personal expenses. All data lives \
                  in a single expenses.json file in the data directory."
)]
struct Cli {
    /// Directory holding expenses.json, config.json and audit.log
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<ExpenseCommand>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let paths = TrackerPaths::resolve(cli.data_dir)?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths, &settings)?;

    let today = chrono::Local::now().date_naive();
    handle_expense_command(&storage, &settings, command, today)?;

    Ok(())
}
