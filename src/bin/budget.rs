use std::{path::PathBuf, process::exit};

use clap::{Parser, Subcommand};

use budget_tracker::{
    Error, MonthlyReport, db, format_rupiah,
    models::Transaction,
    setup_logging,
    stores::sqlite::{SQLiteBudgetTracker, create_budget_tracker},
};

/// Record income and expenses and see where the money went.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "BUDGET_DB_PATH", default_value = "budget.db")]
    db_path: String,

    /// The canonical name of the local timezone, e.g. "Asia/Jakarta".
    #[arg(long, env = "BUDGET_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// Also write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record money earned.
    Income {
        /// The amount earned.
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// The category to file the income under.
        category: String,
    },
    /// Record money spent.
    Expense {
        /// The amount spent.
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// The category to file the expense under.
        category: String,
    },
    /// Manage categories.
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Show the balance of all income minus all expenses.
    Balance,
    /// Show the totals and transactions of a month.
    Report {
        /// The month (1-12), defaults to the current month.
        #[arg(long)]
        month: Option<u8>,
        /// The year, defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List every transaction.
    History {
        /// Print the transactions as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    /// Add a category.
    Add {
        /// The category name.
        name: String,
    },
    /// Remove the oldest category with this name.
    Remove {
        /// The category name.
        name: String,
    },
    /// List the categories.
    List,
}

fn main() {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        eprintln!("Could not set up logging: {error}");
        exit(1);
    }

    if let Err(error) = run(args) {
        eprintln!("Error: {error}");
        exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let connection = db::open(&args.db_path)?;
    let mut tracker = create_budget_tracker(connection, &args.timezone)?;

    match args.command {
        Command::Income { amount, category } => {
            let transaction = tracker.record_income(&amount, &category)?;
            println!("Income added: {}", format_rupiah(transaction.amount));
            print_balance(&tracker)?;
        }
        Command::Expense { amount, category } => {
            let transaction = tracker.record_expense(&amount, &category)?;
            println!("Expense added: {}", format_rupiah(transaction.amount));
            print_balance(&tracker)?;
        }
        Command::Category(CategoryCommand::Add { name }) => {
            tracker.add_category(&name)?;
            println!("Category added: {name}");
        }
        Command::Category(CategoryCommand::Remove { name }) => {
            if tracker.remove_category(&name)? {
                println!("Category removed: {name}");
            } else {
                println!("No category called {name}");
            }
        }
        Command::Category(CategoryCommand::List) => {
            for category in tracker.categories()? {
                println!("{}", category.name);
            }
        }
        Command::Balance => print_balance(&tracker)?,
        Command::Report { month, year, json } => {
            let now = tracker.now();
            let month = month.unwrap_or_else(|| now.month().into());
            let year = year.unwrap_or_else(|| now.year());
            let report = tracker.monthly_report(month, year)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
                print_balance(&tracker)?;
            }
        }
        Command::History { json } => {
            let transactions = tracker.history()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&transactions)?);
            } else {
                print_transactions(&transactions);
            }
        }
    }

    Ok(())
}

fn print_balance(tracker: &SQLiteBudgetTracker) -> Result<(), Error> {
    println!("Balance: {}", format_rupiah(tracker.current_balance()?));

    Ok(())
}

fn print_report(report: &MonthlyReport) {
    println!("Monthly Report: {} {}", report.month, report.year);
    println!();
    print_transactions(&report.records);
    println!();
    println!("Total Income:  {}", format_rupiah(report.total_income));
    println!("Total Expense: {}", format_rupiah(report.total_expense));
    println!(
        "Income vs Expenses: {:.1}% / {:.1}%",
        report.income_share(),
        report.expense_share()
    );
}

fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions.");
        return;
    }

    println!("{:<10}  {:<7}  {:<20}  {:>20}", "Date", "Kind", "Category", "Amount");

    for transaction in transactions {
        println!(
            "{:<10}  {:<7}  {:<20}  {:>20}",
            transaction.date.date().to_string(),
            transaction.kind.to_string(),
            transaction.category.as_ref(),
            format_rupiah(transaction.amount)
        );
    }
}
