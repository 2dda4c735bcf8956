use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Date, Duration, Month, Time};

use budget_tracker::{
    db,
    models::{CategoryName, Transaction, TransactionKind},
    setup_logging,
    stores::{TransactionStore, sqlite::create_budget_tracker},
};

/// A utility for creating a test database for the budget tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The year to create three months of sample transactions for.
    #[arg(long, default_value_t = 2024)]
    year: i32,
}

const CATEGORIES: [&str; 5] = ["Salary", "Food", "Rent", "Transport", "Entertainment"];

/// The sample transactions of each month as (kind, amount, category, day of month).
const MONTHLY_TRANSACTIONS: [(TransactionKind, f64, &str, u8); 6] = [
    (TransactionKind::Income, 8_500_000.0, "Salary", 1),
    (TransactionKind::Expense, 3_000_000.0, "Rent", 2),
    (TransactionKind::Expense, 450_000.0, "Food", 5),
    (TransactionKind::Expense, 120_000.0, "Transport", 9),
    (TransactionKind::Expense, 275_500.0, "Entertainment", 17),
    (TransactionKind::Expense, 612_250.0, "Food", 28),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    setup_logging(None)?;

    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = db::open(&args.output_path)?;
    let mut tracker = create_budget_tracker(conn, "Etc/UTC")?;

    println!("Creating categories...");
    for name in CATEGORIES {
        tracker.add_category(name)?;
    }

    println!("Creating transactions...");
    for month in [Month::October, Month::November, Month::December] {
        for (kind, amount, category, day) in MONTHLY_TRANSACTIONS {
            let date = Date::from_calendar_date(args.year, month, day)?
                .with_time(Time::from_hms(12, 0, 0)?)
                + Duration::minutes(i64::from(day));

            tracker.transaction_store_mut().create(Transaction::build(
                kind,
                amount,
                CategoryName::new(category)?,
                date,
            ))?;
        }
    }

    println!("Success!");

    Ok(())
}
