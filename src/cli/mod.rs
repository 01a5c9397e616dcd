use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::LedgerService;
use crate::domain::{format_amount, parse_amount, Kind, KindFilter, Totals, Transaction};
use crate::io::Exporter;

/// Tally - Income & Expense Tracker
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "A local-first tracker for personal income and expenses")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "tally.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new transaction
    Add {
        /// Amount in currency units (e.g., "50.00" or "50")
        amount: String,

        /// Description of the transaction
        #[arg(short, long)]
        description: String,

        /// Kind: income or expense
        #[arg(short, long, default_value = "income")]
        kind: String,

        /// When the transaction occurred (YYYY-MM-DD or YYYY-MM-DDTHH:MM, defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// List transactions, most recent first
    List {
        /// Show only one kind: all, income, expense
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Show the current balance with income and expense totals
    Balance,

    /// Export the ledger to CSV or JSON
    Export {
        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut service = LedgerService::open(&self.database).await?;

        match self.command {
            Commands::Add {
                amount,
                description,
                kind,
                date,
            } => {
                let amount =
                    parse_amount(&amount).context("Invalid amount format. Use '50.00' or '50'")?;

                let kind = Kind::from_str(&kind)
                    .with_context(|| format!("Unknown kind '{}'. Use 'income' or 'expense'", kind))?;

                let occurred_at = date
                    .map(|date_str| parse_datetime(&date_str))
                    .transpose()?;

                let transaction = service
                    .add_transaction(&description, amount, kind, occurred_at)
                    .await?;

                println!(
                    "Recorded {}: {} {} ({})",
                    transaction.kind.as_str(),
                    format_signed_amount(&transaction),
                    transaction.description,
                    transaction.id
                );
            }

            Commands::List { filter } => {
                let filter = KindFilter::from_str(&filter).with_context(|| {
                    format!("Unknown filter '{}'. Use 'all', 'income' or 'expense'", filter)
                })?;

                run_list_command(&service, filter);
            }

            Commands::Delete { id } => {
                let id = Uuid::parse_str(&id)
                    .context("Invalid transaction ID format (expected UUID)")?;

                let removed = service.delete_transaction(id).await?;
                println!(
                    "Deleted {}: {} {}",
                    removed.kind.as_str(),
                    format_amount(removed.amount),
                    removed.description
                );
            }

            Commands::Balance => {
                print_totals(&service.totals());
            }

            Commands::Export { format, output } => {
                run_export_command(&service, &format, output)?;
            }
        }

        Ok(())
    }
}

fn run_list_command(service: &LedgerService, filter: KindFilter) {
    let transactions = service.list_transactions(filter);
    if transactions.is_empty() {
        println!("No transactions found");
        return;
    }

    for transaction in &transactions {
        println!(
            "{}  {:>12}  {}  [{}]",
            transaction.occurred_at.format("%Y-%m-%d %H:%M"),
            format_signed_amount(transaction),
            transaction.description,
            transaction.id
        );
    }
}

fn print_totals(totals: &Totals) {
    println!("Balance: {}", format_amount(totals.balance));
    println!("  Income:  +{}", format_amount(totals.total_income));
    println!("  Expense: -{}", format_amount(totals.total_expense));
}

fn run_export_command(service: &LedgerService, format: &str, output: Option<String>) -> Result<()> {
    let exporter = Exporter::new(service);

    match output {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create output file '{}'", path))?;
            let count = write_export(&exporter, format, file)?;
            println!("Exported {} transaction(s) to {}", count, path);
        }
        None => {
            write_export(&exporter, format, std::io::stdout())?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(exporter: &Exporter, format: &str, writer: W) -> Result<usize> {
    match format {
        "csv" => exporter.export_csv(writer),
        "json" => exporter.export_json(writer),
        other => anyhow::bail!("Unknown export format '{}'. Use 'csv' or 'json'", other),
    }
}

/// Amount prefixed with + for income and - for expense, like the list view.
fn format_signed_amount(transaction: &Transaction) -> String {
    let sign = match transaction.kind {
        Kind::Income => '+',
        Kind::Expense => '-',
    };
    format!("{}{}", sign, format_amount(transaction.amount))
}

/// Parse a user-supplied occurrence time: minute precision or a bare date
/// (midnight UTC).
fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M") {
        return Ok(naive.and_utc());
    }

    let naive_date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .context("Date must be in YYYY-MM-DD or YYYY-MM-DDTHH:MM format")?;

    let naive_datetime = naive_date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid date"))?;

    Ok(DateTime::from_naive_utc_and_offset(naive_datetime, Utc))
}
