use chrono::{DateTime, Utc};

use crate::domain::{
    compute_totals, filtered_view, Amount, Kind, KindFilter, Totals, Transaction, TransactionId,
};
use crate::storage::Repository;

use super::AppError;

/// Application service owning the ledger state.
/// This is the primary interface for any client (CLI, TUI, etc.): it loads
/// the persisted record sequence once at open, keeps it in memory in
/// insertion order, and rewrites the durable slot wholesale after every
/// successful mutation. Derived views (totals, filtered list) are recomputed
/// on every read.
pub struct LedgerService {
    repo: Repository,
    records: Vec<Transaction>,
}

impl LedgerService {
    /// Create a service from an already-initialized repository, loading the
    /// persisted records.
    pub async fn load(repo: Repository) -> Result<Self, AppError> {
        let records = repo.load_transactions().await?;
        Ok(Self { repo, records })
    }

    /// Open the ledger database at the given path, creating it if needed,
    /// and load the persisted records. An absent or unreadable slot starts
    /// the ledger empty.
    pub async fn open(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Self::load(repo).await
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    /// Record a new transaction at the end of the ledger.
    /// `occurred_at` defaults to now when omitted. Rejected input appends
    /// nothing and persists nothing.
    pub async fn add_transaction(
        &mut self,
        description: &str,
        amount: Amount,
        kind: Kind,
        occurred_at: Option<DateTime<Utc>>,
    ) -> Result<Transaction, AppError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::EmptyDescription);
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::InvalidAmount(amount.to_string()));
        }

        let mut transaction = Transaction::new(description, amount, kind);
        if let Some(occurred_at) = occurred_at {
            transaction = transaction.with_occurred_at(occurred_at);
        }

        self.records.push(transaction.clone());
        self.repo.save_transactions(&self.records).await?;
        Ok(transaction)
    }

    /// Delete a transaction by id. Returns the removed record.
    pub async fn delete_transaction(
        &mut self,
        id: TransactionId,
    ) -> Result<Transaction, AppError> {
        let position = self
            .records
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| AppError::TransactionNotFound(id.to_string()))?;

        let removed = self.records.remove(position);
        self.repo.save_transactions(&self.records).await?;
        Ok(removed)
    }

    /// The display view: records matching the filter, most recent first.
    pub fn list_transactions(&self, filter: KindFilter) -> Vec<Transaction> {
        filtered_view(&self.records, filter)
    }

    /// Aggregate totals over the whole ledger, recomputed on every call.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.records)
    }
}
