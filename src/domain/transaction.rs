use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

pub type TransactionId = Uuid;

/// Classification of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Kind::Income),
            "expense" => Some(Kind::Expense),
            _ => None,
        }
    }
}

/// A single recorded income or expense event.
/// Transactions are immutable - the only mutation the ledger supports is
/// deletion by id.
///
/// The serialized form is the persisted slot format: `type` carries the kind
/// and `dateTime` the occurrence time as epoch milliseconds. Records written
/// before ids existed get a fresh id assigned on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: TransactionId,
    /// Human-readable description, non-empty
    pub description: String,
    /// Amount in currency units (always positive)
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: Kind,
    /// When the transaction occurred, as picked by the user
    #[serde(rename = "dateTime", with = "chrono::serde::ts_milliseconds")]
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction occurring now.
    pub fn new(description: impl Into<String>, amount: Amount, kind: Kind) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            kind,
            occurred_at: Utc::now(),
        }
    }

    /// Override the occurrence time (backdated or user-picked entries).
    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn test_create_transaction() {
        let tx = Transaction::new("Salary", 1000.0, Kind::Income).with_occurred_at(at(1_000));

        assert_eq!(tx.description, "Salary");
        assert_eq!(tx.amount, 1000.0);
        assert_eq!(tx.kind, Kind::Income);
        assert_eq!(tx.occurred_at, at(1_000));
    }

    #[test]
    fn test_wire_format_field_names() {
        let tx = Transaction::new("Salary", 1000.0, Kind::Income)
            .with_occurred_at(at(1_700_000_000_000));

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["description"], "Salary");
        assert_eq!(json["amount"], 1000.0);
        assert_eq!(json["type"], "income");
        assert_eq!(json["dateTime"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_load_record_without_id_assigns_one() {
        // Slot values written before ids existed
        let json = r#"{"description":"Rent","amount":400,"type":"expense","dateTime":1700000000000}"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.description, "Rent");
        assert_eq!(tx.amount, 400.0);
        assert_eq!(tx.kind, Kind::Expense);
        assert_eq!(tx.occurred_at, at(1_700_000_000_000));
    }

    #[test]
    fn test_round_trip_preserves_sequence() {
        let records = vec![
            Transaction::new("Salary", 1000.0, Kind::Income).with_occurred_at(at(1_000)),
            Transaction::new("Rent", 400.0, Kind::Expense).with_occurred_at(at(2_000)),
        ];

        let json = serde_json::to_string(&records).unwrap();
        let loaded: Vec<Transaction> = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(Kind::from_str("income"), Some(Kind::Income));
        assert_eq!(Kind::from_str("expense"), Some(Kind::Expense));
        assert_eq!(Kind::from_str("transfer"), None);
    }
}
